use anyhow::Result;
use clap::{Args, ValueEnum};
use kbd_footprint::{SwitchVariant, standard_variants};

use crate::generate::generate;
use crate::options::{OutputArgs, SelectionArgs};

const DEFAULT_LIBRARY: &str = "MX_Hotswap";

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PadsChoice {
    /// Standard socket pads
    #[default]
    Normal,
    /// Wider pads with vias to resist shearing off the board
    Antishear,
    All,
}

impl PadsChoice {
    fn switches(self) -> Vec<SwitchVariant> {
        match self {
            PadsChoice::Normal => vec![SwitchVariant::Hotswap],
            PadsChoice::Antishear => vec![SwitchVariant::HotswapAntishear],
            PadsChoice::All => vec![SwitchVariant::Hotswap, SwitchVariant::HotswapAntishear],
        }
    }
}

#[derive(Args, Debug, Clone)]
#[command(about = "Generate MX switch footprints for Kailh hotswap sockets")]
pub struct HotswapArgs {
    /// Socket pad style
    #[arg(short, long, value_enum, default_value_t = PadsChoice::Normal)]
    pub pads: PadsChoice,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn execute(args: HotswapArgs) -> Result<()> {
    let selection = args.selection.selection(args.pads.switches());
    let variants = standard_variants(&selection);
    let name = args.output.name.as_deref().unwrap_or(DEFAULT_LIBRARY);
    generate(&variants, &args.output, name)
}
