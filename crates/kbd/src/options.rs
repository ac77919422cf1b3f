//! Flags shared by the library-generating subcommands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use kbd_footprint::{LedOption, MountStyle, Selection, SwitchVariant};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LedChoice {
    /// Only footprints without LED pins
    #[default]
    None,
    /// Also footprints with LED pins
    Normal,
    /// Also footprints with reversed LED pins
    Reverse,
    /// Both LED pin orders, plus no LED
    All,
}

impl LedChoice {
    pub fn leds(self) -> Vec<LedOption> {
        match self {
            LedChoice::None => vec![LedOption::None],
            LedChoice::Normal => vec![LedOption::None, LedOption::Normal],
            LedChoice::Reverse => vec![LedOption::None, LedOption::Reverse],
            LedChoice::All => LedOption::ALL.to_vec(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MountChoice {
    #[default]
    Pcb,
    Plate,
    All,
}

impl MountChoice {
    pub fn mounts(self) -> Vec<MountStyle> {
        match self {
            MountChoice::Pcb => vec![MountStyle::Pcb],
            MountChoice::Plate => vec![MountStyle::Plate],
            MountChoice::All => MountStyle::ALL.to_vec(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Include footprints with pins for LEDs (reverse flips LED polarity)
    #[arg(long, value_enum, default_value_t = LedChoice::None)]
    pub led: LedChoice,

    /// Switch mounting style
    #[arg(long, value_enum, default_value_t = MountChoice::Pcb)]
    pub mount: MountChoice,

    /// Do not outline switches on the front silkscreen layer
    #[arg(long)]
    pub no_front_silk: bool,

    /// Do not show switch labels on the back silkscreen layer
    #[arg(long)]
    pub no_rear_silk: bool,

    /// Put switch labels on the front silkscreen layer instead of the back
    #[arg(long)]
    pub front_value: bool,
}

impl SelectionArgs {
    pub fn selection(&self, switches: Vec<SwitchVariant>) -> Selection {
        Selection {
            switches,
            mounts: self.mount.mounts(),
            leds: self.led.leds(),
            front_silk: !self.no_front_silk,
            show_value: !self.no_rear_silk,
            value_on_back: !self.front_value,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory
    #[arg(short, long, default_value = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Library name (files are written to "<OUT>/<NAME>.pretty")
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Directory containing 3D model files to copy into the library
    #[arg(long, value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub models: Option<PathBuf>,

    /// Print the footprint names without writing any files
    #[arg(long)]
    pub dry_run: bool,
}
