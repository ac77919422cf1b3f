use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod build;
mod config;
mod generate;
mod hotswap;
mod list;
mod options;
mod solder;

#[derive(Parser)]
#[command(name = "kbd")]
#[command(about = "Generate KiCad footprint libraries for Cherry MX keyboard switches", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the standard solder footprint library
    #[command(alias = "s")]
    Solder(solder::SolderArgs),

    /// Generate the standard hotswap footprint library
    #[command(alias = "h")]
    Hotswap(hotswap::HotswapArgs),

    /// Generate a library from a TOML variant file
    #[command(alias = "b")]
    Build(build::BuildArgs),

    /// List the footprints of the standard library
    #[command(alias = "ls")]
    List(list::ListArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the default level
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Solder(args) => solder::execute(args),
        Commands::Hotswap(args) => hotswap::execute(args),
        Commands::Build(args) => build::execute(args),
        Commands::List(args) => list::execute(args),
    }
}
