use clap::{Parser, Subcommand};
use commands::{
    plot::{self, PlotArgs},
    process::{self, ProcessArgs},
};
use ephys_core::EphysError;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ephys-run", about = "Ephys session-summary pipeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locate, load, summarize, and plot one recording session.
    Process(ProcessArgs),
    /// Re-run plotting routines against an existing summary blob.
    Plot(PlotArgs),
    /// Print the pipeline version.
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result: Result<(), EphysError> = match cli.command {
        Command::Process(args) => process::run(&args),
        Command::Plot(args) => plot::run(&args),
        Command::Version => {
            println!("ephys-run {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(err) = result {
        log::error!("session processing failed: {err}");
        std::process::exit(1);
    }
}
