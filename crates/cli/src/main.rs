use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use manifest_cli::exit_codes::EXIT_SUCCESS;
use manifest_cli::{cmd_run, cmd_validate, CliError};

#[derive(Parser)]
#[command(name = "mfst")]
#[command(about = "Guest manifest compare and message generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a compare or messages job from a TOML config file
    #[command(after_help = "\
Examples:
  mfst run compare.toml
  mfst run compare.toml --json
  mfst run arrivals.toml --output result.json")]
    Run {
        /// Path to the job config file
        config: PathBuf,

        /// Output JSON to stdout instead of human output
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a job config without running
    #[command(after_help = "\
Examples:
  mfst validate compare.toml")]
    Validate {
        /// Path to the job config file
        config: PathBuf,
    },
}

fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run { config, json, output } => cmd_run(&config, json, output.as_deref()),
        Commands::Validate { config } => cmd_validate(&config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}
