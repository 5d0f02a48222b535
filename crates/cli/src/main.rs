mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::RunArgs;
use crate::output::{OutputFormat, print_error};

/// artimport - copy shared libraries out of resolved dependencies
#[derive(Parser)]
#[command(name = "artimport")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Copy matching libraries from every dependency into the output directory
  Run(RunArgs),

  /// Show the effective import rules
  Rules {
    /// Recipe file (JSON). Shows the built-in rules when omitted
    #[arg(short, long)]
    recipe: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the detected platform and build settings
  Info {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Run(args) => cmd::cmd_run(args),
    Commands::Rules { recipe, output } => cmd::cmd_rules(recipe.as_deref(), output),
    Commands::Info { output } => cmd::cmd_info(output),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
