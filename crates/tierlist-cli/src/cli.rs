//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tierlist CLI - Build tierlists and render them to PNG.
#[derive(Debug, Parser)]
#[command(name = "tierlist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format for `list`
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TIERLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enter interactive REPL mode
    Repl,

    /// Replay a file of session commands
    Run(RunArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Script with one session command per line
    pub script: PathBuf,

    /// Stop at the first line that cannot be parsed or executed
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Log filter directive implied by `-v`, if any.
    pub fn log_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::parse_from(["tierlist"]);
        assert!(cli.command.is_none());
        assert!(!cli.no_color);
        assert_eq!(cli.log_level(), None);
    }

    #[test]
    fn test_run_command() {
        let cli = Cli::parse_from(["tierlist", "run", "session.txt", "--strict"]);
        match cli.command {
            Some(Command::Run(args)) => {
                assert_eq!(args.script, PathBuf::from("session.txt"));
                assert!(args.strict);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tierlist", "repl", "--format", "json", "--no-color", "-vv"]);
        assert!(matches!(cli.command, Some(Command::Repl)));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert_eq!(cli.log_level(), Some("trace"));
    }

    #[test]
    fn test_missing_script_is_rejected() {
        assert!(Cli::try_parse_from(["tierlist", "run"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, OutputFormat::Quiet);
    }
}
