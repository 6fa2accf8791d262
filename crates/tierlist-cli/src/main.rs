//! Tierlist CLI - Build tierlists interactively or from scripts and render them to PNG.

use anyhow::Context;
use clap::Parser;
use tierlist_cli::commands;
use tierlist_cli::repl;
use tierlist_cli::{Cli, Command, Config, Formatter, Session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.log_level());

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("Using default configuration: {}", e);
            Config::default()
        }),
    };

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let session = Session::new(&config)?;

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&session, &config.settings, &formatter).await?;
        }
        Some(Command::Run(args)) => {
            let summary = commands::run_script(&args.script, &session, &formatter, args.strict)
                .await
                .with_context(|| format!("Failed to replay {}", args.script.display()))?;

            let message = format!("Replayed {} command(s), {} failed", summary.executed, summary.failed);
            if summary.failed == 0 {
                eprintln!("{}", formatter.success(&message));
            } else {
                eprintln!("{}", formatter.warning(&message));
            }
        }
    }

    Ok(())
}

/// Log to stderr; `-v` wins over `RUST_LOG`, which wins over `info`.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
