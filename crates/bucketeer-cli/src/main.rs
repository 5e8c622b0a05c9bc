//! Bucketeer CLI - a self-emptying produce board and a department directory.

use bucketeer_cli::cli::{ConfigAction, ConfigArgs};
use bucketeer_cli::commands;
use bucketeer_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run() -> bucketeer_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config, falling back to defaults when the file is absent
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = match &cli.command {
        // A broken file must not stop `config init` from replacing it
        Some(Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        })) => Config::default(),
        _ => Config::load_from(&config_path)?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None => {
            commands::execute_board(Default::default(), &config, &formatter).await?;
        }
        Some(Command::Board(args)) => {
            commands::execute_board(args, &config, &formatter).await?;
        }
        Some(Command::Seed(args)) => {
            commands::execute_seed(args, &formatter)?;
        }
        Some(Command::Directory(args)) => {
            commands::execute_directory(args, &config, &formatter).await?;
        }
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}
