use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use agenda_sync::Config;
use commands::{AddCommand, ConfigCommand, HideCommand, WatchCommand};

#[derive(Parser)]
#[command(name = "agenda")]
#[command(version)]
#[command(about = "A live-synced shared meeting agenda", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the shared agenda in the terminal
    Watch(WatchCommand),

    /// Request a new agenda entry
    Add(AddCommand),

    /// Request removal of an agenda entry
    Hide(HideCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda=info,agenda_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Watch(cmd)) => cmd.run(&config).await?,
        Some(Commands::Add(cmd)) => cmd.run(&config).await?,
        Some(Commands::Hide(cmd)) => cmd.run(&config).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => println!("Use --help to see available commands"),
    }

    Ok(())
}
