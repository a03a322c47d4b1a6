use clap::{Args, Subcommand, ValueEnum};

use agenda_sync::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("server_url: {}", config.server_url);
                        println!("categories:");
                        let mut categories: Vec<_> = config.categories.iter().collect();
                        categories.sort_by_key(|(_, rank)| **rank);
                        for (category, rank) in categories {
                            println!("  {}: {}", rank, category);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
