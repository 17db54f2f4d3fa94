use crate::config::{parser, Config};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Validate a configuration file
    Check {
        #[arg(short, long, default_value = "waf-console.toml")]
        config: PathBuf,
    },

    /// Write a default configuration file
    Init {
        #[arg(short, long, default_value = "waf-console.toml")]
        output: PathBuf,
    },
}

pub async fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Check { config } => {
            println!("Checking configuration: {}", config.display());

            let cfg = Config::from_file(&config)?;
            let warnings = cfg.validate()?;

            if warnings.is_empty() {
                println!("Configuration is valid!");
            } else {
                println!("Configuration loaded with findings:\n");
                for warning in warnings {
                    println!("{}", warning);
                }
            }

            Ok(())
        }

        ConfigCommand::Init { output } => {
            if output.exists() {
                anyhow::bail!("Refusing to overwrite existing file: {}", output.display());
            }

            let config = Config::default();
            parser::save_config(&config, &output)?;

            println!("Wrote default configuration to {}", output.display());
            println!("Set api.endpoint before connecting to a backend.");
            Ok(())
        }
    }
}
