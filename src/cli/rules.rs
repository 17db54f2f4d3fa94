use super::ConnectionArgs;
use crate::coordinator::{ToggleCoordinator, ToggleOutcome};
use crate::registry::RuleRegistry;
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Args)]
pub struct RulesArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Subcommand)]
pub enum RulesCommand {
    /// List protection rules
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Enable a protection rule
    Enable { id: String },

    /// Disable a protection rule
    Disable { id: String },

    /// Flip a protection rule to the opposite of its current state
    Toggle { id: String },
}

pub async fn run(args: RulesArgs) -> Result<()> {
    let config = args.connection.load_config_with_logging()?;
    let gateway = args.connection.build_gateway(&config)?;

    match args.command {
        RulesCommand::List { format } => {
            let rules = gateway.fetch_rules().await?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&rules)?),
                "text" => {
                    println!("=== Protection Rules ===");
                    println!();
                    if rules.is_empty() {
                        println!("No protection rules configured.");
                    }
                    for rule in rules {
                        let state = if rule.enabled { "enabled " } else { "disabled" };
                        println!("[{}] {:<20} {}", state, rule.name, rule.id);
                        println!("           {}", rule.description);
                    }
                }
                _ => bail!("Invalid format: {}. Use 'text' or 'json'", format),
            }

            Ok(())
        }

        RulesCommand::Enable { id } => set_enabled(gateway, &id, true).await,
        RulesCommand::Disable { id } => set_enabled(gateway, &id, false).await,

        RulesCommand::Toggle { id } => {
            // One-shot toggles still go through the coordinator so the
            // rollback-on-failure contract is exercised everywhere.
            let rules = gateway.fetch_rules().await?;
            let mut registry = RuleRegistry::new();
            registry.replace_all(rules);
            let coordinator =
                ToggleCoordinator::new(gateway, Arc::new(RwLock::new(registry)));

            match coordinator.toggle(&id).await? {
                ToggleOutcome::Applied { enabled } => {
                    let state = if enabled { "enabled" } else { "disabled" };
                    println!("Rule {} is now {}", id, state);
                    Ok(())
                }
                ToggleOutcome::Dropped => Ok(()),
                ToggleOutcome::Failed { message } => bail!("{}", message),
            }
        }
    }
}

async fn set_enabled(
    gateway: Arc<crate::gateway::GatewayClient>,
    id: &str,
    enabled: bool,
) -> Result<()> {
    gateway.set_rule_enabled(id, enabled).await?;
    let state = if enabled { "enabled" } else { "disabled" };
    println!("Rule {} is now {}", id, state);
    Ok(())
}
