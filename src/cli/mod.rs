pub mod check;
pub mod config;
pub mod dashboard;
pub mod rules;
pub mod status;

pub use check::CheckArgs;
pub use config::ConfigArgs;
pub use dashboard::DashboardArgs;
pub use rules::RulesArgs;
pub use status::StatusArgs;

use crate::config::Config;
use crate::gateway::GatewayClient;
use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Flags shared by every command that talks to the WAF backend.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "waf-console.toml")]
    pub config: PathBuf,

    /// WAF backend base URL (overrides config and environment)
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

impl ConnectionArgs {
    pub fn load_config(&self) -> Result<Config> {
        Config::load_or_default(&self.config)
    }

    /// Loads config and initializes logging from it. For one-shot commands;
    /// the dashboard skips the subscriber because it owns the terminal.
    pub fn load_config_with_logging(&self) -> Result<Config> {
        let config = self.load_config()?;
        crate::logging::init_logging(&config.logging.level, &config.logging.format)?;
        Ok(config)
    }

    /// Resolves the endpoint once and builds the gateway. Fails fast with a
    /// visible configuration error instead of issuing requests against an
    /// unresolved or malformed origin.
    pub fn build_gateway(&self, config: &Config) -> Result<Arc<GatewayClient>> {
        let endpoint = match config.resolve_endpoint(self.endpoint.as_deref()) {
            Some(endpoint) => endpoint,
            None => bail!(
                "No WAF endpoint configured. Set api.endpoint in {}, pass --endpoint, or export {}",
                self.config.display(),
                crate::config::ENDPOINT_ENV
            ),
        };

        if !crate::config::validator::endpoint_is_usable(&endpoint) {
            bail!("WAF endpoint must be an http:// or https:// URL, got: {}", endpoint);
        }

        let gateway = GatewayClient::new(&endpoint, config.request_timeout())?;
        Ok(Arc::new(gateway))
    }
}
