pub mod cli;
pub mod config;
pub mod coordinator;
pub mod gateway;
pub mod logging;
pub mod registry;
pub mod tui;
pub mod workflow;

pub use config::Config;
pub use gateway::GatewayClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
