use super::ConnectionArgs;
use crate::tui;
use anyhow::Result;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Auto-refresh interval in seconds (overrides config)
    #[arg(short, long)]
    pub refresh: Option<u64>,
}

pub async fn run(args: DashboardArgs) -> Result<()> {
    let config = args.connection.load_config()?;
    let gateway = args.connection.build_gateway(&config)?;

    let refresh = Duration::from_secs(args.refresh.unwrap_or(config.ui.refresh_seconds).max(1));

    let app = tui::app::App::new(gateway, &config);
    tui::run_tui(app, refresh).await
}
