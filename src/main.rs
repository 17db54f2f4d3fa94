use anyhow::Result;
use clap::{Parser, Subcommand};
use waf_console::cli;

#[derive(Parser)]
#[command(name = "waf-console")]
#[command(version = waf_console::VERSION)]
#[command(about = "Operator console for an external web application firewall", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the full-screen dashboard
    Dashboard(cli::DashboardArgs),

    /// Inspect and toggle protection rules
    Rules(cli::RulesArgs),

    /// Submit an input string and see whether the firewall would block it
    Check(cli::CheckArgs),

    /// Show the firewall's status message
    Status(cli::StatusArgs),

    /// Configuration management
    Config(cli::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dashboard(args) => cli::dashboard::run(args).await,
        Commands::Rules(args) => cli::rules::run(args).await,
        Commands::Check(args) => cli::check::run(args).await,
        Commands::Status(args) => cli::status::run(args).await,
        Commands::Config(args) => cli::config::run(args).await,
    }
}
