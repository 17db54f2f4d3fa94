use super::ConnectionArgs;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let config = args.connection.load_config_with_logging()?;
    let gateway = args.connection.build_gateway(&config)?;

    let status = gateway.fetch_home_status().await?;
    println!("{}", status.message);

    Ok(())
}
