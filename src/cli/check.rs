use super::ConnectionArgs;
use crate::workflow::InputCheckWorkflow;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Input string to submit to the firewall
    pub input: String,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let config = args.connection.load_config_with_logging()?;
    let gateway = args.connection.build_gateway(&config)?;

    let mut workflow = InputCheckWorkflow::new(gateway);
    let result = workflow.submit(&args.input).await;

    println!("{}", result.message);

    // Blocked or failed checks exit non-zero so the command is scriptable.
    if !result.ok {
        std::process::exit(1);
    }

    Ok(())
}
