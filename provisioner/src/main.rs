use clap::Parser as _;
use dotenvy::dotenv;
use incident_provisioner::cli::{Cli, Commands};
use incident_provisioner::setup::plan::render_plan;
use incident_provisioner::setup::{run_provision, run_verify};
use incident_provisioner::utils::logging::init_logging;
use incident_provisioner::ProvisionerResult;
use tracing::{error, info};

/// Run the requested command to completion on a single thread
#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!(error = %e, error_chain = ?e, "Incident provisioner failed");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(command: Commands) -> ProvisionerResult<()> {
    match command {
        Commands::Provision { provision_command } => {
            info!("Executing provision command");
            let report = run_provision(&provision_command).await?;
            info!(created = ?report.collections_created, "Provisioning completed");
        }
        Commands::Verify { verify_command } => {
            info!("Executing verify command");
            let report = run_verify(&verify_command).await?;
            info!(extra_indexes = report.extra_indexes.len(), "Verification completed");
        }
        Commands::Plan { plan_command } => {
            let plan = render_plan(plan_command.json)?;
            print!("{plan}");
        }
    }
    Ok(())
}
