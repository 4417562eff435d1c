use clap::{Parser, Subcommand};

pub mod database;

#[derive(Parser, Debug)]
#[command(
    name = "incident-provisioner",
    about = "Creates the incident_tracker collections and indexes",
    long_about = "Ensures the incident_tracker database has the incidents and incident_summaries collections \
    with every index the incident tracker relies on. Safe to run repeatedly.",
    after_help = "Examples:\n  \
    incident-provisioner provision --mongodb-connection-url mongodb://localhost:27017\n  \
    incident-provisioner verify\n  \
    incident-provisioner plan --json"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the collections and indexes
    Provision {
        #[command(flatten)]
        provision_command: ProvisionCmd,
    },
    /// Compare the live schema with the declared one
    Verify {
        #[command(flatten)]
        verify_command: VerifyCmd,
    },
    /// Print the declared collections and indexes without connecting
    Plan {
        #[command(flatten)]
        plan_command: PlanCmd,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct ProvisionCmd {
    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct VerifyCmd {
    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct PlanCmd {
    /// Emit the plan as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
