//! ucs-vlan
//!
//! Ensures the given VLANs are present on (or absent from) a Cisco UCS
//! platform. Each VLAN is given as `NAME=ID`; name and id together form the
//! identity an existing VLAN must match. The module opens a session,
//! converges the VLANs under the LAN cloud, closes the session, and reports
//! what changed as JSON on stdout. Logs go to stderr so the result stays
//! machine-parsable.

mod error;

use crate::error::ModuleError;
use clap::{Parser, ValueEnum};
use tracing::warn;
use ucs_reconcile::vlan::{self, VlanSpec};
use ucs_reconcile::{DesiredState, ReconcileReport};
use ucsm_client::UcsSession;

#[derive(Parser)]
#[command(name = "ucs-vlan")]
#[command(about = "Adds or removes VLANs on Cisco UCS", long_about = None)]
struct Cli {
    /// UCS manager endpoint, e.g. https://ucs.example.net
    #[arg(long, env = "UCS_ENDPOINT")]
    endpoint: String,

    /// Username to connect with
    #[arg(long, env = "UCS_USERNAME")]
    username: String,

    /// Password for the account
    #[arg(long, env = "UCS_PASSWORD", hide_env_values = true)]
    password: String,

    /// VLAN to converge, as NAME=ID, e.g. prod=100 (repeatable)
    #[arg(long = "vlan", value_name = "NAME=ID", required = true)]
    vlans: Vec<VlanSpec>,

    /// Whether the VLANs should be present or absent
    #[arg(long, value_enum, default_value_t = StateArg::Present)]
    state: StateArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StateArg {
    Present,
    Absent,
}

impl From<StateArg> for DesiredState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Present => DesiredState::Present,
            StateArg::Absent => DesiredState::Absent,
        }
    }
}

async fn run(cli: Cli) -> Result<ReconcileReport, ModuleError> {
    let session = UcsSession::login(&cli.endpoint, &cli.username, &cli.password)
        .await
        .map_err(ModuleError::Authentication)?;

    let outcome = vlan::apply(&session, &cli.vlans, cli.state.into()).await;

    // Closed on every exit path; a failed logout must not mask the outcome
    if let Err(e) = session.logout().await {
        warn!("Failed to close session: {}", e);
    }

    Ok(outcome?)
}

fn emit_failure(msg: &str) -> ! {
    let failure = serde_json::json!({ "failed": true, "msg": msg });
    println!("{}", failure);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                e.exit()
            }
            _ => emit_failure(&ModuleError::InvalidConfig(e.to_string()).to_string()),
        },
    };

    match run(cli).await {
        Ok(report) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).unwrap_or_default()
            );
        }
        Err(e) => emit_failure(&e.to_string()),
    }
}
