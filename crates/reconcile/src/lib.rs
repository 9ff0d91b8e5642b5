//! Idempotent present/absent convergence for UCS managed objects
//!
//! The convergence loop queries the device for each desired item, then
//! performs the minimal create/delete needed to reach the target state:
//! existence-checked create-or-skip for `present`, existence-checked
//! remove-or-skip for `absent`. The result reports exactly what changed.
//!
//! Items are processed strictly in the order supplied. On the first failed
//! device operation the loop aborts and the whole invocation reports failure;
//! partial results are never surfaced.
//!
//! Resource kinds plug in through [`ManagedKind`]:
//! - [`ntp::NtpProviders`] — NTP servers under the datetime service
//! - [`vlan::Vlans`] — fabric VLANs under the LAN cloud

pub mod ntp;
pub mod vlan;
#[cfg(test)]
mod ntp_test;
#[cfg(test)]
mod vlan_test;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use ucsm_client::UcsmError;

/// Target state for the desired items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredState {
    /// Items must exist on the device
    Present,
    /// Items must not exist on the device
    Absent,
}

/// What a convergence run changed on the device
///
/// `changed` is true exactly when `created` or `removed` is non-empty.
/// Identities appear in the order the items were supplied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub changed: bool,
    pub created: Vec<String>,
    pub removed: Vec<String>,
}

/// Device operation kind, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Query,
    Create,
    Remove,
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Query => write!(f, "query"),
            Op::Create => write!(f, "create"),
            Op::Remove => write!(f, "remove"),
        }
    }
}

/// A convergence run failed
///
/// Carries the failed operation, the item it failed for, and the underlying
/// device error. Any results accumulated before the failure are discarded.
#[derive(Debug, Error)]
pub enum ConvergeError {
    /// Resolving the parent scope failed, before any item was processed
    #[error("failed to resolve {scope}: {source}")]
    Scope {
        scope: &'static str,
        #[source]
        source: UcsmError,
    },

    /// A query/create/delete against the device failed mid-run
    #[error("{op} failed for {identity}: {source}")]
    Operation {
        op: Op,
        identity: String,
        #[source]
        source: UcsmError,
    },
}

/// Capability surface the convergence loop needs for one resource kind
///
/// Implementations wrap an authenticated session plus the resolved parent
/// scope the objects live under. `find` must match on the item's full
/// identity (all identity fields, exact match).
#[async_trait::async_trait]
pub trait ManagedKind {
    /// One entry in the caller-supplied desired-state list
    type Item: Send + Sync;

    /// Identity label reported for a converged item
    fn identity(item: &Self::Item) -> String;

    /// DNs of existing objects matching the item's full identity
    async fn find(&self, item: &Self::Item) -> Result<Vec<String>, UcsmError>;

    /// Create an object with the item's attributes
    async fn create(&self, item: &Self::Item) -> Result<(), UcsmError>;

    /// Delete the object with the given DN
    async fn remove(&self, dn: &str) -> Result<(), UcsmError>;
}

/// Converge device state to the desired state for one resource kind
///
/// For each item, in order: query existing objects by full identity, then
/// create (present, no match) or delete the first match (absent, any match).
/// Items already in the target state are skipped without mutation, which
/// makes re-running the same invocation a no-op.
///
/// If more than one existing object matches an identity, only the first is
/// deleted per invocation; remaining duplicates are left for a subsequent
/// run.
pub async fn converge<K>(
    kind: &K,
    items: &[K::Item],
    state: DesiredState,
) -> Result<ReconcileReport, ConvergeError>
where
    K: ManagedKind + Sync,
{
    let mut report = ReconcileReport::default();

    for item in items {
        let identity = K::identity(item);
        let matches = kind.find(item).await.map_err(|e| ConvergeError::Operation {
            op: Op::Query,
            identity: identity.clone(),
            source: e,
        })?;

        match state {
            DesiredState::Present => {
                if matches.is_empty() {
                    kind.create(item).await.map_err(|e| ConvergeError::Operation {
                        op: Op::Create,
                        identity: identity.clone(),
                        source: e,
                    })?;
                    info!("Created {}", identity);
                    report.created.push(identity);
                    report.changed = true;
                } else {
                    debug!("{} already present, skipping", identity);
                }
            }
            DesiredState::Absent => {
                if let Some(dn) = matches.first() {
                    kind.remove(dn).await.map_err(|e| ConvergeError::Operation {
                        op: Op::Remove,
                        identity: identity.clone(),
                        source: e,
                    })?;
                    info!("Removed {}", identity);
                    report.removed.push(identity);
                    report.changed = true;
                } else {
                    debug!("{} already absent, skipping", identity);
                }
            }
        }
    }

    Ok(report)
}
