//! Module-specific error types
//!
//! Realizes the invocation error taxonomy: configuration errors raised
//! before the device is contacted, authentication failures at login, and
//! device-operation failures mid-convergence. All are terminal for the
//! invocation; there is no retry.

use thiserror::Error;
use ucs_reconcile::ConvergeError;
use ucsm_client::UcsmError;

/// Errors terminal for one module invocation
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Required input missing or malformed; raised before contacting the device
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Session could not be established; fatal, no retry
    #[error("Could not login to UCS: {0}")]
    Authentication(#[source] UcsmError),

    /// A device operation failed after the session was established
    #[error("Could not converge NTP servers: {0}")]
    Converge(#[from] ConvergeError),
}
