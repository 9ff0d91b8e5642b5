//! Cisco UCS manager API client
//!
//! A Rust client library for the UCS manager's managed-object API. Provides
//! an authenticated session with typed models and methods for the object
//! kinds the ucsops modules converge (NTP providers, fabric VLANs).
//!
//! # Example
//!
//! ```no_run
//! use ucsm_client::UcsSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Open an authenticated session
//! let session = UcsSession::login(
//!     "https://ucs.example.net",
//!     "admin",
//!     "secret",
//! ).await?;
//!
//! // Resolve the datetime service and list its NTP providers
//! let datetime = session.datetime_service().await?;
//! let providers = session.query_ntp_providers(&datetime, None).await?;
//!
//! // Add a provider
//! session.create_ntp_provider(&datetime, "10.0.0.1").await?;
//!
//! // Always close the session when done
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Session lifecycle**: explicit login/logout; a closed session cannot be
//!   reused
//! - **Managed-object addressing**: objects are resolved by class under a
//!   parent scope and mutated by distinguished name (DN)
//! - **Mocking**: the [`UcsSessionTrait`] seam plus [`MockUcsSession`] (behind
//!   the `test-util` feature) for unit tests without a reachable UCS manager

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod session_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::UcsSession;
pub use error::UcsmError;
pub use models::*;
pub use session_trait::UcsSessionTrait;
#[cfg(feature = "test-util")]
pub use mock::MockUcsSession;
