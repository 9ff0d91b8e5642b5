//! UcsSession trait for mocking
//!
//! This trait abstracts the authenticated session to enable mocking in unit
//! tests. The concrete [`UcsSession`](crate::UcsSession) implements it, and
//! tests use [`MockUcsSession`](crate::MockUcsSession) instead.

use crate::error::UcsmError;
use crate::models::*;

/// Capability surface of an authenticated UCS manager session
///
/// List, create and delete operations are scoped to a parent object and an
/// object kind; mutations address objects by DN. All async methods must be
/// `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait UcsSessionTrait: Send + Sync {
    /// Get the manager endpoint URL
    fn endpoint(&self) -> &str;

    /// Close the session; it cannot be reused afterwards
    async fn logout(&self) -> Result<(), UcsmError>;

    // Scope resolution
    async fn datetime_service(&self) -> Result<CommDateTime, UcsmError>;
    async fn lan_cloud(&self) -> Result<FabricLanCloud, UcsmError>;

    // NTP providers
    async fn query_ntp_providers(&self, parent: &CommDateTime, name: Option<&str>) -> Result<Vec<NtpProvider>, UcsmError>;
    async fn create_ntp_provider(&self, parent: &CommDateTime, name: &str) -> Result<NtpProvider, UcsmError>;
    async fn delete_ntp_provider(&self, dn: &str) -> Result<(), UcsmError>;

    // Fabric VLANs
    async fn query_vlans(&self, parent: &FabricLanCloud, name: Option<&str>, id: Option<u32>) -> Result<Vec<FabricVlan>, UcsmError>;
    async fn create_vlan(&self, parent: &FabricLanCloud, name: &str, id: u32) -> Result<FabricVlan, UcsmError>;
    async fn delete_vlan(&self, dn: &str) -> Result<(), UcsmError>;
}
