//! Mock UcsSession for unit testing
//!
//! This module provides an in-memory implementation of [`UcsSessionTrait`]
//! that can be used in unit tests without a reachable UCS manager.
//!
//! The mock stores managed objects in memory, records every mutation it
//! performs, and can be configured to fail specific operations for testing
//! error paths.

use crate::error::UcsmError;
use crate::models::*;
use crate::session_trait::UcsSessionTrait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock UcsSession for testing
///
/// Clones share the same underlying stores, so a test can keep a handle for
/// assertions while the code under test owns another.
#[derive(Clone)]
pub struct MockUcsSession {
    endpoint: String,
    pub(crate) ntp_providers: Arc<Mutex<Vec<NtpProvider>>>,
    pub(crate) vlans: Arc<Mutex<Vec<FabricVlan>>>,
    // Mutations performed, as "create:<name>" / "delete:<dn>" entries
    mutations: Arc<Mutex<Vec<String>>>,
    // Operations configured to fail, keyed "query:<name>" / "create:<name>" / "delete:<dn>"
    fail_ops: Arc<Mutex<HashSet<String>>>,
    closed: Arc<Mutex<bool>>,
}

impl MockUcsSession {
    /// DN of the mock's datetime service scope
    pub const DATETIME_DN: &'static str = "sys/svc-ext/datetime-svc";
    /// DN of the mock's LAN cloud scope
    pub const LAN_CLOUD_DN: &'static str = "fabric/lan";

    /// Create a new mock session
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ntp_providers: Arc::new(Mutex::new(Vec::new())),
            vlans: Arc::new(Mutex::new(Vec::new())),
            mutations: Arc::new(Mutex::new(Vec::new())),
            fail_ops: Arc::new(Mutex::new(HashSet::new())),
            closed: Arc::new(Mutex::new(false)),
        }
    }

    /// Seed an NTP provider (for test setup)
    pub fn add_ntp_provider(&self, name: &str) {
        let dn = format!("{}/ntp-{}", Self::DATETIME_DN, name);
        self.ntp_providers.lock().unwrap().push(NtpProvider {
            dn,
            name: name.to_string(),
        });
    }

    /// Seed a fabric VLAN (for test setup)
    pub fn add_vlan(&self, name: &str, id: u32) {
        let dn = format!("{}/net-{}", Self::LAN_CLOUD_DN, name);
        self.vlans.lock().unwrap().push(FabricVlan {
            dn,
            name: name.to_string(),
            id,
        });
    }

    /// Configure an operation to fail
    ///
    /// Keys are `query:<name>`, `create:<name>` and `delete:<dn>`.
    pub fn fail_on(&self, key: impl Into<String>) {
        self.fail_ops.lock().unwrap().insert(key.into());
    }

    /// Mutations performed so far, as `create:<name>` / `delete:<dn>` entries
    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    /// Whether the session has been closed via `logout`
    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }

    /// Names of the NTP providers currently in the store
    pub fn ntp_provider_names(&self) -> Vec<String> {
        self.ntp_providers
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    /// (name, id) pairs of the VLANs currently in the store
    pub fn vlan_entries(&self) -> Vec<(String, u32)> {
        self.vlans
            .lock()
            .unwrap()
            .iter()
            .map(|v| (v.name.clone(), v.id))
            .collect()
    }

    fn check_fail(&self, key: &str) -> Result<(), UcsmError> {
        if self.fail_ops.lock().unwrap().contains(key) {
            return Err(UcsmError::Api(format!("injected failure for {}", key)));
        }
        Ok(())
    }

    fn record(&self, entry: String) {
        self.mutations.lock().unwrap().push(entry);
    }
}

#[async_trait::async_trait]
impl UcsSessionTrait for MockUcsSession {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn logout(&self) -> Result<(), UcsmError> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }

    async fn datetime_service(&self) -> Result<CommDateTime, UcsmError> {
        self.check_fail("query:datetime-service")?;
        Ok(CommDateTime {
            dn: Self::DATETIME_DN.to_string(),
        })
    }

    async fn lan_cloud(&self) -> Result<FabricLanCloud, UcsmError> {
        self.check_fail("query:lan-cloud")?;
        Ok(FabricLanCloud {
            dn: Self::LAN_CLOUD_DN.to_string(),
        })
    }

    async fn query_ntp_providers(
        &self,
        _parent: &CommDateTime,
        name: Option<&str>,
    ) -> Result<Vec<NtpProvider>, UcsmError> {
        if let Some(name) = name {
            self.check_fail(&format!("query:{}", name))?;
        }
        let providers = self.ntp_providers.lock().unwrap();
        Ok(providers
            .iter()
            .filter(|p| name.is_none_or(|n| p.name == n))
            .cloned()
            .collect())
    }

    async fn create_ntp_provider(
        &self,
        parent: &CommDateTime,
        name: &str,
    ) -> Result<NtpProvider, UcsmError> {
        self.check_fail(&format!("create:{}", name))?;
        let provider = NtpProvider {
            dn: parent.ntp_provider_dn(name),
            name: name.to_string(),
        };
        self.ntp_providers.lock().unwrap().push(provider.clone());
        self.record(format!("create:{}", name));
        Ok(provider)
    }

    async fn delete_ntp_provider(&self, dn: &str) -> Result<(), UcsmError> {
        self.check_fail(&format!("delete:{}", dn))?;
        let mut providers = self.ntp_providers.lock().unwrap();
        let position = providers.iter().position(|p| p.dn == dn).ok_or_else(|| {
            UcsmError::NotFound(format!("Managed object {} not found", dn))
        })?;
        providers.remove(position);
        self.record(format!("delete:{}", dn));
        Ok(())
    }

    async fn query_vlans(
        &self,
        _parent: &FabricLanCloud,
        name: Option<&str>,
        id: Option<u32>,
    ) -> Result<Vec<FabricVlan>, UcsmError> {
        if let Some(name) = name {
            self.check_fail(&format!("query:{}", name))?;
        }
        let vlans = self.vlans.lock().unwrap();
        Ok(vlans
            .iter()
            .filter(|v| name.is_none_or(|n| v.name == n) && id.is_none_or(|i| v.id == i))
            .cloned()
            .collect())
    }

    async fn create_vlan(
        &self,
        parent: &FabricLanCloud,
        name: &str,
        id: u32,
    ) -> Result<FabricVlan, UcsmError> {
        self.check_fail(&format!("create:{}", name))?;
        let vlan = FabricVlan {
            dn: parent.vlan_dn(name),
            name: name.to_string(),
            id,
        };
        self.vlans.lock().unwrap().push(vlan.clone());
        self.record(format!("create:{}", name));
        Ok(vlan)
    }

    async fn delete_vlan(&self, dn: &str) -> Result<(), UcsmError> {
        self.check_fail(&format!("delete:{}", dn))?;
        let mut vlans = self.vlans.lock().unwrap();
        let position = vlans.iter().position(|v| v.dn == dn).ok_or_else(|| {
            UcsmError::NotFound(format!("Managed object {} not found", dn))
        })?;
        vlans.remove(position);
        self.record(format!("delete:{}", dn));
        Ok(())
    }
}
