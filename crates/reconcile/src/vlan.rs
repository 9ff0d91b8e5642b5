//! Fabric VLAN convergence
//!
//! A desired VLAN carries a name and a numeric id; the pair forms the
//! identity key. An existing VLAN matches only if both fields match.

use crate::{converge, ConvergeError, DesiredState, ManagedKind, ReconcileReport};
use std::str::FromStr;
use ucsm_client::{FabricLanCloud, UcsSessionTrait, UcsmError};

/// One desired VLAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanSpec {
    pub name: String,
    pub id: u32,
}

impl FromStr for VlanSpec {
    type Err = String;

    /// Parses `NAME=ID`, e.g. `prod=100`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, id) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=ID, got '{}'", s))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("VLAN name must not be empty in '{}'", s));
        }
        let id = id
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid VLAN id in '{}': {}", s, e))?;
        Ok(Self {
            name: name.to_string(),
            id,
        })
    }
}

/// Fabric VLANs under the LAN cloud
pub struct Vlans<'a> {
    session: &'a dyn UcsSessionTrait,
    scope: FabricLanCloud,
}

impl<'a> Vlans<'a> {
    /// Resolve the LAN cloud scope the VLANs live under
    ///
    /// One scope query per invocation, before the item loop.
    pub async fn resolve(session: &'a dyn UcsSessionTrait) -> Result<Self, ConvergeError> {
        let scope = session.lan_cloud().await.map_err(|e| ConvergeError::Scope {
            scope: "LAN cloud",
            source: e,
        })?;
        Ok(Self { session, scope })
    }
}

#[async_trait::async_trait]
impl ManagedKind for Vlans<'_> {
    type Item = VlanSpec;

    /// VLANs are reported by name
    fn identity(item: &VlanSpec) -> String {
        item.name.clone()
    }

    async fn find(&self, item: &VlanSpec) -> Result<Vec<String>, UcsmError> {
        let vlans = self
            .session
            .query_vlans(&self.scope, Some(&item.name), Some(item.id))
            .await?;
        Ok(vlans.into_iter().map(|v| v.dn).collect())
    }

    async fn create(&self, item: &VlanSpec) -> Result<(), UcsmError> {
        self.session
            .create_vlan(&self.scope, &item.name, item.id)
            .await
            .map(|_| ())
    }

    async fn remove(&self, dn: &str) -> Result<(), UcsmError> {
        self.session.delete_vlan(dn).await
    }
}

/// Converge the device's fabric VLANs to the desired list
pub async fn apply(
    session: &dyn UcsSessionTrait,
    vlans: &[VlanSpec],
    state: DesiredState,
) -> Result<ReconcileReport, ConvergeError> {
    let managed = Vlans::resolve(session).await?;
    converge(&managed, vlans, state).await
}
