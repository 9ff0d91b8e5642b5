//! UCS managed-object models
//!
//! Every managed object lives in the manager's object tree and is addressed
//! by a distinguished name (DN) under a parent scope. The models here cover
//! the scopes and object kinds the ucsops modules operate on.

use serde::{Deserialize, Serialize};

/// Response body of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token sent with every subsequent request
    pub token: String,
}

/// Date/time service scope (class `CommDateTime`)
///
/// Parent of all NTP providers. There is exactly one per manager, at
/// `sys/svc-ext/datetime-svc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommDateTime {
    pub dn: String,
}

impl CommDateTime {
    /// Class identifier in the managed-object tree
    pub const CLASS_ID: &'static str = "CommDateTime";

    /// DN of a child NTP provider with the given name
    pub fn ntp_provider_dn(&self, name: &str) -> String {
        format!("{}/ntp-{}", self.dn, name)
    }
}

/// NTP provider managed object (class `CommNtpProvider`)
///
/// The `name` carries the server address: an IP address or hostname/FQDN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NtpProvider {
    pub dn: String,
    pub name: String,
}

impl NtpProvider {
    /// Class identifier in the managed-object tree
    pub const CLASS_ID: &'static str = "CommNtpProvider";
}

/// LAN cloud scope (class `FabricLanCloud`)
///
/// Parent of all fabric VLANs, at `fabric/lan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricLanCloud {
    pub dn: String,
}

impl FabricLanCloud {
    /// Class identifier in the managed-object tree
    pub const CLASS_ID: &'static str = "FabricLanCloud";

    /// DN of a child VLAN with the given name
    pub fn vlan_dn(&self, name: &str) -> String {
        format!("{}/net-{}", self.dn, name)
    }
}

/// Fabric VLAN managed object (class `FabricVlan`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricVlan {
    pub dn: String,
    pub name: String,
    pub id: u32,
}

impl FabricVlan {
    /// Class identifier in the managed-object tree
    pub const CLASS_ID: &'static str = "FabricVlan";
}
