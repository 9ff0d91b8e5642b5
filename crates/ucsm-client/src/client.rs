//! UCS manager API client
//!
//! Implements the authenticated session against the manager's managed-object
//! endpoints: class resolution under `/api/class/`, child queries and
//! mutations under `/api/mo/`.

use crate::error::UcsmError;
use crate::models::*;
use crate::session_trait::UcsSessionTrait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Authenticated session with a UCS manager
///
/// Created by [`UcsSession::login`]; every call reuses the session token
/// obtained at login. The session must be closed with
/// [`logout`](UcsSession::logout) once the invocation is done — there is no
/// implicit close.
pub struct UcsSession {
    client: Client,
    endpoint: String,
    token: String,
}

impl UcsSession {
    /// Open an authenticated session
    ///
    /// # Arguments
    /// * `endpoint` - UCS manager base URL (e.g., "https://ucs.example.net")
    /// * `username` - account to authenticate as
    /// * `password` - account password
    ///
    /// # Errors
    /// Returns [`UcsmError::Authentication`] if the manager rejects the
    /// credentials, [`UcsmError::Http`] if it is unreachable.
    pub async fn login(
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, UcsmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(UcsmError::Http)?;
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let url = format!("{}/api/aaa/login", endpoint);
        debug!("Logging in to UCS manager at {}", endpoint);

        let response = client
            .post(&url)
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .map_err(UcsmError::Http)?;

        let status = response.status();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsmError::Authentication(format!(
                "login rejected for user {}: {} - {}",
                username, status, body
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsmError::Api(format!(
                "Login failed: {} - {}",
                status, body
            )));
        }

        let login: LoginResponse = response.json().await.map_err(UcsmError::Http)?;
        debug!("Session established");

        Ok(Self {
            client,
            endpoint,
            token: login.token,
        })
    }

    /// Get the manager endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn build_query_string(filters: &[(&str, &str)]) -> String {
        filters
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Resolve all instances of a managed-object class
    async fn resolve_class<T: for<'de> serde::Deserialize<'de>>(
        &self,
        class_id: &str,
    ) -> Result<Vec<T>, UcsmError> {
        let url = format!("{}/api/class/{}", self.endpoint, class_id);
        debug!("Resolving class {}", class_id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsmError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsmError::Api(format!(
                "Failed to resolve class {}: {} - {}",
                class_id, status, body
            )));
        }

        response.json().await.map_err(UcsmError::Http)
    }

    /// Query children of a parent object by class, with optional filters
    async fn query_children<T: for<'de> serde::Deserialize<'de>>(
        &self,
        parent_dn: &str,
        class_id: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, UcsmError> {
        let mut url = format!(
            "{}/api/mo/{}/children?class={}",
            self.endpoint, parent_dn, class_id
        );
        if !filters.is_empty() {
            url = format!("{}&{}", url, Self::build_query_string(filters));
        }
        debug!("Querying {} children of {}", class_id, parent_dn);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsmError::Http)?;

        let status = response.status();
        if status == 404 {
            return Err(UcsmError::NotFound(format!(
                "Parent object {} not found",
                parent_dn
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsmError::Api(format!(
                "Failed to query {} children of {}: {} - {}",
                class_id, parent_dn, status, body
            )));
        }

        response.json().await.map_err(UcsmError::Http)
    }

    /// Create a child object under a parent
    async fn create_child<T: for<'de> serde::Deserialize<'de>>(
        &self,
        parent_dn: &str,
        body: &serde_json::Value,
    ) -> Result<T, UcsmError> {
        let url = format!("{}/api/mo/{}/children", self.endpoint, parent_dn);
        debug!("Creating child of {} with body: {}", parent_dn, body);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(UcsmError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(UcsmError::Api(format!(
                "Failed to create child of {}: {} - {}",
                parent_dn, status, body_text
            )));
        }

        response.json().await.map_err(UcsmError::Http)
    }

    /// Delete a managed object by DN
    async fn delete_mo(&self, dn: &str) -> Result<(), UcsmError> {
        let url = format!("{}/api/mo/{}", self.endpoint, dn);
        debug!("Deleting managed object {}", dn);

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsmError::Http)?;

        let status = response.status();
        if status == 404 {
            return Err(UcsmError::NotFound(format!(
                "Managed object {} not found",
                dn
            )));
        }

        if !status.is_success() && status != 204 {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsmError::Api(format!(
                "Failed to delete {}: {} - {}",
                dn, status, body
            )));
        }

        Ok(())
    }

    /// Close the session
    ///
    /// The token is invalidated server-side; the session cannot be reused
    /// afterwards.
    pub async fn logout(&self) -> Result<(), UcsmError> {
        let url = format!("{}/api/aaa/logout", self.endpoint);
        debug!("Logging out of UCS manager at {}", self.endpoint);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsmError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsmError::Api(format!(
                "Logout failed: {} - {}",
                status, body
            )));
        }

        Ok(())
    }

    /// Resolve the date/time service scope
    ///
    /// NTP providers are children of this object. The manager exposes
    /// exactly one instance.
    pub async fn datetime_service(&self) -> Result<CommDateTime, UcsmError> {
        let mut instances: Vec<CommDateTime> =
            self.resolve_class(CommDateTime::CLASS_ID).await?;
        if instances.is_empty() {
            return Err(UcsmError::NotFound(
                "Datetime service not found".to_string(),
            ));
        }
        Ok(instances.swap_remove(0))
    }

    /// Resolve the LAN cloud scope
    ///
    /// Fabric VLANs are children of this object. The manager exposes exactly
    /// one instance.
    pub async fn lan_cloud(&self) -> Result<FabricLanCloud, UcsmError> {
        let mut instances: Vec<FabricLanCloud> =
            self.resolve_class(FabricLanCloud::CLASS_ID).await?;
        if instances.is_empty() {
            return Err(UcsmError::NotFound("LAN cloud not found".to_string()));
        }
        Ok(instances.swap_remove(0))
    }

    /// Query NTP providers under the datetime service
    ///
    /// # Arguments
    /// * `parent` - the datetime service scope
    /// * `name` - optional exact-match filter on the provider name
    pub async fn query_ntp_providers(
        &self,
        parent: &CommDateTime,
        name: Option<&str>,
    ) -> Result<Vec<NtpProvider>, UcsmError> {
        let mut filters = Vec::new();
        if let Some(name) = name {
            filters.push(("name", name));
        }
        self.query_children(&parent.dn, NtpProvider::CLASS_ID, &filters)
            .await
    }

    /// Create an NTP provider under the datetime service
    pub async fn create_ntp_provider(
        &self,
        parent: &CommDateTime,
        name: &str,
    ) -> Result<NtpProvider, UcsmError> {
        self.create_child(
            &parent.dn,
            &serde_json::json!({
                "class": NtpProvider::CLASS_ID,
                "name": name,
            }),
        )
        .await
    }

    /// Delete an NTP provider by DN
    pub async fn delete_ntp_provider(&self, dn: &str) -> Result<(), UcsmError> {
        self.delete_mo(dn).await
    }

    /// Query fabric VLANs under the LAN cloud
    ///
    /// # Arguments
    /// * `parent` - the LAN cloud scope
    /// * `name` - optional exact-match filter on the VLAN name
    /// * `id` - optional exact-match filter on the VLAN id
    pub async fn query_vlans(
        &self,
        parent: &FabricLanCloud,
        name: Option<&str>,
        id: Option<u32>,
    ) -> Result<Vec<FabricVlan>, UcsmError> {
        let id_str = id.map(|id| id.to_string());
        let mut filters = Vec::new();
        if let Some(name) = name {
            filters.push(("name", name));
        }
        if let Some(id) = id_str.as_deref() {
            filters.push(("id", id));
        }
        self.query_children(&parent.dn, FabricVlan::CLASS_ID, &filters)
            .await
    }

    /// Create a fabric VLAN under the LAN cloud
    pub async fn create_vlan(
        &self,
        parent: &FabricLanCloud,
        name: &str,
        id: u32,
    ) -> Result<FabricVlan, UcsmError> {
        self.create_child(
            &parent.dn,
            &serde_json::json!({
                "class": FabricVlan::CLASS_ID,
                "name": name,
                "id": id,
            }),
        )
        .await
    }

    /// Delete a fabric VLAN by DN
    pub async fn delete_vlan(&self, dn: &str) -> Result<(), UcsmError> {
        self.delete_mo(dn).await
    }
}

#[async_trait::async_trait]
impl UcsSessionTrait for UcsSession {
    fn endpoint(&self) -> &str {
        self.endpoint()
    }

    async fn logout(&self) -> Result<(), UcsmError> {
        self.logout().await
    }

    async fn datetime_service(&self) -> Result<CommDateTime, UcsmError> {
        self.datetime_service().await
    }

    async fn lan_cloud(&self) -> Result<FabricLanCloud, UcsmError> {
        self.lan_cloud().await
    }

    async fn query_ntp_providers(
        &self,
        parent: &CommDateTime,
        name: Option<&str>,
    ) -> Result<Vec<NtpProvider>, UcsmError> {
        self.query_ntp_providers(parent, name).await
    }

    async fn create_ntp_provider(
        &self,
        parent: &CommDateTime,
        name: &str,
    ) -> Result<NtpProvider, UcsmError> {
        self.create_ntp_provider(parent, name).await
    }

    async fn delete_ntp_provider(&self, dn: &str) -> Result<(), UcsmError> {
        self.delete_ntp_provider(dn).await
    }

    async fn query_vlans(
        &self,
        parent: &FabricLanCloud,
        name: Option<&str>,
        id: Option<u32>,
    ) -> Result<Vec<FabricVlan>, UcsmError> {
        self.query_vlans(parent, name, id).await
    }

    async fn create_vlan(
        &self,
        parent: &FabricLanCloud,
        name: &str,
        id: u32,
    ) -> Result<FabricVlan, UcsmError> {
        self.create_vlan(parent, name, id).await
    }

    async fn delete_vlan(&self, dn: &str) -> Result<(), UcsmError> {
        self.delete_vlan(dn).await
    }
}
