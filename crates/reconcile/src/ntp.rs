//! NTP provider convergence
//!
//! Desired items are server addresses (IP addresses or hostnames/FQDNs),
//! matched against the provider name under the datetime service.

use crate::{converge, ConvergeError, DesiredState, ManagedKind, ReconcileReport};
use ucsm_client::{CommDateTime, UcsSessionTrait, UcsmError};

/// NTP providers under the datetime service
pub struct NtpProviders<'a> {
    session: &'a dyn UcsSessionTrait,
    scope: CommDateTime,
}

impl<'a> NtpProviders<'a> {
    /// Resolve the datetime service scope the providers live under
    ///
    /// One scope query per invocation, before the item loop.
    pub async fn resolve(session: &'a dyn UcsSessionTrait) -> Result<Self, ConvergeError> {
        let scope = session
            .datetime_service()
            .await
            .map_err(|e| ConvergeError::Scope {
                scope: "datetime service",
                source: e,
            })?;
        Ok(Self { session, scope })
    }
}

#[async_trait::async_trait]
impl ManagedKind for NtpProviders<'_> {
    type Item = String;

    fn identity(item: &String) -> String {
        item.clone()
    }

    async fn find(&self, item: &String) -> Result<Vec<String>, UcsmError> {
        let providers = self
            .session
            .query_ntp_providers(&self.scope, Some(item))
            .await?;
        Ok(providers.into_iter().map(|p| p.dn).collect())
    }

    async fn create(&self, item: &String) -> Result<(), UcsmError> {
        self.session
            .create_ntp_provider(&self.scope, item)
            .await
            .map(|_| ())
    }

    async fn remove(&self, dn: &str) -> Result<(), UcsmError> {
        self.session.delete_ntp_provider(dn).await
    }
}

/// Converge the device's NTP providers to the desired server list
pub async fn apply(
    session: &dyn UcsSessionTrait,
    servers: &[String],
    state: DesiredState,
) -> Result<ReconcileReport, ConvergeError> {
    let providers = NtpProviders::resolve(session).await?;
    converge(&providers, servers, state).await
}
