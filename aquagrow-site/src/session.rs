//! Admin sign-in and the session-gated console.
//!
//! The gate checks a single configured credential pair. It is a
//! placeholder for real authentication, so it only decides who may
//! reach the console; the record store itself trusts its callers.

use aquagrow_store::{
    Collection, CompanyInfo, Farmer, Investor, RecordStore, StoreSummary, TeamMember,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AdminConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Proof of a successful sign-in. Only [`AdminGate::login`] creates one.
#[derive(Debug)]
pub struct AdminSession {
    username: String,
    started_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Credential check in front of the admin console
pub struct AdminGate {
    credentials: AdminConfig,
}

impl AdminGate {
    pub fn new(credentials: AdminConfig) -> Self {
        if credentials.is_default() {
            warn!("Admin console is using the default credentials");
        }
        Self { credentials }
    }

    /// Exchange a username and password for a session.
    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        if username != self.credentials.username || password != self.credentials.password {
            warn!(username = %username, "Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!(username = %username, "Admin signed in");
        Ok(AdminSession {
            username: username.to_string(),
            started_at: Utc::now(),
        })
    }

    /// End a session. The session is consumed so it cannot be reused.
    pub fn logout(&self, session: AdminSession) {
        info!(
            username = %session.username,
            duration_secs = (Utc::now() - session.started_at).num_seconds(),
            "Admin signed out"
        );
    }
}

/// Record management, reachable only with a live session.
#[derive(Clone)]
pub struct AdminConsole {
    store: Arc<RecordStore>,
}

impl AdminConsole {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn farmers<'a>(&'a self, _session: &AdminSession) -> Collection<'a, Farmer> {
        self.store.farmers()
    }

    pub fn investors<'a>(&'a self, _session: &AdminSession) -> Collection<'a, Investor> {
        self.store.investors()
    }

    pub fn team_members<'a>(&'a self, _session: &AdminSession) -> Collection<'a, TeamMember> {
        self.store.team_members()
    }

    pub async fn company_info(&self, _session: &AdminSession) -> aquagrow_store::Result<CompanyInfo> {
        self.store.company_info().await
    }

    pub async fn replace_company_info(
        &self,
        session: &AdminSession,
        info: CompanyInfo,
    ) -> aquagrow_store::Result<CompanyInfo> {
        info!(username = %session.username, "Replacing company info");
        self.store.replace_company_info(info).await
    }

    pub async fn summary(&self, _session: &AdminSession) -> aquagrow_store::Result<StoreSummary> {
        self.store.summary().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquagrow_store::{FarmerStatus, MemoryStorage};

    fn gate() -> AdminGate {
        AdminGate::new(AdminConfig::default())
    }

    #[test]
    fn test_login_with_configured_credentials() {
        let session = gate().login("admin", "password").unwrap();
        assert_eq!(session.username(), "admin");
        assert!(session.started_at() <= Utc::now());
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        assert_eq!(
            gate().login("admin", "hunter2").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(gate().login("Admin", "password").is_err());
    }

    #[test]
    fn test_custom_credentials() {
        let gate = AdminGate::new(AdminConfig {
            username: "ops".to_string(),
            password: "s3cret".to_string(),
        });
        assert!(gate.login("admin", "password").is_err());
        assert!(gate.login("ops", "s3cret").is_ok());
    }

    #[tokio::test]
    async fn test_console_manages_records() {
        let console = AdminConsole::new(Arc::new(RecordStore::new(Arc::new(MemoryStorage::new()))));
        let gate = gate();
        let session = gate.login("admin", "password").unwrap();

        let farmers = console.farmers(&session).list().await.unwrap();
        assert_eq!(farmers.len(), 3);

        let mut farmer = farmers[0].clone();
        farmer.status = FarmerStatus::Rejected;
        console.farmers(&session).update(farmer.clone()).await.unwrap();
        assert_eq!(
            console.farmers(&session).get(&farmer.id).await.unwrap().status,
            FarmerStatus::Rejected
        );

        gate.logout(session);
    }
}
