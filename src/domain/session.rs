//! Placeholder sign-in against one hardcoded demo account.
//!
//! This is not a security boundary: credentials are compared in plain text
//! and the persisted record carries no expiry. Storage is injected through
//! [`SessionRepository`] so the store can run against a file or memory.

use super::errors::SessionError;
use super::models::SessionUser;
use std::sync::{Arc, Mutex};

pub const SESSION_STORAGE_KEY: &str = "mockAuth";

pub const DEMO_EMAIL: &str = "test@example.com";
const DEMO_PASSWORD: &str = "password123";
const DEMO_NAME: &str = "Demo User";

pub fn demo_user() -> SessionUser {
    SessionUser {
        email: DEMO_EMAIL.to_string(),
        name: DEMO_NAME.to_string(),
    }
}

pub trait SessionRepository: Send {
    fn load(&self) -> Result<Option<SessionUser>, SessionError>;
    fn save(&mut self, user: &SessionUser) -> Result<(), SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
}

/// Keeps the record in memory. Clones share the same record, which lets a
/// test hand one clone to a store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionRepository {
    record: Arc<Mutex<Option<SessionUser>>>,
}

impl MemorySessionRepository {
    pub fn stored(&self) -> Option<SessionUser> {
        self.record.lock().map(|record| record.clone()).unwrap_or(None)
    }
}

impl SessionRepository for MemorySessionRepository {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        let record = self.record.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(record.clone())
    }

    fn save(&mut self, user: &SessionUser) -> Result<(), SessionError> {
        let mut record = self.record.lock().map_err(|_| SessionError::Poisoned)?;
        *record = Some(user.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        let mut record = self.record.lock().map_err(|_| SessionError::Poisoned)?;
        *record = None;
        Ok(())
    }
}

pub struct SessionStore {
    repository: Box<dyn SessionRepository>,
    user: Option<SessionUser>,
}

impl SessionStore {
    pub fn new(repository: Box<dyn SessionRepository>) -> Self {
        Self {
            repository,
            user: None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// `Ok(false)` on a credential mismatch; wrong email and wrong password
    /// are indistinguishable.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool, SessionError> {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            tracing::info!("login rejected");
            return Ok(false);
        }
        let user = demo_user();
        self.repository.save(&user)?;
        tracing::info!(email = %user.email, "login accepted");
        self.user = Some(user);
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.repository.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Adopts a persisted record, if any. Called once at startup.
    pub fn restore(&mut self) -> Result<Option<&SessionUser>, SessionError> {
        self.user = self.repository.load()?;
        if let Some(user) = &self.user {
            tracing::info!(email = %user.email, "session restored");
        }
        Ok(self.user.as_ref())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}
