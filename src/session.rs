//! Session store: the single owner of "who is logged in".
//!
//! The session is written to storage on every change and read back once at
//! startup. There is no expiry or refresh; a token stays in use until the
//! user logs out or the server rejects it.

use crate::api::AuthRepository;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::storage::KeyValueStorage;
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "auth-storage";
const STORAGE_VERSION: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub role: String,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            token: resp.token,
            email: resp.email,
            role: resp.role,
        }
    }
}

/// What the current visitor may do; checked by the route guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub authenticated: bool,
    pub admin: bool,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct PersistedState {
    #[serde(default)]
    user: Option<Session>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct PersistedEnvelope {
    #[serde(default)]
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

pub struct SessionStore {
    auth: Box<dyn AuthRepository>,
    storage: Box<dyn KeyValueStorage>,
    admin_role: String,
    session: Option<Session>,
    errors: Vec<String>,
}

impl SessionStore {
    /// Build the store and rehydrate any session left in storage.
    /// Unreadable entries leave the visitor logged out.
    pub fn hydrate(
        auth: Box<dyn AuthRepository>,
        storage: Box<dyn KeyValueStorage>,
        admin_role: &str,
    ) -> Self {
        let mut store = Self {
            auth,
            storage,
            admin_role: admin_role.to_string(),
            session: None,
            errors: Vec::new(),
        };

        match store.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedEnvelope>(&raw) {
                Ok(envelope) => store.session = envelope.state.user,
                Err(e) => store
                    .errors
                    .push(format!("ignoring stored session: {}", e)),
            },
            Ok(None) => {}
            Err(e) => store
                .errors
                .push(format!("failed to read stored session: {:#}", e)),
        }

        store
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.role == self.admin_role)
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            authenticated: self.is_authenticated(),
            admin: self.is_admin(),
        }
    }

    /// Log in through the auth repository. On failure the previous session
    /// (if any) is left exactly as it was.
    pub fn login(&mut self, credentials: &LoginRequest) -> Result<(), ApiError> {
        let resp = self.auth.login(credentials)?;
        self.replace(Some(resp.into()));
        Ok(())
    }

    /// Register and log in as the new account; same failure rule as `login`
    pub fn register(&mut self, data: &RegisterRequest) -> Result<(), ApiError> {
        let resp = self.auth.register(data)?;
        self.replace(Some(resp.into()));
        Ok(())
    }

    /// Clear the session unconditionally
    pub fn logout(&mut self) {
        self.replace(None);
    }

    /// Drain persistence problems recorded since the last call
    pub fn take_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }

    fn replace(&mut self, session: Option<Session>) {
        self.session = session;
        if let Err(e) = self.persist() {
            let message = if self.session.is_some() {
                format!("failed to persist session: {:#}", e)
            } else {
                format!(
                    "failed to clear stored session, still signed in on disk: {:#}",
                    e
                )
            };
            self.errors.push(message);
        }
    }

    fn persist(&self) -> anyhow::Result<()> {
        if self.session.is_some() {
            return self.write_envelope();
        }
        match self.storage.remove(STORAGE_KEY) {
            Ok(()) => Ok(()),
            // An envelope without a user hydrates as logged out
            Err(e) => self
                .write_envelope()
                .with_context(|| format!("remove failed ({:#})", e)),
        }
    }

    fn write_envelope(&self) -> anyhow::Result<()> {
        let envelope = PersistedEnvelope {
            state: PersistedState {
                user: self.session.clone(),
            },
            version: STORAGE_VERSION,
        };
        self.storage
            .set(STORAGE_KEY, &serde_json::to_string(&envelope)?)
    }
}
