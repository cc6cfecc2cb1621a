//! Persisted session tokens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written by the OAuth callback, cleared on logout or expiry, and read by
//! route guards. Only the tokens are persisted; `hydrated` is runtime state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::net::types::TokenPair;

/// Session tokens plus the hydration flag guards wait on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub hydrated: bool,
}

/// What is written to storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// Storage finished loading; `None` when nothing was saved.
    Hydrated(Option<PersistedSession>),
    SignedIn(TokenPair),
    Cleared,
}

impl SessionState {
    /// Apply `action`, returning the next state.
    #[must_use]
    pub fn reduce(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::Hydrated(saved) => {
                let saved = saved.unwrap_or_default();
                Self {
                    access_token: saved.access_token.filter(|t| !t.is_empty()),
                    refresh_token: saved.refresh_token.filter(|t| !t.is_empty()),
                    hydrated: true,
                }
            }
            SessionAction::SignedIn(tokens) => Self {
                access_token: Some(tokens.access_token),
                refresh_token: tokens.refresh_token,
                hydrated: self.hydrated,
            },
            SessionAction::Cleared => Self { access_token: None, refresh_token: None, hydrated: self.hydrated },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Storage form, or `None` when there is nothing worth keeping.
    pub fn snapshot(&self) -> Option<PersistedSession> {
        self.access_token.as_ref().map(|token| PersistedSession {
            access_token: Some(token.clone()),
            refresh_token: self.refresh_token.clone(),
        })
    }
}
