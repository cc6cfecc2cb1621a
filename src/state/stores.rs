//! Explicit container for the persisted session and app stores.
//!
//! SYSTEM CONTEXT
//! ==============
//! The composition root builds one `Stores`, calls `initialize` once in the
//! browser, and provides it through context. Every mutation runs a pure
//! reducer and then writes the new snapshot through the injected backend.
//!
//! ERROR HANDLING
//! ==============
//! Persistence is best-effort: a failed write is logged and the in-memory
//! state stays authoritative for the rest of the page's lifetime.

#[cfg(test)]
#[path = "stores_test.rs"]
mod stores_test;

use crate::config::StorageKeys;
use crate::error::StoreError;
use crate::net::types::{MemberProfile, TokenPair};
use crate::state::app_state::{AppAction, AppState};
use crate::state::session::{SessionAction, SessionState};
use crate::util::auth::GuardInput;
use crate::util::storage::{BrowserStorage, StorageBackend, load_json, save_json};

/// Stores as used by the running app.
pub type AppStores = Stores<BrowserStorage>;

#[derive(Debug)]
pub struct Stores<S> {
    session: SessionState,
    app: AppState,
    storage: S,
    keys: StorageKeys,
}

impl<S: StorageBackend> Stores<S> {
    /// Unhydrated stores over `storage`. Nothing is read until `initialize`.
    pub fn new(storage: S, keys: StorageKeys) -> Self {
        Self { session: SessionState::default(), app: AppState::default(), storage, keys }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_hydrated(&self) -> bool {
        self.session.hydrated && self.app.hydrated
    }

    /// Load both persisted snapshots and mark the stores hydrated.
    ///
    /// Hydration always completes. Corrupt entries are discarded and the
    /// matching store starts empty.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError::Corrupt` encountered so the caller can
    /// report it.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let mut first_error = None;

        let saved_session = load_json(&self.storage, &self.keys.session).unwrap_or_else(|e| {
            first_error.get_or_insert(e);
            None
        });
        let saved_app = load_json(&self.storage, &self.keys.app).unwrap_or_else(|e| {
            first_error.get_or_insert(e);
            None
        });

        self.session = self.session.reduce(SessionAction::Hydrated(saved_session));
        self.app = self.app.reduce(AppAction::Hydrated(saved_app));
        log::debug!(
            "stores hydrated: authenticated={} verified={}",
            self.session.is_authenticated(),
            self.app.email_verified
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn dispatch_session(&mut self, action: SessionAction) {
        self.session = self.session.reduce(action);
        match self.session.snapshot() {
            Some(snapshot) => {
                if let Err(e) = save_json(&self.storage, &self.keys.session, &snapshot) {
                    log::warn!("session not persisted: {e}");
                }
            }
            None => self.storage.remove(&self.keys.session),
        }
    }

    pub fn dispatch_app(&mut self, action: AppAction) {
        self.app = self.app.reduce(action);
        if let Err(e) = save_json(&self.storage, &self.keys.app, &self.app.snapshot()) {
            log::warn!("app state not persisted: {e}");
        }
    }

    pub fn sign_in(&mut self, tokens: TokenPair) {
        self.dispatch_session(SessionAction::SignedIn(tokens));
        if self.app.session_expired {
            self.dispatch_app(AppAction::ExpiryAcknowledged);
        }
    }

    pub fn load_profile(&mut self, profile: MemberProfile) {
        self.dispatch_app(AppAction::ProfileLoaded(profile));
    }

    /// Forget the session and everything tied to the member.
    pub fn logout(&mut self) {
        self.dispatch_session(SessionAction::Cleared);
        self.dispatch_app(AppAction::SignedOut);
    }

    /// Flag the session as rejected by the backend. Guards act on it.
    pub fn mark_session_expired(&mut self) {
        self.dispatch_app(AppAction::SessionExpired);
    }

    /// Drop the expired session; the login URL carries the expiry notice from here.
    pub fn clear_expired_session(&mut self) {
        self.dispatch_session(SessionAction::Cleared);
        self.dispatch_app(AppAction::ExpiryAcknowledged);
    }

    pub fn mark_email_verified(&mut self) {
        self.dispatch_app(AppAction::EmailVerified);
    }

    pub fn bypass_email_cert(&mut self) {
        self.dispatch_app(AppAction::EmailCertBypassed);
    }

    pub fn complete_onboarding(&mut self) {
        self.dispatch_app(AppAction::OnboardingCompleted);
    }

    /// Flags route guards evaluate.
    pub fn guard_input(&self) -> GuardInput {
        GuardInput {
            hydrated: self.is_hydrated(),
            authenticated: self.session.is_authenticated(),
            session_expired: self.app.session_expired,
            email_verified: self.app.email_verified,
            email_cert_bypassed: self.app.email_cert_bypassed,
        }
    }
}
