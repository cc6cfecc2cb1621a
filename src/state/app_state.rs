//! Persisted app/preferences state for the signed-in member.
//!
//! DESIGN
//! ======
//! Identity and verification flags live apart from the session tokens so a
//! token refresh or expiry never rewrites the profile, and guards can reason
//! about "has a session" and "may see verified pages" separately.

#[cfg(test)]
#[path = "app_state_test.rs"]
mod app_state_test;

use serde::{Deserialize, Serialize};

use crate::net::types::MemberProfile;

/// The member shown in the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&MemberProfile> for User {
    fn from(profile: &MemberProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub user: Option<User>,
    pub email_verified: bool,
    /// The member chose to skip email certification for now.
    pub email_cert_bypassed: bool,
    /// The backend rejected our token; guards will clear the session.
    pub session_expired: bool,
    pub onboarding_completed: bool,
    pub hydrated: bool,
}

/// What is written to storage (`hydrated` is runtime-only).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedAppState {
    pub user: Option<User>,
    pub email_verified: bool,
    pub email_cert_bypassed: bool,
    pub session_expired: bool,
    pub onboarding_completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    Hydrated(Option<PersistedAppState>),
    ProfileLoaded(MemberProfile),
    EmailVerified,
    EmailCertBypassed,
    OnboardingCompleted,
    SessionExpired,
    /// The expiry was handled (session cleared, user sent to login).
    ExpiryAcknowledged,
    SignedOut,
}

impl AppState {
    /// Apply `action`, returning the next state.
    #[must_use]
    pub fn reduce(&self, action: AppAction) -> Self {
        let mut next = self.clone();
        match action {
            AppAction::Hydrated(saved) => {
                let saved = saved.unwrap_or_default();
                next = Self {
                    user: saved.user,
                    email_verified: saved.email_verified,
                    email_cert_bypassed: saved.email_cert_bypassed,
                    session_expired: saved.session_expired,
                    onboarding_completed: saved.onboarding_completed,
                    hydrated: true,
                };
            }
            AppAction::ProfileLoaded(profile) => {
                // A bypass belongs to the member who chose it.
                if self.user.as_ref().is_none_or(|u| u.id != profile.id) {
                    next.email_cert_bypassed = false;
                }
                next.user = Some(User::from(&profile));
                next.email_verified = profile.email_verified;
                next.onboarding_completed = profile.onboarding_completed;
                next.session_expired = false;
            }
            AppAction::EmailVerified => next.email_verified = true,
            AppAction::EmailCertBypassed => next.email_cert_bypassed = true,
            AppAction::OnboardingCompleted => next.onboarding_completed = true,
            AppAction::SessionExpired => next.session_expired = true,
            AppAction::ExpiryAcknowledged => next.session_expired = false,
            AppAction::SignedOut => {
                next = Self { hydrated: self.hydrated, ..Self::default() };
            }
        }
        next
    }

    /// Whether verified-only pages may render.
    pub fn email_cert_satisfied(&self) -> bool {
        self.email_verified || self.email_cert_bypassed
    }

    pub fn snapshot(&self) -> PersistedAppState {
        PersistedAppState {
            user: self.user.clone(),
            email_verified: self.email_verified,
            email_cert_bypassed: self.email_cert_bypassed,
            session_expired: self.session_expired,
            onboarding_completed: self.onboarding_completed,
        }
    }
}
