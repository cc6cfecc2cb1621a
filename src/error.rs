//! Error taxonomy for the login flow, API calls, and persisted stores.
//!
//! ERROR HANDLING
//! ==============
//! None of these are fatal. Flow errors become a single toast plus a redirect
//! to the login page; store errors are logged and the app keeps running with
//! whatever state it could recover.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

/// Failure talking to the backend REST API.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Whether the backend rejected the credentials we sent.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status(401))
    }
}

/// Failure anywhere in the OAuth login flow.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthFlowError {
    #[error("authorization code missing from callback")]
    MissingAuthorizationCode,
    #[error("token exchange failed: {0}")]
    TokenExchange(ApiError),
    #[error("profile fetch failed: {0}")]
    ProfileFetch(ApiError),
    #[error("oauth state is not a valid token")]
    MalformedOAuthState,
    #[error("unsafe redirect target: {0}")]
    UnsafeRedirectTarget(String),
}

impl AuthFlowError {
    /// Text shown to the user in the error toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingAuthorizationCode => "Login was cancelled or did not complete. Please try again.",
            Self::TokenExchange(_) => "We couldn't sign you in. Please try again.",
            Self::ProfileFetch(_) => "We couldn't load your profile. Please sign in again.",
            Self::MalformedOAuthState | Self::UnsafeRedirectTarget(_) => "Something went wrong during login.",
        }
    }
}

/// Failure reading or writing a persisted store.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("failed to serialize `{key}`: {message}")]
    Serialize { key: String, message: String },
    #[error("discarded corrupt entry `{key}`")]
    Corrupt { key: String },
    #[error("storage unavailable")]
    Unavailable,
}
