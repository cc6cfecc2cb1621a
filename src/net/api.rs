//! REST API helpers for the login flow.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with `ApiError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get typed `Result`s so the callback flow can turn any transport,
//! status, or decode failure into one toast and a redirect to login.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{MemberProfile, Provider, TokenPair};
use crate::error::ApiError;

/// Backend calls the auth flow depends on.
///
/// Pages hold an `HttpAuthApi`; tests substitute fakes.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Ask the backend for the provider's authorization URL.
    async fn fetch_auth_url(&self, provider: Provider) -> Result<String, ApiError>;

    /// Trade an authorization code for a session token pair.
    async fn exchange_code(&self, provider: Provider, code: &str, redirect_uri: &str) -> Result<TokenPair, ApiError>;

    /// Load the signed-in member's profile.
    async fn fetch_profile(&self, access_token: &str) -> Result<MemberProfile, ApiError>;
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_url_endpoint(base: &str, provider: Provider) -> String {
    format!("{base}/api/v1/auth/{}", provider.slug())
}

#[cfg(any(test, feature = "hydrate"))]
fn callback_endpoint(base: &str, provider: Provider, code: &str, redirect_uri: &str) -> String {
    format!(
        "{base}/api/v1/auth/{}/callback?code={}&redirectUri={}",
        provider.slug(),
        urlencoding::encode(code),
        urlencoding::encode(redirect_uri)
    )
}

#[cfg(any(test, feature = "hydrate"))]
fn profile_endpoint(base: &str) -> String {
    format!("{base}/api/v1/members/me/profile")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

/// Append the OAuth `state` parameter to a provider authorization URL.
pub fn authorize_url_with_state(auth_url: &str, state: &str) -> String {
    let (base, fragment) = match auth_url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (auth_url, None),
    };
    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };
    let mut url = format!("{base}{separator}state={}", urlencoding::encode(state));
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// `gloo-net` implementation rooted at `base_url` (empty for same-origin).
#[derive(Clone, Debug, Default)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str, token: Option<&str>) -> Result<T, ApiError> {
    let mut request = gloo_net::http::Request::get(url).header("Accept", "application/json");
    if let Some(token) = token {
        request = request.header("Authorization", &bearer(token));
    }
    let resp = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl AuthApi for HttpAuthApi {
    async fn fetch_auth_url(&self, provider: Provider) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = auth_url_endpoint(&self.base_url, provider);
            let body: super::types::AuthUrlResponse = get_json(&url, None).await?;
            Ok(body.auth_url)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = provider;
            Err(ApiError::Unavailable)
        }
    }

    async fn exchange_code(&self, provider: Provider, code: &str, redirect_uri: &str) -> Result<TokenPair, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = callback_endpoint(&self.base_url, provider, code, redirect_uri);
            get_json(&url, None).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (provider, code, redirect_uri);
            Err(ApiError::Unavailable)
        }
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<MemberProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            get_json(&profile_endpoint(&self.base_url), Some(access_token)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access_token;
            Err(ApiError::Unavailable)
        }
    }
}
