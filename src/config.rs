//! Client configuration baked in from build-time environment variables.
//!
//! WASM bundles have no process environment at runtime, so values are read
//! with `option_env!` when the crate is compiled and fall back to defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::net::types::Provider;

pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_TOAST_TIMEOUT_MS: u32 = 4_000;

/// Application paths the auth flow navigates between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub login: String,
    /// Where a signed-in user lands when no safe "from" target exists.
    pub default: String,
    pub email_cert: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: "/login".to_owned(),
            default: "/home".to_owned(),
            email_cert: "/email-cert".to_owned(),
        }
    }
}

/// localStorage keys for the persisted stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub session: String,
    pub app: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { session: "matchup.session".to_owned(), app: "matchup.app".to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for REST calls; empty means same-origin.
    pub api_base_url: String,
    pub routes: RouteConfig,
    pub storage: StorageKeys,
    /// Whether the email-certification page offers a "skip for now" action.
    pub allow_email_cert_bypass: bool,
    pub toast_timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            routes: RouteConfig::default(),
            storage: StorageKeys::default(),
            allow_email_cert_bypass: false,
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `MATCHUP_API_BASE_URL`: REST prefix (default same-origin)
    /// - `MATCHUP_DEFAULT_PATH`: post-login landing path (default `/home`)
    /// - `MATCHUP_ALLOW_EMAIL_CERT_BYPASS`: boolean flag (default off)
    /// - `MATCHUP_TOAST_TIMEOUT_MS`: default 4000
    pub fn from_build_env() -> Self {
        Self::with_overrides(|key| {
            match key {
                "MATCHUP_API_BASE_URL" => option_env!("MATCHUP_API_BASE_URL"),
                "MATCHUP_DEFAULT_PATH" => option_env!("MATCHUP_DEFAULT_PATH"),
                "MATCHUP_ALLOW_EMAIL_CERT_BYPASS" => option_env!("MATCHUP_ALLOW_EMAIL_CERT_BYPASS"),
                "MATCHUP_TOAST_TIMEOUT_MS" => option_env!("MATCHUP_TOAST_TIMEOUT_MS"),
                _ => None,
            }
            .map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup, applying defaults for
    /// anything missing or unparseable.
    pub fn with_overrides<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup("MATCHUP_API_BASE_URL") {
            config.api_base_url = base.trim().trim_end_matches('/').to_owned();
        }
        if let Some(path) = lookup("MATCHUP_DEFAULT_PATH") {
            let path = path.trim();
            if crate::util::oauth_state::is_safe_path(path) {
                config.routes.default = path.to_owned();
            } else {
                log::warn!("ignoring unsafe MATCHUP_DEFAULT_PATH: {path}");
            }
        }
        if let Some(flag) = lookup("MATCHUP_ALLOW_EMAIL_CERT_BYPASS").as_deref().and_then(parse_flag) {
            config.allow_email_cert_bypass = flag;
        }
        if let Some(ms) = lookup("MATCHUP_TOAST_TIMEOUT_MS").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.toast_timeout_ms = ms;
        }
        config
    }

    /// Absolute redirect URI registered with the identity provider.
    pub fn redirect_uri(&self, origin: &str, provider: Provider) -> String {
        format!("{}/auth/{}/callback", origin.trim_end_matches('/'), provider.slug())
    }
}

/// Lenient boolean parsing for config flags.
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
