//! OAuth callback page: trade the provider's code for a session and move on.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider redirects here with `code` and the `state` the login
//! page minted. The flow is split so the async half never holds a borrow of
//! the stores signal across an await:
//!
//! - `fetch_login_grant` performs the exchange and profile fetch.
//! - `finish_callback` applies the outcome to the stores and picks the
//!   navigation target.
//!
//! `handle_oauth_callback` composes both for callers that own their stores.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is reported once through the `Notifier` and resolves to the
//! login path. A bad `state` is not an error; it falls back to the default
//! landing path silently.

#[cfg(test)]
#[path = "auth_callback_test.rs"]
mod auth_callback_test;

use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};

use crate::config::{ClientConfig, RouteConfig};
use crate::error::AuthFlowError;
use crate::net::api::{AuthApi, HttpAuthApi};
use crate::net::types::{MemberProfile, Provider, TokenPair};
use crate::state::stores::{AppStores, Stores};
use crate::state::toast::{Notifier, ToastState};
use crate::util::oauth_state::decode_state;
use crate::util::storage::StorageBackend;

/// Query parameters the provider sends back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Everything a successful exchange produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginGrant {
    pub tokens: TokenPair,
    pub profile: MemberProfile,
}

/// One-shot latch: the first `try_acquire` wins, later calls lose.
#[derive(Debug, Default)]
pub struct CallbackLatch(AtomicBool);

impl CallbackLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn try_acquire(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }
}

/// Guards the callback effect so it runs at most once per page load.
static CALLBACK_ONCE: CallbackLatch = CallbackLatch::new();

/// Exchange `code` and fetch the member profile.
///
/// # Errors
///
/// `MissingAuthorizationCode` when `code` is absent or blank (no request is
/// made), otherwise `TokenExchange` or `ProfileFetch` wrapping the API error.
pub async fn fetch_login_grant<A: AuthApi>(
    api: &A,
    provider: Provider,
    code: Option<&str>,
    redirect_uri: &str,
) -> Result<LoginGrant, AuthFlowError> {
    let code = code
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(AuthFlowError::MissingAuthorizationCode)?;
    let tokens = api
        .exchange_code(provider, code, redirect_uri)
        .await
        .map_err(AuthFlowError::TokenExchange)?;
    let profile = api
        .fetch_profile(&tokens.access_token)
        .await
        .map_err(AuthFlowError::ProfileFetch)?;
    Ok(LoginGrant { tokens, profile })
}

/// Apply a grant outcome to `stores` and return where to navigate.
pub fn finish_callback<S: StorageBackend>(
    stores: &mut Stores<S>,
    outcome: Result<LoginGrant, AuthFlowError>,
    state: Option<&str>,
    routes: &RouteConfig,
    notifier: &impl Notifier,
) -> String {
    match outcome {
        Ok(LoginGrant { tokens, profile }) => {
            stores.sign_in(tokens);
            stores.load_profile(profile);
            decode_state(state, &routes.default)
        }
        Err(e) => {
            log::warn!("oauth callback failed: {e}");
            if matches!(e, AuthFlowError::ProfileFetch(_)) {
                stores.logout();
            }
            notifier.notify_error(e.user_message());
            routes.login.clone()
        }
    }
}

/// Run the whole callback against stores the caller owns.
///
/// Tokens and profile are stored together on success. A failed profile fetch
/// leaves the stores signed out.
pub async fn handle_oauth_callback<A: AuthApi, S: StorageBackend>(
    api: &A,
    stores: &mut Stores<S>,
    provider: Provider,
    params: &CallbackParams,
    config: &ClientConfig,
    origin: &str,
    notifier: &impl Notifier,
) -> String {
    let redirect_uri = config.redirect_uri(origin, provider);
    let outcome = fetch_login_grant(api, provider, params.code.as_deref(), &redirect_uri).await;
    finish_callback(stores, outcome, params.state.as_deref(), &config.routes, notifier)
}

#[cfg(feature = "hydrate")]
fn window_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Callback route body. Shows a spinner while the exchange runs.
#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let stores = expect_context::<RwSignal<AppStores>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<HttpAuthApi>();
    let query = use_query_map();
    let params = use_params_map();
    let navigate = use_navigate();

    Effect::new(move || {
        if !CALLBACK_ONCE.try_acquire() {
            return;
        }
        let query = query.get_untracked();
        let callback = CallbackParams { code: query.get("code"), state: query.get("state") };
        let provider = params
            .get_untracked()
            .get("provider")
            .and_then(|slug| Provider::from_slug(&slug))
            .unwrap_or(Provider::Kakao);
        let config = config.clone();
        let api = api.clone();
        let navigate = navigate.clone();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let redirect_uri = config.redirect_uri(&window_origin(), provider);
            let outcome = fetch_login_grant(&api, provider, callback.code.as_deref(), &redirect_uri).await;
            let target = stores
                .try_update(|s| finish_callback(s, outcome, callback.state.as_deref(), &config.routes, &toasts))
                .unwrap_or_else(|| config.routes.login.clone());
            navigate(
                &target,
                leptos_router::NavigateOptions { replace: true, ..Default::default() },
            );
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (callback, provider, config, api, navigate, stores, toasts);
        }
    });

    view! {
        <div class="callback-page">
            <p class="callback-page__message">"Signing you in..."</p>
        </div>
    }
}
