//! Email-certification gate shown to signed-in members without a verified email.
//!
//! SYSTEM CONTEXT
//! ==============
//! The verified guard sends members here with a `from` marker. Once the
//! backend reports the email as verified (or the member skips, when allowed)
//! they continue to that sanitized destination.

#[cfg(test)]
#[path = "email_cert_test.rs"]
mod email_cert_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::api::HttpAuthApi;
use crate::net::types::MemberProfile;
use crate::state::app_state::AppState;
use crate::state::stores::{AppStores, Stores};
use crate::state::toast::ToastState;
use crate::util::oauth_state::resolve_from;
use crate::util::storage::StorageBackend;

/// Result of asking the backend whether the email is now verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecheckOutcome {
    Verified,
    StillUnverified,
    /// The token was rejected; guards take over from here.
    Expired,
    Failed(ApiError),
}

/// Apply a profile re-fetch to the stores.
pub fn apply_recheck<S: StorageBackend>(
    stores: &mut Stores<S>,
    result: Result<MemberProfile, ApiError>,
) -> RecheckOutcome {
    match result {
        Ok(profile) => {
            let verified = profile.email_verified;
            stores.load_profile(profile);
            if verified {
                RecheckOutcome::Verified
            } else {
                RecheckOutcome::StillUnverified
            }
        }
        Err(e) if e.is_unauthorized() => {
            stores.mark_session_expired();
            RecheckOutcome::Expired
        }
        Err(e) => RecheckOutcome::Failed(e),
    }
}

/// Where to go once certification is satisfied, if it is.
fn next_path(app: &AppState, from: Option<&str>, default: &str) -> Option<String> {
    app.email_cert_satisfied().then(|| resolve_from(from, default))
}

#[component]
pub fn EmailCertPage() -> impl IntoView {
    let stores = expect_context::<RwSignal<AppStores>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<HttpAuthApi>();
    let query = use_query_map();
    let navigate = use_navigate();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let default_path = config.routes.default.clone();
    let allow_bypass = config.allow_email_cert_bypass;
    Effect::new(move || {
        let from = query.with(|q| q.get("from"));
        if let Some(next) = stores.with(|s| next_path(s.app(), from.as_deref(), &default_path)) {
            navigate(&next, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let email = move || {
        stores.with(|s| {
            s.app()
                .user
                .as_ref()
                .and_then(|u| u.email.clone())
                .unwrap_or_else(|| "your email".to_owned())
        })
    };

    let on_recheck = move |_| {
        if busy.get_untracked() {
            return;
        }
        let Some(token) = stores.with_untracked(|s| s.session().access_token.clone()) else {
            return;
        };
        busy.set(true);
        info.set("Checking...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                use crate::net::api::AuthApi;
                use crate::state::toast::Notifier;

                let result = api.fetch_profile(&token).await;
                let outcome = stores.try_update(|s| apply_recheck(s, result));
                match outcome {
                    Some(RecheckOutcome::StillUnverified) => {
                        info.set("Not verified yet. Check your inbox for the link.".to_owned());
                    }
                    Some(RecheckOutcome::Failed(e)) => {
                        log::warn!("email recheck failed: {e}");
                        info.set(String::new());
                        toasts.notify_error("Couldn't check your email status. Please try again.");
                    }
                    _ => info.set(String::new()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, &api, toasts);
        }
    };

    let on_skip = move |_| stores.update(AppStores::bypass_email_cert);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Verify your email"</h1>
                <p class="login-card__subtitle">
                    "We sent a verification link to " <strong>{email}</strong> "."
                </p>
                <button class="login-button" disabled=move || busy.get() on:click=on_recheck>
                    "I've verified my email"
                </button>
                <Show when=move || allow_bypass>
                    <button class="login-button login-button--secondary" on:click=on_skip>
                        "Skip for now"
                    </button>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
