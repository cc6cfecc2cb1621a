//! Login page offering social sign-in.
//!
//! The `from` query marker (set by route guards) is sanitized and packed into
//! the OAuth `state` so the callback can send the member back where they were.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::config::ClientConfig;
use crate::net::api::HttpAuthApi;
use crate::net::types::Provider;
use crate::state::toast::ToastState;
use crate::util::oauth_state::{encode_state, resolve_from};

/// Whether the login URL carries the `expired=1` marker.
fn is_expired_marker(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("1" | "true"))
}

/// OAuth state for the post-login destination.
fn login_state(from: Option<&str>, default: &str) -> String {
    encode_state(&resolve_from(from, default))
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_url_failed_message(provider: Provider) -> String {
    format!("Couldn't start {} login. Please try again.", provider.slug())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<HttpAuthApi>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let query = use_query_map();
    let busy = RwSignal::new(false);

    let expired = move || query.with(|q| is_expired_marker(q.get("expired").as_deref()));

    let start_login = move |provider: Provider| {
        if busy.get_untracked() {
            return;
        }
        let state = query.with_untracked(|q| login_state(q.get("from").as_deref(), &config.routes.default));
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                use crate::net::api::{AuthApi, authorize_url_with_state};
                use crate::state::toast::Notifier;

                match api.fetch_auth_url(provider).await {
                    Ok(auth_url) => {
                        let target = authorize_url_with_state(&auth_url, &state);
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&target);
                        }
                    }
                    Err(e) => {
                        log::warn!("auth url request failed for {}: {e}", provider.slug());
                        toasts.notify_error(&auth_url_failed_message(provider));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (state, &api, toasts);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Matchup"</h1>
                <p class="login-card__subtitle">"Find a game, fill a team."</p>
                <Show when=expired>
                    <p class="login-message login-message--warning">
                        "Your session expired. Please sign in again."
                    </p>
                </Show>
                {Provider::ALL
                    .into_iter()
                    .map(|provider| {
                        let start_login = start_login.clone();
                        view! {
                            <button
                                class=format!("login-button login-button--{}", provider.slug())
                                disabled=move || busy.get()
                                on:click=move |_| start_login(provider)
                            >
                                {provider.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
