//! Route-guard decisions and the redirect effect shared by guard components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards are re-evaluated whenever the stores change. The decision itself is
//! a pure function of store flags and the current location so every guard
//! applies identical redirect behavior; only the effect touches the router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::config::RouteConfig;
use crate::state::stores::{AppStores, Stores};
use crate::util::oauth_state::resolve_from;
use crate::util::storage::StorageBackend;

/// Store flags a guard looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardInput {
    pub hydrated: bool,
    pub authenticated: bool,
    pub session_expired: bool,
    pub email_verified: bool,
    pub email_cert_bypassed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Signed-out pages such as login; signed-in members are sent onward.
    Public,
    /// Requires a session.
    Protected,
    /// Requires a session and a certified (or bypassed) email.
    Verified,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Stores are still hydrating.
    Loading,
    Render,
    Redirect {
        to: String,
        /// Drop the expired session before navigating.
        clear_session: bool,
    },
}

impl GuardDecision {
    fn redirect(to: String) -> Self {
        Self::Redirect { to, clear_session: false }
    }
}

/// Decide what a guard of `kind` does at `location`.
///
/// `from` is the raw `from` query marker, only consulted by public guards.
pub fn evaluate_guard(
    kind: GuardKind,
    input: &GuardInput,
    location: &str,
    from: Option<&str>,
    routes: &RouteConfig,
) -> GuardDecision {
    if !input.hydrated {
        return GuardDecision::Loading;
    }

    if kind == GuardKind::Public {
        if input.authenticated {
            let target = resolve_from(from, &routes.default);
            if is_auth_route(&target, routes) {
                return GuardDecision::redirect(routes.default.clone());
            }
            return GuardDecision::redirect(target);
        }
        return GuardDecision::Render;
    }

    if input.session_expired {
        return GuardDecision::Redirect { to: expired_login_path(&routes.login), clear_session: true };
    }
    if !input.authenticated {
        return GuardDecision::redirect(path_with_from(&routes.login, location, &routes.default));
    }
    if kind == GuardKind::Verified && !(input.email_verified || input.email_cert_bypassed) {
        return GuardDecision::redirect(path_with_from(&routes.email_cert, location, &routes.default));
    }
    GuardDecision::Render
}

/// Login and OAuth callback pages, which a signed-in member must not be sent back to.
fn is_auth_route(target: &str, routes: &RouteConfig) -> bool {
    let path = target.split(['?', '#']).next().unwrap_or(target);
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    path == routes.login || (path.starts_with("/auth/") && path.ends_with("/callback"))
}

/// `target?from=<location>`, with `location` sanitized first.
pub fn path_with_from(target: &str, location: &str, fallback: &str) -> String {
    let from = resolve_from(Some(location), fallback);
    format!("{target}?from={}", urlencoding::encode(&from))
}

pub fn expired_login_path(login: &str) -> String {
    format!("{login}?expired=1")
}

/// Join a router pathname and search string into one root-relative location.
pub fn join_location(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// Act on one guard decision: returns where to navigate, if anywhere.
///
/// `redirected` latches after the first redirect. Clearing an expired session
/// re-triggers the decision, and the follow-up "no session" redirect must not
/// replace the `expired` marker.
pub fn apply_redirect<S: StorageBackend>(
    decision: &GuardDecision,
    redirected: &mut bool,
    stores: &mut Stores<S>,
) -> Option<String> {
    let GuardDecision::Redirect { to, clear_session } = decision else {
        return None;
    };
    if *redirected {
        return None;
    }
    *redirected = true;
    if *clear_session {
        stores.clear_expired_session();
    }
    Some(to.clone())
}

/// Navigate whenever `decision` turns into a redirect, at most once per guard.
pub fn install_guard_redirect<F>(decision: Memo<GuardDecision>, stores: RwSignal<AppStores>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let redirected = StoredValue::new(false);
    Effect::new(move || {
        let decision = decision.get();
        if !matches!(decision, GuardDecision::Redirect { .. }) || redirected.get_value() {
            return;
        }
        let mut latch = false;
        let target = stores.try_update(|s| apply_redirect(&decision, &mut latch, s)).flatten();
        redirected.set_value(latch);
        if let Some(to) = target {
            log::debug!("guard redirect to {to}");
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
