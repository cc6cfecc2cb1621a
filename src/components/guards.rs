//! Route guard wrappers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wrap a page in one of these inside the route table. Each renders a loading
//! placeholder until the stores hydrate, then either its children or nothing
//! while the redirect effect navigates away.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::config::ClientConfig;
use crate::state::stores::AppStores;
use crate::util::auth::{GuardDecision, GuardKind, evaluate_guard, install_guard_redirect, join_location};

/// Signed-out pages; signed-in members continue to `from` or the default path.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Public, children)
}

/// Pages that need a session.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Protected, children)
}

/// Pages that need a session and a certified email.
#[component]
pub fn VerifiedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Verified, children)
}

fn guarded(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let stores = expect_context::<RwSignal<AppStores>>();
    let routes = expect_context::<ClientConfig>().routes;
    let location = use_location();
    let pathname = location.pathname;
    let search = location.search;
    let query = use_query_map();

    let decision = Memo::new(move |_| {
        let input = stores.with(AppStores::guard_input);
        let current = join_location(&pathname.get(), &search.get());
        let from = query.with(|q| q.get("from"));
        evaluate_guard(kind, &input, &current, from.as_deref(), &routes)
    });
    install_guard_redirect(decision, stores, use_navigate());

    move || match decision.get() {
        GuardDecision::Loading => view! { <div class="route-loading">"Loading..."</div> }.into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect { .. } => ().into_any(),
    }
}
