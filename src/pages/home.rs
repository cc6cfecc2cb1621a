//! Verified landing page with onboarding prompt and logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::stores::AppStores;
use crate::state::toast::{ToastKind, ToastState};

#[component]
pub fn HomePage() -> impl IntoView {
    let stores = expect_context::<RwSignal<AppStores>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let login_path = expect_context::<ClientConfig>().routes.login;
    let navigate = use_navigate();

    let display_name = move || {
        stores.with(|s| {
            s.app()
                .user
                .as_ref()
                .map_or_else(|| "player".to_owned(), |u| u.name.clone())
        })
    };
    let needs_onboarding = move || stores.with(|s| !s.app().onboarding_completed);

    let on_finish_onboarding = move |_| stores.update(AppStores::complete_onboarding);

    let on_logout = move |_| {
        stores.update(AppStores::logout);
        toasts.update(|t| {
            t.push(ToastKind::Info, "Signed out.");
        });
        navigate(&login_path, NavigateOptions::default());
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>{move || format!("Welcome, {}", display_name())}</h1>
                <button class="btn" on:click=on_logout>"Log out"</button>
            </header>
            <Show when=needs_onboarding>
                <section class="home-page__onboarding">
                    <p>"Tell us your position and skill level to get better match suggestions."</p>
                    <button class="btn btn--primary" on:click=on_finish_onboarding>"Done"</button>
                </section>
            </Show>
        </div>
    }
}
