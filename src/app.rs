//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::guards::{ProtectedRoute, PublicRoute, VerifiedRoute};
use crate::components::toast_host::ToastHost;
use crate::config::ClientConfig;
use crate::net::api::HttpAuthApi;
use crate::pages::{auth_callback::AuthCallbackPage, email_cert::EmailCertPage, home::HomePage, login::LoginPage};
use crate::state::stores::{AppStores, Stores};
use crate::state::toast::ToastState;
use crate::util::storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides config, stores, toasts, and the API client as context, hydrates
/// the persisted stores once in the browser, and sets up guarded routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let stores = RwSignal::new(Stores::new(BrowserStorage, config.storage.clone()));
    let toasts = RwSignal::new(ToastState::default());

    provide_context(HttpAuthApi::new(config.api_base_url.clone()));
    provide_context(config.clone());
    provide_context(stores);
    provide_context(toasts);

    // Effects only run in the browser, so SSR output always shows the guard
    // placeholders and the client swaps in real content after hydration.
    Effect::new(move || {
        if stores.with_untracked(AppStores::is_hydrated) {
            return;
        }
        stores.update(|s| {
            if let Err(e) = s.initialize() {
                log::warn!("store hydration: {e}");
            }
        });
    });

    let default_path = config.routes.default;

    view! {
        <Stylesheet id="leptos" href="/pkg/matchup.css"/>
        <Title text="Matchup"/>

        <Router>
            <ToastHost/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("")
                    view=move || view! { <Redirect path=default_path.clone()/> }
                />
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicRoute><LoginPage/></PublicRoute> }
                />
                <Route
                    path=(StaticSegment("auth"), ParamSegment("provider"), StaticSegment("callback"))
                    view=AuthCallbackPage
                />
                <Route
                    path=StaticSegment("email-cert")
                    view=|| view! { <ProtectedRoute><EmailCertPage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("home")
                    view=|| view! { <VerifiedRoute><HomePage/></VerifiedRoute> }
                />
            </Routes>
        </Router>
    }
}
