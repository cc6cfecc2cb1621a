//! Toast stack for user-visible errors and notices.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::state::toast::{Toast, ToastKind, ToastState};

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Info => "toast toast--info",
        ToastKind::Error => "toast toast--error",
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let timeout_ms = expect_context::<ClientConfig>().toast_timeout_ms;

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast: Toast| view! { <ToastItem toast=toast timeout_ms=timeout_ms/> }
            />
        </div>
    }
}

/// One toast; dismissed on click or after `timeout_ms`.
#[component]
fn ToastItem(toast: Toast, timeout_ms: u32) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let id = toast.id;

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(timeout_ms))).await;
        toasts.update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = timeout_ms;

    view! {
        <div class=toast_class(toast.kind) on:click=move |_| toasts.update(|t| t.dismiss(id))>
            {toast.message}
        </div>
    }
}
