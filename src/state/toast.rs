//! User-visible notification queue.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Toasts currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast and return its id. An identical toast already on
    /// screen is reused instead of stacking a duplicate.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        if let Some(existing) = self
            .items
            .iter()
            .find(|t| t.kind == kind && t.message == message)
        {
            return existing.id;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, message });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Sink for user-facing error messages.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}

impl Notifier for leptos::prelude::RwSignal<ToastState> {
    fn notify_error(&self, message: &str) {
        use leptos::prelude::Update;
        self.update(|t| {
            t.push(ToastKind::Error, message);
        });
    }
}
