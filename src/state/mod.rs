//! Client-side application state.
//!
//! ARCHITECTURE
//! ============
//! `session` and `app_state` are plain reducer-driven structs; `stores` owns
//! both plus their persistence and is what the UI holds in a signal. `toast`
//! is the transient notification queue.

pub mod app_state;
pub mod session;
pub mod stores;
pub mod toast;
