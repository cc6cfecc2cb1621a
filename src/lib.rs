//! # matchup-client
//!
//! Leptos + WASM frontend for the matchup sports-matching service.
//!
//! This crate contains the social-login flow (OAuth state codec, callback
//! handling), the persisted session and app stores, route guards, pages, and
//! the REST helpers they share.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
