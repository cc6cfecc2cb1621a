//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the auth/member endpoints behind the `AuthApi` trait and
//! `types` defines the pinned wire schema.

pub mod api;
pub mod types;
