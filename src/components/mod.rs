//! Shared UI components.

pub mod guards;
pub mod toast_host;
