//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration; access control is applied
//! around pages by the guard components, not inside them.

pub mod auth_callback;
pub mod email_cert;
pub mod home;
pub mod login;
