//! Login-flow helpers used by pages and guard components.
//!
//! Everything here is callable without a browser; only `BrowserStorage` and
//! the guard redirect effect touch the window or router.

pub mod auth;
pub mod oauth_state;
pub mod storage;
