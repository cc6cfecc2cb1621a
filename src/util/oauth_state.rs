//! OAuth `state` codec and post-login redirect sanitizing.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page packs the intended destination into the `state` value that
//! the identity provider echoes back to the callback page. Anything decoded
//! from that round trip, or read from a `from` query marker, is untrusted and
//! must resolve to a same-origin, root-relative path before navigation.

#[cfg(test)]
#[path = "oauth_state_test.rs"]
mod oauth_state_test;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::AuthFlowError;

/// URL-safe alphabet, no padding on encode, padding optional on decode.
const STATE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode a post-login path into an opaque URL-safe token.
pub fn encode_state(path: &str) -> String {
    STATE_ENGINE.encode(path.as_bytes())
}

/// Decode a state token, reporting why it was rejected.
///
/// # Errors
///
/// Returns `MalformedOAuthState` when the token is not base64url or not UTF-8,
/// and `UnsafeRedirectTarget` when it decodes to anything but a root-relative path.
pub fn try_decode_state(token: &str) -> Result<String, AuthFlowError> {
    let bytes = STATE_ENGINE
        .decode(token.trim())
        .map_err(|_| AuthFlowError::MalformedOAuthState)?;
    let path = String::from_utf8(bytes).map_err(|_| AuthFlowError::MalformedOAuthState)?;
    if !is_safe_path(&path) {
        return Err(AuthFlowError::UnsafeRedirectTarget(path));
    }
    Ok(path)
}

/// Decode a state token, falling back silently on a missing, malformed, or unsafe value.
pub fn decode_state(token: Option<&str>, fallback: &str) -> String {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return fallback.to_owned();
    };
    match try_decode_state(token) {
        Ok(path) => path,
        Err(e) => {
            log::warn!("oauth state rejected: {e}");
            fallback.to_owned()
        }
    }
}

/// Whether `path` is a same-origin, root-relative navigation target.
///
/// Rejects protocol-relative (`//host`, `/\host`) and absolute (`https://`,
/// `javascript:`) values, plus anything carrying control characters.
pub fn is_safe_path(path: &str) -> bool {
    let mut chars = path.chars();
    if chars.next() != Some('/') {
        return false;
    }
    if matches!(chars.next(), Some('/' | '\\')) {
        return false;
    }
    !path.chars().any(char::is_control)
}

/// Resolve a raw "from" marker to a safe path, or `fallback`.
pub fn resolve_from(candidate: Option<&str>, fallback: &str) -> String {
    match candidate.map(str::trim) {
        Some(path) if is_safe_path(path) => path.to_owned(),
        _ => fallback.to_owned(),
    }
}
