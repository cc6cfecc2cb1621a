use super::*;

use crate::util::oauth_state::decode_state;

#[test]
fn expired_marker_accepts_one_or_true() {
    assert!(is_expired_marker(Some("1")));
    assert!(is_expired_marker(Some("true")));
    assert!(!is_expired_marker(Some("0")));
    assert!(!is_expired_marker(None));
}

#[test]
fn login_state_carries_safe_from_path() {
    let state = login_state(Some("/matches?day=sat"), "/home");
    assert_eq!(decode_state(Some(&state), "/fallback"), "/matches?day=sat");
}

#[test]
fn login_state_replaces_unsafe_from_with_default() {
    let state = login_state(Some("https://evil.example"), "/home");
    assert_eq!(decode_state(Some(&state), "/fallback"), "/home");

    let state = login_state(None, "/home");
    assert_eq!(decode_state(Some(&state), "/fallback"), "/home");
}

#[test]
fn auth_url_failed_message_names_provider() {
    assert_eq!(
        auth_url_failed_message(Provider::Kakao),
        "Couldn't start kakao login. Please try again."
    );
}
