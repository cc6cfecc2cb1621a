use super::*;

const FALLBACK: &str = "/home";

#[test]
fn safe_paths_survive_encode_then_decode() {
    let paths = [
        "/",
        "/home",
        "/home?tab=team",
        "/matches/42#lineup",
        "/search?q=%ED%92%8B%EC%82%B4&page=2",
        "/팀/모집",
        "/a/b/c/../d",
    ];
    for path in paths {
        let token = encode_state(path);
        assert_eq!(decode_state(Some(&token), FALLBACK), path, "{path}");
    }
}

#[test]
fn encoded_state_is_url_safe() {
    let token = encode_state("/home?tab=team&x=~>>??");
    assert!(
        token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
        "{token}"
    );
}

#[test]
fn padded_tokens_are_accepted() {
    let token = format!("{}==", encode_state("/"));
    assert_eq!(token, "Lw==");
    assert_eq!(try_decode_state(&token), Ok("/".to_owned()));
}

#[test]
fn missing_or_blank_state_uses_fallback() {
    assert_eq!(decode_state(None, FALLBACK), FALLBACK);
    assert_eq!(decode_state(Some("   "), FALLBACK), FALLBACK);
}

#[test]
fn malformed_state_uses_fallback() {
    assert_eq!(try_decode_state("%%%not-base64%%%"), Err(AuthFlowError::MalformedOAuthState));
    assert_eq!(decode_state(Some("%%%not-base64%%%"), FALLBACK), FALLBACK);
}

#[test]
fn non_utf8_state_is_malformed() {
    let token = STATE_ENGINE.encode([0xff, 0xfe, 0x2f]);
    assert_eq!(try_decode_state(&token), Err(AuthFlowError::MalformedOAuthState));
}

#[test]
fn unsafe_decoded_targets_use_fallback() {
    for target in [
        "https://evil.example/steal",
        "http://evil.example",
        "//evil.example",
        "/\\evil.example",
        "javascript:alert(1)",
        "home",
        "",
        "/home\n/evil",
    ] {
        let token = encode_state(target);
        assert_eq!(decode_state(Some(&token), FALLBACK), FALLBACK, "{target:?}");
        assert!(try_decode_state(&token).is_err(), "{target:?}");
    }
}

#[test]
fn unsafe_target_error_carries_decoded_value() {
    let token = encode_state("//evil.example");
    assert_eq!(
        try_decode_state(&token),
        Err(AuthFlowError::UnsafeRedirectTarget("//evil.example".to_owned()))
    );
}

#[test]
fn resolve_from_accepts_only_root_relative_paths() {
    assert_eq!(resolve_from(Some("/matches?day=sat"), FALLBACK), "/matches?day=sat");
    assert_eq!(resolve_from(Some("//evil.example"), FALLBACK), FALLBACK);
    assert_eq!(resolve_from(Some("https://evil.example"), FALLBACK), FALLBACK);
    assert_eq!(resolve_from(None, FALLBACK), FALLBACK);
}
