use super::*;

use crate::config::StorageKeys;
use crate::net::types::TokenPair;
use crate::util::storage::MemoryStorage;

fn routes() -> RouteConfig {
    RouteConfig::default()
}

fn signed_in() -> GuardInput {
    GuardInput { hydrated: true, authenticated: true, ..GuardInput::default() }
}

fn signed_out() -> GuardInput {
    GuardInput { hydrated: true, ..GuardInput::default() }
}

#[test]
fn every_guard_waits_for_hydration() {
    let input = GuardInput { authenticated: true, ..GuardInput::default() };
    for kind in [GuardKind::Public, GuardKind::Protected, GuardKind::Verified] {
        assert_eq!(evaluate_guard(kind, &input, "/home", None, &routes()), GuardDecision::Loading);
    }
}

#[test]
fn public_guard_renders_for_signed_out_member() {
    assert_eq!(
        evaluate_guard(GuardKind::Public, &signed_out(), "/login", None, &routes()),
        GuardDecision::Render
    );
}

#[test]
fn public_guard_sends_signed_in_member_to_from_or_default() {
    assert_eq!(
        evaluate_guard(GuardKind::Public, &signed_in(), "/login", Some("/matches"), &routes()),
        GuardDecision::Redirect { to: "/matches".to_owned(), clear_session: false }
    );
    assert_eq!(
        evaluate_guard(GuardKind::Public, &signed_in(), "/login", None, &routes()),
        GuardDecision::Redirect { to: "/home".to_owned(), clear_session: false }
    );
}

#[test]
fn public_guard_rejects_external_from() {
    for from in ["//evil.example", "https://evil.example", "javascript:alert(1)"] {
        assert_eq!(
            evaluate_guard(GuardKind::Public, &signed_in(), "/login", Some(from), &routes()),
            GuardDecision::Redirect { to: "/home".to_owned(), clear_session: false },
            "{from}"
        );
    }
}

#[test]
fn protected_guard_sends_signed_out_member_to_login_with_from() {
    assert_eq!(
        evaluate_guard(GuardKind::Protected, &signed_out(), "/matches?day=sat", None, &routes()),
        GuardDecision::Redirect { to: "/login?from=%2Fmatches%3Fday%3Dsat".to_owned(), clear_session: false }
    );
}

#[test]
fn login_then_reentry_returns_to_original_path() {
    let decision = evaluate_guard(GuardKind::Protected, &signed_out(), "/teams/3", None, &routes());
    assert_eq!(
        decision,
        GuardDecision::Redirect { to: "/login?from=%2Fteams%2F3".to_owned(), clear_session: false }
    );

    // The router hands the login page the decoded `from` value.
    let from = urlencoding::decode("%2Fteams%2F3").unwrap();
    assert_eq!(
        evaluate_guard(GuardKind::Public, &signed_in(), "/login", Some(from.as_ref()), &routes()),
        GuardDecision::Redirect { to: "/teams/3".to_owned(), clear_session: false }
    );
}

#[test]
fn expired_session_redirects_with_marker_and_clears() {
    let input = GuardInput { session_expired: true, ..signed_in() };
    for kind in [GuardKind::Protected, GuardKind::Verified] {
        assert_eq!(
            evaluate_guard(kind, &input, "/home", None, &routes()),
            GuardDecision::Redirect { to: "/login?expired=1".to_owned(), clear_session: true }
        );
    }
}

#[test]
fn protected_guard_renders_with_session() {
    assert_eq!(
        evaluate_guard(GuardKind::Protected, &signed_in(), "/home", None, &routes()),
        GuardDecision::Render
    );
}

#[test]
fn verified_guard_requires_email_cert() {
    assert_eq!(
        evaluate_guard(GuardKind::Verified, &signed_in(), "/home?tab=team", None, &routes()),
        GuardDecision::Redirect { to: "/email-cert?from=%2Fhome%3Ftab%3Dteam".to_owned(), clear_session: false }
    );
}

#[test]
fn verified_guard_accepts_verified_or_bypassed() {
    let verified = GuardInput { email_verified: true, ..signed_in() };
    let bypassed = GuardInput { email_cert_bypassed: true, ..signed_in() };
    for input in [verified, bypassed] {
        assert_eq!(
            evaluate_guard(GuardKind::Verified, &input, "/home", None, &routes()),
            GuardDecision::Render
        );
    }
}

#[test]
fn verified_guard_checks_session_before_email() {
    assert_eq!(
        evaluate_guard(GuardKind::Verified, &signed_out(), "/home", None, &routes()),
        GuardDecision::Redirect { to: "/login?from=%2Fhome".to_owned(), clear_session: false }
    );
}

#[test]
fn public_guard_never_sends_signed_in_member_back_to_auth_pages() {
    for from in ["/login", "/login?from=%2Fhome", "/login/", "/auth/kakao/callback?code=x"] {
        assert_eq!(
            evaluate_guard(GuardKind::Public, &signed_in(), "/login", Some(from), &routes()),
            GuardDecision::Redirect { to: "/home".to_owned(), clear_session: false },
            "{from}"
        );
    }
}

fn expired_stores() -> Stores<MemoryStorage> {
    let mut stores = Stores::new(MemoryStorage::new(), StorageKeys::default());
    stores.initialize().unwrap();
    stores.sign_in(TokenPair { access_token: "at-1".to_owned(), refresh_token: None });
    stores.mark_session_expired();
    stores
}

fn decide(stores: &Stores<MemoryStorage>) -> GuardDecision {
    evaluate_guard(GuardKind::Protected, &stores.guard_input(), "/home", None, &routes())
}

#[test]
fn expired_visit_navigates_once_and_clears_session() {
    let mut stores = expired_stores();
    let mut redirected = false;
    let mut navigations = Vec::new();

    let decision = decide(&stores);
    navigations.extend(apply_redirect(&decision, &mut redirected, &mut stores));
    assert_eq!(navigations, ["/login?expired=1"]);
    assert!(!stores.session().is_authenticated());
    assert!(!stores.guard_input().session_expired);
    assert_eq!(stores.storage().read("matchup.session"), None);

    // Clearing flips the decision to a plain login redirect; the latch holds.
    let decision = decide(&stores);
    assert_eq!(
        decision,
        GuardDecision::Redirect { to: "/login?from=%2Fhome".to_owned(), clear_session: false }
    );
    navigations.extend(apply_redirect(&decision, &mut redirected, &mut stores));
    assert_eq!(navigations, ["/login?expired=1"]);
}

#[test]
fn render_and_loading_decisions_do_not_navigate() {
    let mut stores = expired_stores();
    let mut redirected = false;
    for decision in [GuardDecision::Loading, GuardDecision::Render] {
        assert_eq!(apply_redirect(&decision, &mut redirected, &mut stores), None);
    }
    assert!(!redirected);
    assert!(stores.session().is_authenticated());
}

#[test]
fn plain_redirect_keeps_session_intact() {
    let mut stores = expired_stores();
    stores.sign_in(TokenPair { access_token: "at-2".to_owned(), refresh_token: None });
    let mut redirected = false;
    let decision = GuardDecision::Redirect { to: "/email-cert?from=%2Fhome".to_owned(), clear_session: false };
    assert_eq!(
        apply_redirect(&decision, &mut redirected, &mut stores).as_deref(),
        Some("/email-cert?from=%2Fhome")
    );
    assert!(stores.session().is_authenticated());
}

#[test]
fn path_with_from_sanitizes_location() {
    assert_eq!(path_with_from("/login", "//evil.example", "/home"), "/login?from=%2Fhome");
}

#[test]
fn join_location_handles_search_prefix() {
    assert_eq!(join_location("/home", ""), "/home");
    assert_eq!(join_location("/home", "?tab=team"), "/home?tab=team");
    assert_eq!(join_location("/home", "tab=team"), "/home?tab=team");
}
