use super::*;

use crate::config::RouteConfig;
use crate::util::auth::{GuardDecision, GuardKind, evaluate_guard};
use crate::util::storage::MemoryStorage;

fn keys() -> StorageKeys {
    StorageKeys::default()
}

fn tokens() -> TokenPair {
    TokenPair { access_token: "at-1".to_owned(), refresh_token: Some("rt-1".to_owned()) }
}

fn profile() -> MemberProfile {
    MemberProfile {
        id: "1".to_owned(),
        name: "Hana".to_owned(),
        email: None,
        avatar_url: None,
        email_verified: false,
        onboarding_completed: false,
    }
}

fn ready(storage: MemoryStorage) -> Stores<MemoryStorage> {
    let mut stores = Stores::new(storage, keys());
    stores.initialize().unwrap();
    stores
}

#[test]
fn stores_start_unhydrated() {
    let stores = Stores::new(MemoryStorage::new(), keys());
    assert!(!stores.is_hydrated());
    assert!(!stores.guard_input().hydrated);
}

#[test]
fn initialize_with_empty_storage() {
    let stores = ready(MemoryStorage::new());
    assert!(stores.is_hydrated());
    assert!(!stores.session().is_authenticated());
}

#[test]
fn initialize_restores_persisted_session() {
    let storage = MemoryStorage::new()
        .with_entry("matchup.session", r#"{"accessToken":"at-9"}"#)
        .with_entry("matchup.app", r#"{"emailVerified":true}"#);
    let stores = ready(storage);
    assert_eq!(stores.session().access_token.as_deref(), Some("at-9"));
    assert!(stores.app().email_verified);
}

#[test]
fn initialize_discards_corrupt_entry_but_still_hydrates() {
    let storage = MemoryStorage::new()
        .with_entry("matchup.session", "garbage")
        .with_entry("matchup.app", r#"{"emailCertBypassed":true}"#);
    let mut stores = Stores::new(storage, keys());
    let err = stores.initialize().unwrap_err();
    assert_eq!(err, StoreError::Corrupt { key: "matchup.session".to_owned() });
    assert!(stores.is_hydrated());
    assert!(!stores.session().is_authenticated());
    assert!(stores.app().email_cert_bypassed);
    assert_eq!(stores.storage().read("matchup.session"), None);
}

#[test]
fn sign_in_persists_tokens() {
    let mut stores = ready(MemoryStorage::new());
    stores.sign_in(tokens());
    assert!(stores.session().is_authenticated());
    let raw = stores.storage().read("matchup.session").unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["accessToken"], "at-1");
}

#[test]
fn persisted_state_survives_a_reload() {
    let mut stores = ready(MemoryStorage::new());
    stores.sign_in(tokens());
    stores.load_profile(profile());
    stores.bypass_email_cert();

    let raw_session = stores.storage().read("matchup.session").unwrap();
    let raw_app = stores.storage().read("matchup.app").unwrap();
    let reloaded = ready(
        MemoryStorage::new()
            .with_entry("matchup.session", &raw_session)
            .with_entry("matchup.app", &raw_app),
    );
    assert_eq!(reloaded.session().access_token.as_deref(), Some("at-1"));
    assert_eq!(reloaded.app().user.as_ref().map(|u| u.name.as_str()), Some("Hana"));
    assert!(reloaded.app().email_cert_bypassed);
}

#[test]
fn logout_clears_storage_and_state() {
    let mut stores = ready(MemoryStorage::new());
    stores.sign_in(tokens());
    stores.load_profile(profile());
    stores.logout();
    assert!(!stores.session().is_authenticated());
    assert!(stores.app().user.is_none());
    assert!(stores.is_hydrated());
    assert_eq!(stores.storage().read("matchup.session"), None);
}

#[test]
fn clear_expired_session_drops_tokens_and_flag() {
    let mut stores = ready(MemoryStorage::new());
    stores.sign_in(tokens());
    stores.mark_session_expired();
    assert!(stores.guard_input().session_expired);

    stores.clear_expired_session();
    let input = stores.guard_input();
    assert!(!input.authenticated);
    assert!(!input.session_expired);
    assert_eq!(stores.storage().read("matchup.session"), None);
}

#[test]
fn sign_in_after_expiry_resets_flag() {
    let mut stores = ready(MemoryStorage::new());
    stores.mark_session_expired();
    stores.sign_in(tokens());
    assert!(!stores.app().session_expired);
}

#[test]
fn guard_input_reflects_verification_flags() {
    let mut stores = ready(MemoryStorage::new());
    stores.sign_in(tokens());
    stores.mark_email_verified();
    stores.complete_onboarding();
    let input = stores.guard_input();
    assert!(input.hydrated);
    assert!(input.authenticated);
    assert!(input.email_verified);
    assert!(!input.email_cert_bypassed);
    assert!(stores.app().onboarding_completed);
}

#[test]
fn next_member_after_expiry_does_not_inherit_bypass() {
    let mut stores = ready(MemoryStorage::new());
    stores.sign_in(tokens());
    stores.load_profile(profile());
    stores.bypass_email_cert();
    stores.mark_session_expired();
    stores.clear_expired_session();

    stores.sign_in(TokenPair { access_token: "at-2".to_owned(), refresh_token: None });
    stores.load_profile(MemberProfile { id: "2".to_owned(), name: "Minho".to_owned(), ..profile() });

    let input = stores.guard_input();
    assert!(input.authenticated);
    assert!(!input.email_verified);
    assert!(!input.email_cert_bypassed);
    assert_eq!(
        evaluate_guard(GuardKind::Verified, &input, "/home", None, &RouteConfig::default()),
        GuardDecision::Redirect { to: "/email-cert?from=%2Fhome".to_owned(), clear_session: false }
    );

    let raw = stores.storage().read("matchup.app").unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["emailCertBypassed"], false);
}
