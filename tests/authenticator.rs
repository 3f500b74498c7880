//! End-to-end tests for the basic authenticator pipeline over a mock
//! credential store: extract, source resolution with file fallback, schema
//! parsing, lookup, and hash verification.

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use authgate::auth::{AuthOutcome, AuthRequest, Authenticator, BasicAuthenticator};
use authgate::config::GateConfig;
use authgate::error::handlers::outcome_to_http_status;
use authgate::error::{DenyReason, StoreError, SystemErrorKind};
use authgate::store::{CredentialStore, StoreValue};

/// Store double replaying one scripted reply and counting calls
struct MockStore {
    reply: Result<StoreValue, StoreError>,
    calls: AtomicUsize,
}

impl MockStore {
    fn found(body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(StoreValue::Found(body.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    fn not_found() -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(StoreValue::NotFound),
            calls: AtomicUsize::new(0),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(StoreError::Unreachable("connection refused".to_string())),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CredentialStore for MockStore {
    async fn get(&self, _key: &str) -> Result<StoreValue, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn gate_config(fallback_path: &str) -> GateConfig {
    GateConfig {
        bind_address: "127.0.0.1:7070".to_string(),
        store_endpoint: "http://127.0.0.1:2379".to_string(),
        credentials_key: "/gate/config/httpbasicauthbyuserlist".to_string(),
        fallback_path: fallback_path.to_string(),
        store_timeout_secs: 1,
        authenticator: "basic".to_string(),
        allowed_addresses: vec![],
        cache_ttl_secs: 0,
    }
}

fn authenticator_with(store: Arc<MockStore>, fallback_path: &str) -> BasicAuthenticator {
    BasicAuthenticator::new(store, &gate_config(fallback_path))
}

fn request(username: &str, secret: &str) -> AuthRequest {
    AuthRequest::new(
        Some(username.to_string()),
        Some(secret.to_string()),
        IpAddr::V4(Ipv4Addr::LOCALHOST),
    )
}

/// Credential map holding one user with a real (low-cost) bcrypt hash
fn alice_map(secret: &str) -> String {
    let hash = bcrypt::hash(secret, 4).unwrap();
    format!("{{\"alice\": {{\"hash\": \"{}\"}}}}", hash)
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("authgate-test-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn scenario_a_remote_map_gates_all_three_cases() {
    let store = MockStore::found(&alice_map("correct"));
    let auth = authenticator_with(store, "/nonexistent/users.json");

    assert_eq!(
        auth.authenticate(&request("alice", "correct")).await,
        AuthOutcome::Allow
    );
    assert_eq!(
        auth.authenticate(&request("alice", "wrong")).await,
        AuthOutcome::Deny(DenyReason::BadCredentials)
    );
    assert_eq!(
        auth.authenticate(&request("bob", "correct")).await,
        AuthOutcome::Deny(DenyReason::BadCredentials)
    );
}

#[tokio::test]
async fn scenario_b_fallback_file_behaves_identically() {
    let path = scratch_file("scenario-b.json", &alice_map("correct"));
    let store = MockStore::unreachable();
    let auth = authenticator_with(store, path.to_str().unwrap());

    assert_eq!(
        auth.authenticate(&request("alice", "correct")).await,
        AuthOutcome::Allow
    );
    assert_eq!(
        auth.authenticate(&request("alice", "wrong")).await,
        AuthOutcome::Deny(DenyReason::BadCredentials)
    );
    assert_eq!(
        auth.authenticate(&request("bob", "correct")).await,
        AuthOutcome::Deny(DenyReason::BadCredentials)
    );

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn remote_value_is_used_exclusively() {
    // The fallback file holds a different map; a remote hit must ignore it.
    let path = scratch_file("shadowed.json", &alice_map("from-the-file"));
    let store = MockStore::found(&alice_map("from-the-store"));
    let auth = authenticator_with(store.clone(), path.to_str().unwrap());

    assert_eq!(
        auth.authenticate(&request("alice", "from-the-store")).await,
        AuthOutcome::Allow
    );
    assert_eq!(
        auth.authenticate(&request("alice", "from-the-file")).await,
        AuthOutcome::Deny(DenyReason::BadCredentials)
    );

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn store_not_found_reads_fallback_after_one_store_call() {
    let path = scratch_file("not-found.json", &alice_map("correct"));
    let store = MockStore::not_found();
    let auth = authenticator_with(store.clone(), path.to_str().unwrap());

    assert_eq!(
        auth.authenticate(&request("alice", "correct")).await,
        AuthOutcome::Allow
    );
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn missing_credentials_deny_without_touching_the_source() {
    let store = MockStore::found(&alice_map("correct"));
    let auth = authenticator_with(store.clone(), "/nonexistent/users.json");

    let no_secret = AuthRequest::new(
        Some("alice".to_string()),
        None,
        IpAddr::V4(Ipv4Addr::LOCALHOST),
    );
    assert_eq!(
        auth.authenticate(&no_secret).await,
        AuthOutcome::Deny(DenyReason::MissingCredentials)
    );

    let nothing = AuthRequest::new(None, None, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(
        auth.authenticate(&nothing).await,
        AuthOutcome::Deny(DenyReason::MissingCredentials)
    );

    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_map_denies_every_pair() {
    let store = MockStore::found("{}");
    let auth = authenticator_with(store, "/nonexistent/users.json");

    for (user, secret) in [("alice", "correct"), ("root", ""), ("", "x")] {
        assert_eq!(
            auth.authenticate(&request(user, secret)).await,
            AuthOutcome::Deny(DenyReason::BadCredentials),
            "pair ({:?}, {:?})",
            user,
            secret
        );
    }
}

#[tokio::test]
async fn malformed_payload_is_a_schema_error_not_a_denial() {
    for payload in [
        "{\"alice\": \"not-an-object\"}",
        "[1, 2, 3]",
        "not json at all",
        "{\"alice\": {\"salt\": \"no hash field\"}}",
    ] {
        let store = MockStore::found(payload);
        let auth = authenticator_with(store, "/nonexistent/users.json");
        let outcome = auth.authenticate(&request("alice", "correct")).await;
        assert_eq!(
            outcome,
            AuthOutcome::SystemError(SystemErrorKind::SchemaError),
            "payload {:?}",
            payload
        );
        // Fail closed: the boundary still refuses the request.
        assert_eq!(outcome_to_http_status(&outcome), 503);
    }
}

#[tokio::test]
async fn both_tiers_failing_is_a_system_error() {
    let store = MockStore::unreachable();
    let auth = authenticator_with(store, "/nonexistent/users.json");

    let outcome = auth.authenticate(&request("alice", "correct")).await;
    assert_eq!(
        outcome,
        AuthOutcome::SystemError(SystemErrorKind::CredentialSourceUnavailable)
    );
    assert_eq!(outcome_to_http_status(&outcome), 503);
}

#[tokio::test]
async fn unknown_user_and_wrong_secret_are_externally_identical() {
    let store = MockStore::found(&alice_map("correct"));
    let auth = authenticator_with(store, "/nonexistent/users.json");

    let wrong_secret = auth.authenticate(&request("alice", "wrong")).await;
    let unknown_user = auth.authenticate(&request("mallory", "wrong")).await;

    assert_eq!(wrong_secret, unknown_user);
    assert_eq!(
        outcome_to_http_status(&wrong_secret),
        outcome_to_http_status(&unknown_user)
    );
}

#[tokio::test]
async fn concurrent_requests_share_one_authenticator() {
    let store = MockStore::found(&alice_map("correct"));
    let auth = Arc::new(authenticator_with(store, "/nonexistent/users.json"));

    let mut handles = Vec::new();
    for i in 0..8 {
        let auth = Arc::clone(&auth);
        handles.push(tokio::spawn(async move {
            let secret = if i % 2 == 0 { "correct" } else { "wrong" };
            (i, auth.authenticate(&request("alice", secret)).await)
        }));
    }

    for handle in handles {
        let (i, outcome) = handle.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(outcome, AuthOutcome::Allow);
        } else {
            assert_eq!(outcome, AuthOutcome::Deny(DenyReason::BadCredentials));
        }
    }
}
