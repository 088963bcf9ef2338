//! End-to-end client flows against a mock API server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lockwallet_application::ports::{Navigator, SecureStorage};
use lockwallet_application::{
    ApiClient, ApiError, AuthState, InitializeAuth, SignIn, SignInInput, SignOut, WalletApi,
};
use lockwallet_domain::{Amount, TokenPair};
use lockwallet_infrastructure::{
    ApiConfig, AppConfig, SESSION_FILE, StorageConfig, build_client, file_storage,
};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

#[derive(Default)]
struct CountingNavigator(AtomicUsize);

impl Navigator for CountingNavigator {
    fn to_sign_in(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn config(server_url: &str, dir: &Path) -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: server_url.to_string(),
            timeout_ms: 5_000,
            ..ApiConfig::default()
        },
        storage: StorageConfig {
            dir: Some(dir.to_path_buf()),
        },
        ..AppConfig::default()
    }
}

fn client(server_url: &str, dir: &Path) -> (ApiClient, Arc<CountingNavigator>) {
    let config = config(server_url, dir);
    let navigator = Arc::new(CountingNavigator::default());
    let storage = file_storage(&config).unwrap();
    let client = build_client(&config, storage, navigator.clone()).unwrap();
    (client, navigator)
}

fn envelope(data: &serde_json::Value) -> String {
    json!({ "status": "success", "data": data }).to_string()
}

fn profile_body() -> String {
    envelope(&json!({
        "user": {
            "id": "u1",
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Obi"
        }
    }))
}

async fn seed_session(dir: &Path, access: &str, refresh: &str) {
    let storage = file_storage(&config("http://localhost", dir)).unwrap();
    storage
        .save_tokens(&TokenPair::new(access, refresh))
        .await
        .unwrap();
}

#[tokio::test]
async fn sign_in_persists_session_and_authenticates_requests() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let login = server
        .mock("POST", "/api/v1/auth/login")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(
            json!({"email": "ada@example.com", "password": "hunter22"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(
            &json!({"tokens": {"accessToken": "a1", "refreshToken": "r1"}}),
        ))
        .expect(1)
        .create_async()
        .await;
    let profile = server
        .mock("GET", "/api/v1/users/profile")
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_body())
        .expect(1)
        .create_async()
        .await;
    let wallet = server
        .mock("GET", "/api/v1/wallet")
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(
            &json!({"wallet": {"balance": 150_050, "lockedBalance": 50_000}}),
        ))
        .expect(1)
        .create_async()
        .await;

    let (client, _) = client(&server.url(), dir.path());
    let output = SignIn::new(client.clone())
        .execute(SignInInput {
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(output.user.display_name(), "Ada Obi");

    let balance = WalletApi::new(client.clone()).wallet().await.unwrap();
    assert_eq!(balance.available(), Amount::from_minor(100_050));
    assert_eq!(balance.currency, "NGN");

    login.assert_async().await;
    profile.assert_async().await;
    wallet.assert_async().await;

    let stored = std::fs::read_to_string(dir.path().join(SESSION_FILE)).unwrap();
    assert!(stored.contains("\"refresh_token\": \"r1\""));
}

#[tokio::test]
async fn expired_access_token_is_refreshed_once_and_replayed() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    seed_session(dir.path(), "stale", "r1").await;

    let rejected = server
        .mock("GET", "/api/v1/wallet")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"error","message":"jwt expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/refresh-token")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({"refreshToken": "r1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(
            &json!({"tokens": {"accessToken": "fresh", "refreshToken": "r2"}}),
        ))
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/api/v1/wallet")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(&json!({"wallet": {"balance": 1_000}})))
        .expect(1)
        .create_async()
        .await;

    let (client, navigator) = client(&server.url(), dir.path());
    assert!(InitializeAuth::new(client.clone()).restore().await.unwrap());

    let wallet = WalletApi::new(client.clone()).wallet().await.unwrap();
    assert_eq!(wallet.balance, Amount::from_minor(1_000));

    rejected.assert_async().await;
    refresh.assert_async().await;
    accepted.assert_async().await;
    assert_eq!(navigator.0.load(Ordering::SeqCst), 0);

    let reopened = file_storage(&config(&server.url(), dir.path())).unwrap();
    let session = reopened.load_session().await.unwrap();
    assert_eq!(session.access_token.as_deref(), Some("fresh"));
    assert_eq!(session.refresh_token.as_deref(), Some("r2"));
}

#[tokio::test]
async fn rejected_refresh_clears_session_and_navigates() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    seed_session(dir.path(), "stale", "revoked").await;

    server
        .mock("GET", "/api/v1/locks")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"error","message":"jwt expired"}"#)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/refresh-token")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"error","message":"Refresh token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, navigator) = client(&server.url(), dir.path());
    InitializeAuth::new(client.clone()).restore().await.unwrap();

    let err = WalletApi::new(client.clone()).locks().await.unwrap_err();
    let ApiError::RefreshFailed { reason } = err else {
        panic!("expected RefreshFailed, got {err:?}");
    };
    assert!(reason.contains("Refresh token expired"));

    refresh.assert_async().await;
    assert_eq!(navigator.0.load(Ordering::SeqCst), 1);
    assert!(!client.tokens().is_authenticated());
    assert!(!dir.path().join(SESSION_FILE).exists());
}

#[tokio::test]
async fn replay_that_still_gets_401_is_terminal() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    seed_session(dir.path(), "stale", "r1").await;

    let wallet = server
        .mock("GET", "/api/v1/wallet")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"error","message":"account suspended"}"#)
        .expect(2)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/refresh-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(
            &json!({"tokens": {"accessToken": "fresh", "refreshToken": "r2"}}),
        ))
        .expect(1)
        .create_async()
        .await;

    let (client, _) = client(&server.url(), dir.path());
    InitializeAuth::new(client.clone()).restore().await.unwrap();

    let err = WalletApi::new(client).wallet().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::AuthExpired {
            message: "account suspended".to_string()
        }
    );
    wallet.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn initialize_auth_revalidates_stored_session() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    seed_session(dir.path(), "a1", "r1").await;

    server
        .mock("GET", "/api/v1/users/profile")
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_body())
        .expect(1)
        .create_async()
        .await;

    let (client, _) = client(&server.url(), dir.path());
    let state = InitializeAuth::new(client.clone()).execute().await.unwrap();
    let AuthState::Authenticated { user } = state else {
        panic!("expected authenticated, got {state:?}");
    };
    assert_eq!(user.email, "ada@example.com");

    SignOut::new(client.clone()).execute().await;
    assert!(!dir.path().join(SESSION_FILE).exists());

    let (fresh_start, _) = self::client(&server.url(), dir.path());
    let state = InitializeAuth::new(fresh_start).execute().await.unwrap();
    assert_eq!(state, AuthState::Anonymous);
}

#[tokio::test]
async fn server_errors_surface_with_envelope_message() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    seed_session(dir.path(), "a1", "r1").await;

    let outlets = server
        .mock("GET", "/api/v1/outlets")
        .match_query(Matcher::UrlEncoded("category".into(), "food".into()))
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"error","message":"Unknown category"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, navigator) = client(&server.url(), dir.path());
    InitializeAuth::new(client.clone()).restore().await.unwrap();

    let err = WalletApi::new(client).outlets(Some("food")).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "Unknown category");
    outlets.assert_async().await;
    assert_eq!(navigator.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn corrupt_session_file_does_not_block_sign_in() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(SESSION_FILE), b"{\"access_token\": ").unwrap();

    server
        .mock("POST", "/api/v1/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(
            &json!({"tokens": {"accessToken": "a1", "refreshToken": "r1"}}),
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/users/profile")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_body())
        .create_async()
        .await;

    let (client, _) = client(&server.url(), dir.path());
    let state = InitializeAuth::new(client.clone()).execute().await.unwrap();
    assert_eq!(state, AuthState::Anonymous);

    SignIn::new(client.clone())
        .execute(SignInInput {
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

    let reopened = file_storage(&config(&server.url(), dir.path())).unwrap();
    let session = reopened.load_session().await.unwrap();
    assert_eq!(session.refresh_token.as_deref(), Some("r1"));

    SignOut::new(client).execute().await;
    assert!(!dir.path().join(SESSION_FILE).exists());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let dir = TempDir::new().unwrap();
    let (client, _) = client("http://127.0.0.1:9", dir.path());

    let err = WalletApi::new(client).wallet().await.unwrap_err();
    assert!(matches!(err, ApiError::NetworkUnreachable { .. }));
    assert_eq!(err.status(), None);
}
