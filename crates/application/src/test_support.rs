//! In-memory doubles for the ports, shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use lockwallet_domain::{ApiRequest, ApiResponse, TokenPair};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use crate::auth::TokenStore;
use crate::client::ApiClient;
use crate::error::AuthError;
use crate::ports::{AuthService, Navigator, SecureStorage, StorageError, StorageKey, Transport, TransportError};

type Responder =
    dyn Fn(&ApiRequest, Option<&str>) -> Result<ApiResponse, TransportError> + Send + Sync;

/// One request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub path: String,
    pub bearer: Option<String>,
    pub attempt: u8,
}

/// Transport that answers with a closure and records every call.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new(
        responder: impl Fn(&ApiRequest, Option<&str>) -> Result<ApiResponse, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Accepts requests carrying `token`, answers 401 to everything else.
    pub fn accepting(token: &'static str) -> Self {
        Self::new(move |request, bearer| {
            if bearer == Some(token) {
                Ok(ok(json!({ "path": request.path })))
            } else {
                Ok(unauthorized())
            }
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn paths_with_bearer(&self, token: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.bearer.as_deref() == Some(token))
            .map(|call| call.path.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        self.calls.lock().push(Call {
            path: request.path.clone(),
            bearer: bearer.map(str::to_string),
            attempt: request.attempt,
        });
        (self.responder)(request, bearer)
    }
}

/// Auth service with canned results and an optional gate on refresh.
pub struct FakeAuthService {
    login: Mutex<Result<TokenPair, AuthError>>,
    refresh: Mutex<Result<TokenPair, AuthError>>,
    refresh_calls: AtomicUsize,
    refresh_tokens_seen: Mutex<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeAuthService {
    pub fn refreshing_to(pair: TokenPair) -> Self {
        Self {
            login: Mutex::new(Err(AuthError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string(),
            })),
            refresh: Mutex::new(Ok(pair)),
            refresh_calls: AtomicUsize::new(0),
            refresh_tokens_seen: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn failing(error: AuthError) -> Self {
        let service = Self::refreshing_to(TokenPair::new("unused", "unused"));
        *service.refresh.lock() = Err(error);
        service
    }

    pub fn with_login(self, result: Result<TokenPair, AuthError>) -> Self {
        *self.login.lock() = result;
        self
    }

    /// Holds every refresh until a permit is added to `gate`.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_tokens_seen(&self) -> Vec<String> {
        self.refresh_tokens_seen.lock().clone()
    }
}

#[async_trait]
impl AuthService for FakeAuthService {
    async fn login(&self, _email: &str, _password: &str) -> Result<TokenPair, AuthError> {
        self.login.lock().clone()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_tokens_seen
            .lock()
            .push(refresh_token.to_string());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.refresh.lock().clone()
    }
}

/// Secure storage held in a map, with switchable write failures.
#[derive(Default)]
pub struct InMemoryStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
    fail_writes: AtomicBool,
}

impl InMemoryStorage {
    pub fn peek(&self, key: StorageKey) -> Option<String> {
        self.entries.lock().get(&key).cloned()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::Backend("store is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SecureStorage for InMemoryStorage {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries.lock().insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries.lock().remove(&key);
        Ok(())
    }
}

/// Navigator that counts redirects to sign-in.
#[derive(Default)]
pub struct RecordingNavigator {
    sign_ins: AtomicUsize,
}

impl RecordingNavigator {
    pub fn sign_ins(&self) -> usize {
        self.sign_ins.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn to_sign_in(&self) {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
    }
}

/// A client wired to fakes, with handles to each fake.
pub struct Harness {
    pub client: ApiClient,
    pub tokens: Arc<TokenStore>,
    pub storage: Arc<InMemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub transport: Arc<ScriptedTransport>,
    pub auth: Arc<FakeAuthService>,
}

impl Harness {
    pub fn new(transport: ScriptedTransport, auth: FakeAuthService) -> Self {
        Self::with_storage(transport, auth, Arc::new(InMemoryStorage::default()))
    }

    pub fn with_storage(
        transport: ScriptedTransport,
        auth: FakeAuthService,
        storage: Arc<InMemoryStorage>,
    ) -> Self {
        let transport = Arc::new(transport);
        let auth = Arc::new(auth);
        let tokens = Arc::new(TokenStore::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let client = ApiClient::new(
            transport.clone(),
            auth.clone(),
            tokens.clone(),
            storage.clone(),
            navigator.clone(),
        );
        Self {
            client,
            tokens,
            storage,
            navigator,
            transport,
            auth,
        }
    }
}

/// A 200 envelope around `data`.
pub fn ok(data: Value) -> ApiResponse {
    ApiResponse::json_body(200, &json!({ "status": "success", "data": data }))
}

/// The API's answer to an expired access token.
pub fn unauthorized() -> ApiResponse {
    ApiResponse::json_body(401, &json!({ "status": "error", "message": "jwt expired" }))
}

pub fn profile_json() -> Value {
    json!({
        "user": {
            "id": "u1",
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Obi"
        }
    })
}
