//! Authenticated API client.
//!
//! Every request gets the current access token attached. A 401 response
//! runs the single-flight refresh: one refresh for any number of
//! concurrent 401s, queued requests replayed in arrival order with the new
//! token, and each request retried at most once. When the refresh itself
//! fails the session is wiped, every waiter gets the same error and the
//! front end is sent to sign-in.

use std::sync::Arc;

use lockwallet_domain::{ApiRequest, ApiResponse, TokenPair, token_preview};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::auth::{PendingRequest, RefreshCoordinator, Ticket, TokenStore};
use crate::error::{ApiError, ApiResult, AuthError};
use crate::ports::{AuthService, Navigator, SecureStorage, Transport};

/// Client for the wallet API with transparent token refresh.
///
/// Cloning is cheap; clones share the token store and the refresh state.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    auth: Arc<dyn AuthService>,
    tokens: Arc<TokenStore>,
    storage: Arc<dyn SecureStorage>,
    navigator: Arc<dyn Navigator>,
    coordinator: RefreshCoordinator,
}

impl ApiClient {
    /// Creates a client over the given ports.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthService>,
        tokens: Arc<TokenStore>,
        storage: Arc<dyn SecureStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                auth,
                tokens,
                storage,
                navigator,
                coordinator: RefreshCoordinator::new(),
            }),
        }
    }

    /// The token store this client reads from.
    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.inner.tokens
    }

    /// The secure storage refreshed tokens are persisted to.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn SecureStorage> {
        &self.inner.storage
    }

    /// The auth service used for login and refresh.
    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.inner.auth
    }

    /// The navigation hook called on forced sign-out.
    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    /// Refresh state, exposed for observation.
    #[must_use]
    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.inner.coordinator
    }

    /// Sends a request, refreshing the session once if it answers 401.
    ///
    /// # Errors
    ///
    /// - `ApiError::Http` for non-2xx responses other than a recoverable 401
    /// - `ApiError::AuthExpired` when the request still gets 401 after a refresh
    /// - `ApiError::RefreshFailed` when the session could not be refreshed
    /// - `ApiError::NetworkUnreachable` when no response was received
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        match self.inner.dispatch(&request).await {
            Err(error) if error.is_unauthorized() => self.recover(request, error).await,
            outcome => outcome,
        }
    }

    /// Sends a request and decodes the `data` field of the response envelope.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`], plus `ApiError::Decode` when the payload
    /// does not have the expected shape.
    pub async fn send_data<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let response = self.send(request).await?;
        response.data().map_err(|e| ApiError::decode(&e))
    }

    async fn recover(&self, request: ApiRequest, error: ApiError) -> ApiResult<ApiResponse> {
        if !request.can_retry() {
            return Err(error.into_terminal());
        }

        match self.inner.coordinator.join(request.into_retry()) {
            Ticket::Follower(outcome) => {
                debug!("refresh in flight, request queued");
                outcome.await.unwrap_or_else(|_| {
                    Err(ApiError::RefreshFailed {
                        reason: "refresh ended without replaying the request".to_string(),
                    })
                })
            }
            Ticket::Leader(request) => {
                // The cycle owns the queue, so it must finish even if this
                // caller stops waiting.
                let inner = Arc::clone(&self.inner);
                let cycle = tokio::spawn(async move { inner.run_refresh_cycle(request).await });
                cycle.await.unwrap_or_else(|e| {
                    Err(ApiError::RefreshFailed {
                        reason: e.to_string(),
                    })
                })
            }
        }
    }
}

impl ClientInner {
    async fn dispatch(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let bearer = self.tokens.access_token();
        debug!(
            id = %request.id,
            method = %request.method,
            path = %request.path,
            attempt = request.attempt,
            token = %bearer.as_deref().map_or_else(|| "none".to_string(), token_preview),
            "sending request"
        );

        let response = self.transport.send(request, bearer.as_deref()).await?;
        debug!(
            id = %request.id,
            status = %response.status,
            elapsed = %response.duration_display(),
            "response received"
        );

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response))
        }
    }

    async fn run_refresh_cycle(&self, original: ApiRequest) -> ApiResult<ApiResponse> {
        let mut guard = CycleGuard::new(&self.coordinator);
        info!(path = %original.path, "access token rejected, refreshing session");

        match self.refresh_tokens().await {
            Ok(pair) => {
                if let Err(e) = self.storage.save_tokens(&pair).await {
                    warn!(error = %e, "could not persist refreshed tokens");
                }
                self.tokens.set_pair(pair);

                let queued = guard.finish();
                info!(queued = queued.len(), "session refreshed, replaying requests");
                for pending in queued {
                    let outcome = self.replay(&pending.request).await;
                    pending.resolve(outcome);
                }
                self.replay(&original).await
            }
            Err(error) => {
                let failure = ApiError::RefreshFailed {
                    reason: error.to_string(),
                };
                warn!(error = %error, "token refresh failed, signing out");
                self.clear_session().await;

                for pending in guard.finish() {
                    pending.resolve(Err(failure.clone()));
                }
                self.navigator.to_sign_in();
                Err(failure)
            }
        }
    }

    async fn refresh_tokens(&self) -> Result<TokenPair, AuthError> {
        let refresh_token = self
            .tokens
            .refresh_token()
            .ok_or(AuthError::MissingRefreshToken)?;
        self.auth.refresh(&refresh_token).await
    }

    async fn replay(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        self.dispatch(request).await.map_err(ApiError::into_terminal)
    }

    async fn clear_session(&self) {
        self.tokens.clear();
        if let Err(e) = self.storage.clear_all().await {
            warn!(error = %e, "could not clear stored session");
        }
    }
}

/// Rejects the queue if a refresh cycle ends without draining it.
struct CycleGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    finished: bool,
}

impl<'a> CycleGuard<'a> {
    const fn new(coordinator: &'a RefreshCoordinator) -> Self {
        Self {
            coordinator,
            finished: false,
        }
    }

    fn finish(&mut self) -> Vec<PendingRequest> {
        self.finished = true;
        self.coordinator.finish()
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        for pending in self.coordinator.finish() {
            pending.resolve(Err(ApiError::RefreshFailed {
                reason: "refresh cycle aborted".to_string(),
            }));
        }
    }
}
