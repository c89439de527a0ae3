//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! Every request goes through [`ApiClient::send`], which attaches the bearer
//! token, maps transport and server failures to [`AppError`], and decodes the
//! `{ success, data, error }` envelope.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ApiResponse, ErrorResponse};

use crate::config::ClientConfig;
use crate::core::error::{AppError, Result, GENERIC_ERROR};
use crate::services::session::CredentialStore;

/// Default backend deployment.
pub const DEFAULT_API_URL: &str = "https://gbaka-maps.vercel.app";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the GbakaMap backend.
///
/// The bearer token is resolved per request: the in-memory token first, then
/// the credential store, then the development token when one is configured.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
    store: Option<Arc<dyn CredentialStore>>,
    dev_token: Option<String>,
}

impl ApiClient {
    /// Create a client against the default deployment with the default timeout.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
            store: None,
            dev_token: None,
        }
    }

    /// Client configured from [`ClientConfig`] (base URL, timeout, dev token).
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = Self::with_base_url(&config.api_url, config.api_timeout);
        client.dev_token = config.dev_token.clone();
        client
    }

    /// Read tokens from `store` when none is held in memory, and clear it on 401.
    pub fn with_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_dev_token(mut self, token: impl Into<String>) -> Self {
        self.dev_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Use `token` for subsequent requests.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forget the in-memory token and the stored session.
    pub fn clear_auth(&self) {
        *self.token.write() = None;
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                tracing::warn!(error = %e, "Failed to clear stored credentials");
            }
        }
    }

    /// Token that the next request will carry, if any.
    pub fn current_token(&self) -> Option<String> {
        if let Some(token) = self.token.read().clone() {
            return Some(token);
        }

        if let Some(store) = &self.store {
            match store.load() {
                Ok(Some(session)) => {
                    *self.token.write() = Some(session.id_token.clone());
                    return Some(session.id_token);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Failed to read stored credentials"),
            }
        }

        self.dev_token.clone()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(Method::GET, path, request).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(Method::POST, path, request).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        let request = self.client.patch(self.url(path)).json(body);
        self.send(Method::PATCH, path, request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        let request = self.client.delete(self.url(path));
        self.send(Method::DELETE, path, request).await
    }

    #[tracing::instrument(skip(self, request), fields(method = %method, path = %path))]
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let start = std::time::Instant::now();

        let request = match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, duration_ms = start.elapsed().as_millis(), "Request failed");
            transport_error(e)
        })?;

        let status = response.status();
        let duration = start.elapsed();

        if status.is_success() {
            let body = response.json::<ApiResponse<T>>().await.map_err(|e| {
                tracing::error!(error = %e, "Response parse error");
                AppError::Parse(format!("Failed to parse response: {}", e))
            })?;

            tracing::debug!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                success = body.success,
                "Request completed"
            );
            return Ok(body);
        }

        // Error bodies are best effort; an HTML error page still maps to a message.
        let error = response.json::<ErrorResponse>().await.ok();
        let message = error
            .as_ref()
            .and_then(|e| e.error.clone())
            .unwrap_or_else(|| GENERIC_ERROR.to_string());
        let code = error.and_then(|e| e.code);

        tracing::warn!(
            status = status.as_u16(),
            error = %message,
            duration_ms = duration.as_millis(),
            "Request rejected"
        );

        if status == StatusCode::UNAUTHORIZED {
            self.clear_auth();
            return Err(AppError::Unauthorized(message));
        }

        Err(AppError::Api {
            message,
            code,
            status: Some(status.as_u16()),
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// A failure before any response arrived.
///
/// Requests that could not even be built keep the transport error text;
/// everything else counts as "server unreachable".
fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        AppError::api(err.to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

/// Render `true` flags as `"true"` query values.
pub(crate) fn push_flag(query: &mut Vec<(&'static str, String)>, key: &'static str, enabled: bool) {
    if enabled {
        query.push((key, "true".to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::{AuthUser, MemoryCredentialStore, StoredSession};

    fn session(token: &str) -> StoredSession {
        StoredSession {
            id_token: token.into(),
            refresh_token: "r".into(),
            expires_at: "2030-01-01T00:00:00Z".parse().unwrap(),
            user: AuthUser {
                uid: "u".into(),
                email: None,
                display_name: None,
                photo_url: None,
            },
        }
    }

    #[test]
    fn test_token_resolution_order() {
        let store = Arc::new(MemoryCredentialStore::new());
        let client = ApiClient::with_base_url("http://localhost:9/", Duration::from_secs(1))
            .with_store(store.clone())
            .with_dev_token("dev");

        assert_eq!(client.base_url(), "http://localhost:9");
        assert_eq!(client.current_token().as_deref(), Some("dev"));

        store.save(&session("stored")).unwrap();
        assert_eq!(client.current_token().as_deref(), Some("stored"));

        client.set_auth_token("memory");
        assert_eq!(client.current_token().as_deref(), Some("memory"));
    }

    #[test]
    fn test_clear_auth_empties_memory_and_store() {
        let store = Arc::new(MemoryCredentialStore::with_session(session("stored")));
        let client = ApiClient::with_base_url("http://localhost:9", Duration::from_secs(1))
            .with_store(store.clone());

        client.set_auth_token("memory");
        client.clear_auth();

        assert!(store.load().unwrap().is_none());
        assert_eq!(client.current_token(), None);
    }
}
