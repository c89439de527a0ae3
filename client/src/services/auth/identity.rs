//! # Identity Provider
//!
//! Email/password accounts on Firebase Authentication, spoken over its REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    IdTokenRequest, IdTokenResponse, LookupResponse, OobCodeRequest, PasswordCredentials,
    ProviderErrorResponse, ProviderUser, RefreshTokenResponse, UpdateAccountRequest,
    UpdateAccountResponse,
};

use super::errors::AuthErrorCode;
use crate::config::ClientConfig;
use crate::core::error::{AppError, Result};

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com";

/// Account operations offered by the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdTokenResponse>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdTokenResponse>;

    /// Profile, email or password change.
    async fn update_account(&self, request: &UpdateAccountRequest) -> Result<UpdateAccountResponse>;

    async fn send_password_reset(&self, email: &str) -> Result<()>;

    async fn delete_account(&self, id_token: &str) -> Result<()>;

    async fn lookup(&self, id_token: &str) -> Result<ProviderUser>;

    /// Exchange a refresh token for a fresh id token.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse>;
}

/// REST client for Firebase Authentication.
pub struct FirebaseIdentity {
    client: Client,
    api_key: String,
    identity_url: String,
    secure_token_url: String,
}

impl FirebaseIdentity {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_urls(api_key, DEFAULT_IDENTITY_URL, DEFAULT_SECURE_TOKEN_URL)
    }

    /// Point at other hosts, such as the auth emulator.
    pub fn with_urls(
        api_key: impl Into<String>,
        identity_url: impl Into<String>,
        secure_token_url: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(crate::services::api::DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            identity_url: identity_url.into().trim_end_matches('/').to_string(),
            secure_token_url: secure_token_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_urls(
            config.firebase_api_key.clone().unwrap_or_default(),
            &config.identity_url,
            &config.secure_token_url,
        )
    }

    fn accounts_url(&self, operation: &str) -> String {
        format!("{}/v1/accounts:{}", self.identity_url, operation)
    }

    #[tracing::instrument(skip(self, url, body))]
    async fn call<B: Serialize + ?Sized + Sync, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
        body: &B,
    ) -> Result<T> {
        if self.api_key.is_empty() {
            return Err(AppError::Config("GBAKA_FIREBASE_API_KEY is not set".to_string()));
        }

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Identity provider unreachable");
                AppError::auth(AuthErrorCode::NetworkRequestFailed)
            })?;

        let status = response.status();
        let duration = start.elapsed();

        if status.is_success() {
            let result = response.json::<T>().await.map_err(|e| {
                tracing::error!(error = %e, "Identity response parse error");
                AppError::Parse(format!("Failed to parse identity response: {}", e))
            });
            if result.is_ok() {
                tracing::debug!(duration_ms = duration.as_millis(), "Identity call succeeded");
            }
            return result;
        }

        let code = match response.json::<ProviderErrorResponse>().await {
            Ok(body) => AuthErrorCode::from_rest_message(&body.error.message),
            Err(_) => AuthErrorCode::Unknown(String::new()),
        };

        tracing::warn!(
            status = status.as_u16(),
            code = %code,
            duration_ms = duration.as_millis(),
            "Identity call rejected"
        );
        Err(AppError::auth(code))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdTokenResponse> {
        let body = PasswordCredentials::new(email, password);
        self.call("signUp", self.accounts_url("signUp"), &body).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdTokenResponse> {
        let body = PasswordCredentials::new(email, password);
        self.call("signInWithPassword", self.accounts_url("signInWithPassword"), &body)
            .await
    }

    async fn update_account(&self, request: &UpdateAccountRequest) -> Result<UpdateAccountResponse> {
        self.call("update", self.accounts_url("update"), request).await
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        let body = OobCodeRequest::password_reset(email);
        let _: serde_json::Value = self
            .call("sendOobCode", self.accounts_url("sendOobCode"), &body)
            .await?;
        Ok(())
    }

    async fn delete_account(&self, id_token: &str) -> Result<()> {
        let body = IdTokenRequest {
            id_token: id_token.to_string(),
        };
        let _: serde_json::Value = self.call("delete", self.accounts_url("delete"), &body).await?;
        Ok(())
    }

    async fn lookup(&self, id_token: &str) -> Result<ProviderUser> {
        let body = IdTokenRequest {
            id_token: id_token.to_string(),
        };
        let response: LookupResponse = self.call("lookup", self.accounts_url("lookup"), &body).await?;
        response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| AppError::auth(AuthErrorCode::UserNotFound))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        let body = serde_json::json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        });
        let url = format!("{}/v1/token", self.secure_token_url);
        self.call("token", url, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_is_a_config_error() {
        let identity = FirebaseIdentity::with_urls("", "http://127.0.0.1:9", "http://127.0.0.1:9");
        let err = identity.sign_in("a@b.c", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_accounts_url() {
        let identity = FirebaseIdentity::with_urls("k", "http://localhost:9099/", "http://localhost:9099");
        assert_eq!(identity.accounts_url("signUp"), "http://localhost:9099/v1/accounts:signUp");
    }
}
