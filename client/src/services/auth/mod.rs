//! # Authentication Service
//!
//! Session lifecycle on top of an [`IdentityProvider`].
//!
//! Every successful sign-in, sign-up, re-authentication or token refresh:
//! - hands the id token to the [`ApiClient`] so backend calls carry it,
//! - persists the session through the [`CredentialStore`],
//! - publishes the signed-in user on the auth-state channel.
//!
//! Sign-out and account deletion undo all three.

pub mod errors;
pub mod identity;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use shared::{ProviderUser, UpdateAccountRequest};
use tokio::sync::watch;

use crate::core::error::{AppError, Result};
use crate::services::api::ApiClient;
use crate::services::session::{AuthUser, CredentialStore, StoredSession};

pub use errors::AuthErrorCode;
pub use identity::{FirebaseIdentity, IdentityProvider};

/// Tokens this close to expiry are refreshed before use.
pub const REFRESH_MARGIN_MINUTES: i64 = 5;

/// Token lifetime assumed when the provider sends an unreadable `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    api: Arc<ApiClient>,
    store: Arc<dyn CredentialStore>,
    session: RwLock<Option<StoredSession>>,
    state: watch::Sender<Option<AuthUser>>,
}

impl AuthService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        api: Arc<ApiClient>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            identity,
            api,
            store,
            session: RwLock::new(None),
            state,
        }
    }

    /// Auth-state changes: `Some(user)` after sign-in, `None` after sign-out.
    ///
    /// The receiver starts with the current state.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.session.read().as_ref().map(|s| s.user.clone())
    }

    /// Load the persisted session, if any, at startup.
    #[tracing::instrument(skip(self))]
    pub fn restore(&self) -> Result<Option<AuthUser>> {
        match self.store.load()? {
            Some(session) => {
                tracing::info!(uid = %session.user.uid, "Session restored");
                let user = session.user.clone();
                self.activate(session);
                Ok(Some(user))
            }
            None => {
                tracing::debug!("No stored session");
                Ok(None)
            }
        }
    }

    /// Create an account, then set its display name.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<AuthUser> {
        let created = self.identity.sign_up(email, password).await?;

        let profile = self
            .identity
            .update_account(&UpdateAccountRequest {
                id_token: created.id_token.clone(),
                display_name: Some(display_name.to_string()),
                return_secure_token: false,
                ..Default::default()
            })
            .await?;

        let session = StoredSession {
            id_token: created.id_token,
            refresh_token: created.refresh_token,
            expires_at: expiry_from(&created.expires_in, Utc::now()),
            user: AuthUser {
                uid: created.local_id,
                email: created.email.or_else(|| Some(email.to_string())),
                display_name: profile.display_name.or_else(|| Some(display_name.to_string())),
                photo_url: profile.photo_url,
            },
        };

        tracing::info!(uid = %session.user.uid, "Account created");
        Ok(self.establish(session))
    }

    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let signed_in = self.identity.sign_in(email, password).await?;

        let session = StoredSession {
            id_token: signed_in.id_token,
            refresh_token: signed_in.refresh_token,
            expires_at: expiry_from(&signed_in.expires_in, Utc::now()),
            user: AuthUser {
                uid: signed_in.local_id,
                email: signed_in.email.or_else(|| Some(email.to_string())),
                display_name: signed_in.display_name.filter(|n| !n.is_empty()),
                photo_url: None,
            },
        };

        tracing::info!(uid = %session.user.uid, "Signed in");
        Ok(self.establish(session))
    }

    #[tracing::instrument(skip(self))]
    pub fn sign_out(&self) -> Result<()> {
        self.deactivate();
        tracing::info!("Signed out");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        self.identity.send_password_reset(email).await?;
        tracing::info!("Password reset email requested");
        Ok(())
    }

    /// Change the display name and/or photo of the signed-in user.
    #[tracing::instrument(skip(self))]
    pub async fn update_profile(
        &self,
        display_name: Option<String>,
        photo_url: Option<String>,
    ) -> Result<AuthUser> {
        let id_token = self.require_token().await?;

        let updated = self
            .identity
            .update_account(&UpdateAccountRequest {
                id_token,
                display_name: display_name.clone(),
                photo_url: photo_url.clone(),
                return_secure_token: false,
                ..Default::default()
            })
            .await?;

        let user = self.modify_session(|session| {
            if let Some(name) = updated.display_name.or(display_name) {
                session.user.display_name = Some(name);
            }
            if let Some(photo) = updated.photo_url.or(photo_url) {
                session.user.photo_url = Some(photo);
            }
        })?;

        tracing::info!("Profile updated");
        Ok(user)
    }

    /// Change the account email. Re-authenticates with `current_password` first.
    #[tracing::instrument(skip(self, current_password))]
    pub async fn update_email(&self, new_email: &str, current_password: &str) -> Result<AuthUser> {
        let id_token = self.reauthenticate(current_password).await?;

        let updated = self
            .identity
            .update_account(&UpdateAccountRequest {
                id_token,
                email: Some(new_email.to_string()),
                return_secure_token: true,
                ..Default::default()
            })
            .await?;

        let user = self.modify_session(|session| {
            session.user.email = updated.email.clone().or_else(|| Some(new_email.to_string()));
            apply_rotated_tokens(session, &updated);
        })?;

        tracing::info!("Email updated");
        Ok(user)
    }

    /// Change the password. Re-authenticates with `current_password` first.
    #[tracing::instrument(skip(self, current_password, new_password))]
    pub async fn update_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        let id_token = self.reauthenticate(current_password).await?;

        let updated = self
            .identity
            .update_account(&UpdateAccountRequest {
                id_token,
                password: Some(new_password.to_string()),
                return_secure_token: true,
                ..Default::default()
            })
            .await?;

        self.modify_session(|session| apply_rotated_tokens(session, &updated))?;

        tracing::info!("Password updated");
        Ok(())
    }

    /// Delete the account. Re-authenticates with `password` first.
    #[tracing::instrument(skip(self, password))]
    pub async fn delete_account(&self, password: &str) -> Result<()> {
        let id_token = self.reauthenticate(password).await?;
        self.identity.delete_account(&id_token).await?;
        self.deactivate();
        tracing::info!("Account deleted");
        Ok(())
    }

    /// Id token for backend calls, refreshed when it expires within five minutes.
    ///
    /// `None` when signed out or when the refresh fails.
    pub async fn current_token(&self) -> Option<String> {
        let session = self.session.read().clone()?;

        if session.expires_within(Duration::minutes(REFRESH_MARGIN_MINUTES), Utc::now()) {
            return self.refresh_token().await;
        }
        Some(session.id_token)
    }

    /// Force a token refresh. `None` when signed out or when the refresh fails.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_token(&self) -> Option<String> {
        let refresh_token = self.session.read().as_ref()?.refresh_token.clone();

        match self.identity.refresh(&refresh_token).await {
            Ok(refreshed) => {
                let expires_at = expiry_from(&refreshed.expires_in, Utc::now());
                let token = refreshed.id_token.clone();
                let result = self.modify_session(|session| {
                    session.id_token = refreshed.id_token;
                    session.refresh_token = refreshed.refresh_token;
                    session.expires_at = expires_at;
                });
                match result {
                    Ok(_) => {
                        tracing::debug!("Token refreshed");
                        Some(token)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Session vanished during refresh");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed");
                None
            }
        }
    }

    /// Profile as currently known by the provider.
    pub async fn fetch_profile(&self) -> Result<ProviderUser> {
        let id_token = self.require_token().await?;
        self.identity.lookup(&id_token).await
    }

    async fn require_token(&self) -> Result<String> {
        if !self.is_authenticated() {
            return Err(AppError::auth(AuthErrorCode::NoCurrentUser));
        }
        self.current_token()
            .await
            .ok_or_else(|| AppError::auth(AuthErrorCode::RequiresRecentLogin))
    }

    /// Sign in again with the current email, returning the fresh id token.
    async fn reauthenticate(&self, password: &str) -> Result<String> {
        let email = self
            .session
            .read()
            .as_ref()
            .and_then(|s| s.user.email.clone())
            .ok_or_else(|| AppError::auth(AuthErrorCode::NoCurrentUser))?;

        let fresh = self.identity.sign_in(&email, password).await?;
        let expires_at = expiry_from(&fresh.expires_in, Utc::now());
        let id_token = fresh.id_token.clone();

        self.modify_session(|session| {
            session.id_token = fresh.id_token;
            session.refresh_token = fresh.refresh_token;
            session.expires_at = expires_at;
        })?;

        tracing::debug!("Re-authenticated");
        Ok(id_token)
    }

    /// Apply `change` to the live session, then persist and publish it.
    fn modify_session(&self, change: impl FnOnce(&mut StoredSession)) -> Result<AuthUser> {
        let session = {
            let mut guard = self.session.write();
            let session = guard
                .as_mut()
                .ok_or_else(|| AppError::auth(AuthErrorCode::NoCurrentUser))?;
            change(session);
            session.clone()
        };
        Ok(self.establish(session))
    }

    fn establish(&self, session: StoredSession) -> AuthUser {
        if let Err(e) = self.store.save(&session) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
        let user = session.user.clone();
        self.activate(session);
        user
    }

    fn activate(&self, session: StoredSession) {
        self.api.set_auth_token(session.id_token.clone());
        let user = session.user.clone();
        *self.session.write() = Some(session);
        self.state.send_replace(Some(user));
    }

    fn deactivate(&self) {
        *self.session.write() = None;
        self.api.clear_auth();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        self.state.send_replace(None);
    }
}

fn expiry_from(expires_in: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let secs = expires_in
        .trim()
        .parse::<i64>()
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    Duration::try_seconds(secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or_else(|| now + Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS))
}

fn apply_rotated_tokens(session: &mut StoredSession, updated: &shared::UpdateAccountResponse) {
    if let Some(id_token) = &updated.id_token {
        session.id_token = id_token.clone();
    }
    if let Some(refresh_token) = &updated.refresh_token {
        session.refresh_token = refresh_token.clone();
    }
    if let Some(expires_in) = &updated.expires_in {
        session.expires_at = expiry_from(expires_in, Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_from() {
        let now: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(expiry_from("3600", now), now + Duration::hours(1));
        assert_eq!(expiry_from(" 60 ", now), now + Duration::minutes(1));
        assert_eq!(expiry_from("soon", now), now + Duration::hours(1));
    }

    #[test]
    fn test_expiry_from_out_of_range_uses_default_lifetime() {
        let now: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(expiry_from("9223372036854775807", now), now + Duration::hours(1));
        assert_eq!(expiry_from("-9223372036854775808", now), now + Duration::hours(1));
    }
}
