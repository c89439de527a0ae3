//! Session lifecycle against a fake identity provider.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use gbaka_client::services::api::ApiClient;
use gbaka_client::services::auth::{AuthService, FirebaseIdentity};
use gbaka_client::services::session::{CredentialStore, MemoryCredentialStore};
use parking_lot::Mutex;
use serde_json::{json, Value};

mod common;

const PASSWORD: &str = "secret1";
const TAKEN_EMAIL: &str = "taken@example.ci";

struct Provider {
    calls: Mutex<Vec<(String, Value)>>,
    keys: Mutex<Vec<String>>,
    expires_in: &'static str,
}

impl Provider {
    fn ops(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(op, _)| op.clone()).collect()
    }

    fn last_body(&self, op: &str) -> Value {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|(name, _)| name == op)
            .map(|(_, body)| body.clone())
            .unwrap_or(Value::Null)
    }
}

fn rejected(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "code": 400, "message": message } })),
    )
}

async fn handle(
    State(provider): State<Arc<Provider>>,
    Path(op): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    provider.calls.lock().push((op.clone(), body.clone()));
    provider.keys.lock().push(query.get("key").cloned().unwrap_or_default());

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let reply = match op.as_str() {
        "accounts:signUp" if email == TAKEN_EMAIL => return rejected("EMAIL_EXISTS"),
        "accounts:signUp" => json!({
            "idToken": "id-new",
            "refreshToken": "rt-1",
            "expiresIn": provider.expires_in,
            "localId": "uid-new",
            "email": email
        }),
        "accounts:signInWithPassword" if body["password"] != PASSWORD => return rejected("INVALID_PASSWORD"),
        "accounts:signInWithPassword" => json!({
            "idToken": "id-signin",
            "refreshToken": "rt-1",
            "expiresIn": provider.expires_in,
            "localId": "uid-1",
            "email": email,
            "displayName": "Awa",
            "registered": true
        }),
        "accounts:update" => {
            let mut reply = json!({
                "localId": "uid-1",
                "displayName": body.get("displayName").cloned().unwrap_or(Value::Null),
                "email": body.get("email").cloned().unwrap_or(Value::Null)
            });
            if body["returnSecureToken"] == true {
                reply["idToken"] = json!("id-rotated");
                reply["refreshToken"] = json!("rt-rotated");
                reply["expiresIn"] = json!("3600");
            }
            reply
        }
        "accounts:sendOobCode" => json!({ "email": email }),
        "accounts:delete" => json!({}),
        "accounts:lookup" => json!({
            "users": [{ "localId": "uid-1", "email": "awa@example.ci", "displayName": "Awa", "emailVerified": true }]
        }),
        "token" => json!({
            "expires_in": "3600",
            "token_type": "Bearer",
            "refresh_token": "rt-2",
            "id_token": "id-refreshed",
            "user_id": "uid-1"
        }),
        _ => return rejected("OPERATION_NOT_ALLOWED"),
    };
    (StatusCode::OK, Json(reply))
}

struct Harness {
    auth: AuthService,
    api: Arc<ApiClient>,
    store: Arc<MemoryCredentialStore>,
    identity: Arc<FirebaseIdentity>,
    provider: Arc<Provider>,
}

async fn harness(expires_in: &'static str) -> Harness {
    let provider = Arc::new(Provider {
        calls: Mutex::default(),
        keys: Mutex::default(),
        expires_in,
    });
    let app = Router::new()
        .route("/v1/{op}", post(handle))
        .with_state(provider.clone());
    let base = common::spawn(app).await;

    let identity = Arc::new(FirebaseIdentity::with_urls("test-key", &base, &base));
    let api = Arc::new(ApiClient::with_base_url(common::dead_url().await, Duration::from_secs(1)));
    let store = Arc::new(MemoryCredentialStore::new());
    let auth = AuthService::new(identity.clone(), api.clone(), store.clone());

    Harness {
        auth,
        api,
        store,
        identity,
        provider,
    }
}

#[tokio::test]
async fn test_sign_in_establishes_session() {
    let h = harness("3600").await;
    let state = h.auth.subscribe();
    assert!(state.borrow().is_none());

    let user = h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    assert_eq!(user.uid, "uid-1");
    assert_eq!(user.display_name.as_deref(), Some("Awa"));
    assert!(h.auth.is_authenticated());
    assert_eq!(h.api.current_token().as_deref(), Some("id-signin"));
    assert_eq!(h.store.load().unwrap().unwrap().refresh_token, "rt-1");
    assert_eq!(state.borrow().as_ref().map(|u| u.uid.clone()).as_deref(), Some("uid-1"));

    let body = h.provider.last_body("accounts:signInWithPassword");
    assert_eq!(body["returnSecureToken"], true);
    assert_eq!(h.provider.keys.lock().as_slice(), ["test-key".to_string()]);
}

#[tokio::test]
async fn test_wrong_password_is_mapped() {
    let h = harness("3600").await;

    let err = h.auth.sign_in("awa@example.ci", "nope").await.unwrap_err();

    assert_eq!(err.code(), Some("auth/wrong-password"));
    assert_eq!(err.user_message(), "Incorrect password");
    assert!(!h.auth.is_authenticated());
    assert!(h.store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_sign_up_sets_display_name() {
    let h = harness("3600").await;

    let user = h.auth.sign_up("kouassi@example.ci", PASSWORD, "Kouassi").await.unwrap();

    assert_eq!(user.uid, "uid-new");
    assert_eq!(user.display_name.as_deref(), Some("Kouassi"));
    assert_eq!(user.email.as_deref(), Some("kouassi@example.ci"));
    assert_eq!(h.provider.ops(), vec!["accounts:signUp", "accounts:update"]);

    let update = h.provider.last_body("accounts:update");
    assert_eq!(update["idToken"], "id-new");
    assert_eq!(update["displayName"], "Kouassi");
    assert_eq!(h.api.current_token().as_deref(), Some("id-new"));
}

#[tokio::test]
async fn test_sign_up_with_taken_email() {
    let h = harness("3600").await;

    let err = h.auth.sign_up(TAKEN_EMAIL, PASSWORD, "Awa").await.unwrap_err();

    assert_eq!(err.code(), Some("auth/email-already-in-use"));
    assert_eq!(err.user_message(), "This email is already in use");
    assert_eq!(h.provider.ops(), vec!["accounts:signUp"]);
    assert!(h.auth.current_user().is_none());
}

#[tokio::test]
async fn test_sign_out_clears_everything() {
    let h = harness("3600").await;
    let state = h.auth.subscribe();
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    h.auth.sign_out().unwrap();

    assert!(!h.auth.is_authenticated());
    assert!(h.api.current_token().is_none());
    assert!(h.store.load().unwrap().is_none());
    assert!(state.borrow().is_none());
}

#[tokio::test]
async fn test_restore_from_store() {
    let h = harness("3600").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    let api = Arc::new(ApiClient::with_base_url(common::dead_url().await, Duration::from_secs(1)));
    let restarted = AuthService::new(h.identity.clone(), api.clone(), h.store.clone());
    assert!(api.current_token().is_none());

    let user = restarted.restore().unwrap().unwrap();

    assert_eq!(user.uid, "uid-1");
    assert!(restarted.is_authenticated());
    assert_eq!(api.current_token().as_deref(), Some("id-signin"));
}

#[tokio::test]
async fn test_token_refreshed_near_expiry() {
    let h = harness("60").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    let token = h.auth.current_token().await;

    assert_eq!(token.as_deref(), Some("id-refreshed"));
    let body = h.provider.last_body("token");
    assert_eq!(body["grant_type"], "refresh_token");
    assert_eq!(body["refresh_token"], "rt-1");
    assert_eq!(h.store.load().unwrap().unwrap().refresh_token, "rt-2");
    assert_eq!(h.api.current_token().as_deref(), Some("id-refreshed"));
}

#[tokio::test]
async fn test_fresh_token_is_not_refreshed() {
    let h = harness("3600").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    assert_eq!(h.auth.current_token().await.as_deref(), Some("id-signin"));
    assert!(!h.provider.ops().contains(&"token".to_string()));
}

#[tokio::test]
async fn test_password_change_reauthenticates() {
    let h = harness("3600").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    h.auth.update_password(PASSWORD, "n3w-secret").await.unwrap();

    assert_eq!(
        h.provider.ops(),
        vec!["accounts:signInWithPassword", "accounts:signInWithPassword", "accounts:update"]
    );
    let update = h.provider.last_body("accounts:update");
    assert_eq!(update["password"], "n3w-secret");
    assert_eq!(update["returnSecureToken"], true);
    assert_eq!(h.api.current_token().as_deref(), Some("id-rotated"));
    assert_eq!(h.store.load().unwrap().unwrap().refresh_token, "rt-rotated");
}

#[tokio::test]
async fn test_email_change_updates_user() {
    let h = harness("3600").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    let user = h.auth.update_email("awa.k@example.ci", PASSWORD).await.unwrap();

    assert_eq!(user.email.as_deref(), Some("awa.k@example.ci"));
    assert_eq!(h.auth.current_user().unwrap().email.as_deref(), Some("awa.k@example.ci"));
}

#[tokio::test]
async fn test_delete_account_signs_out() {
    let h = harness("3600").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    h.auth.delete_account(PASSWORD).await.unwrap();

    let ops = h.provider.ops();
    assert_eq!(&ops[ops.len() - 2..], ["accounts:signInWithPassword", "accounts:delete"]);
    assert_eq!(h.provider.last_body("accounts:delete")["idToken"], "id-signin");
    assert!(!h.auth.is_authenticated());
    assert!(h.store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_delete_with_wrong_password_keeps_account() {
    let h = harness("3600").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    let err = h.auth.delete_account("wrong").await.unwrap_err();

    assert_eq!(err.code(), Some("auth/wrong-password"));
    assert!(h.auth.is_authenticated());
    assert!(!h.provider.ops().contains(&"accounts:delete".to_string()));
}

#[tokio::test]
async fn test_profile_update_requires_user() {
    let h = harness("3600").await;

    let err = h.auth.update_profile(Some("Awa".into()), None).await.unwrap_err();

    assert_eq!(err.code(), Some("auth/no-current-user"));
    assert!(h.provider.ops().is_empty());
}

#[tokio::test]
async fn test_profile_update_and_lookup() {
    let h = harness("3600").await;
    h.auth.sign_in("awa@example.ci", PASSWORD).await.unwrap();

    let user = h.auth.update_profile(Some("Awa K.".into()), None).await.unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Awa K."));
    assert_eq!(h.provider.last_body("accounts:update")["returnSecureToken"], false);

    let profile = h.auth.fetch_profile().await.unwrap();
    assert_eq!(profile.local_id, "uid-1");
    assert_eq!(profile.email_verified, Some(true));
}

#[tokio::test]
async fn test_password_reset_request() {
    let h = harness("3600").await;

    h.auth.reset_password("awa@example.ci").await.unwrap();

    let body = h.provider.last_body("accounts:sendOobCode");
    assert_eq!(body["requestType"], "PASSWORD_RESET");
    assert_eq!(body["email"], "awa@example.ci");
}
