//! # Services
//!
//! - [`api`] - backend REST client
//! - [`auth`] - identity provider and session lifecycle
//! - [`session`] - credential persistence

pub mod api;
pub mod auth;
pub mod session;

pub use api::ApiClient;
pub use auth::AuthService;
pub use session::{AuthUser, CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredSession};
