//! # Core Abstractions
//!
//! Error type and service traits shared by every part of the client.
//!
//! - **[`error`]**: `AppError` and the `Result<T>` alias
//! - **[`service`]**: `ApiService`, the backend seam
//!
//! The identity provider seam lives next to its implementation in
//! [`crate::services::auth::identity`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gbaka_client::core::ApiService;
//! use gbaka_client::services::api::ApiClient;
//!
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::ApiService;
