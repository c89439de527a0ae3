//! # GbakaMap Client
//!
//! Client SDK for the GbakaMap public transport service in Abidjan: stop and
//! line search, route calculation with weather-aware transport suggestions,
//! favorites, search history and community reports, plus the identity-provider
//! session that authorizes them.
//!
//! ## Module Structure
//!
//! - [`config`] - environment configuration
//! - [`core`] - error type and the backend service trait
//! - [`services`] - HTTP backend client, authentication, credential storage
//! - [`suggestions`] - ranking and presentation of transport suggestions
//! - [`utils`] - form validation
//! - [`location`] - search origin and radius
//! - [`logging`] - file logging and trace IDs
//! - [`cli`] - the `gbaka` command line front end

pub mod cli;
pub mod config;
pub mod core;
pub mod location;
pub mod logging;
pub mod services;
pub mod suggestions;
pub mod utils;

pub use config::ClientConfig;
pub use core::{ApiService, AppError, Result};
pub use services::{ApiClient, AuthService};
pub use suggestions::{SortOrder, SuggestionBoard, SuggestionFilter};
