//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the GbakaMap client and the two
//! remote systems it talks to: the transit backend and the identity provider.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::transit`]**: stops, transport lines and their enums
//!   - **[`dto::route`]**: coordinates, routes and transport suggestions
//!   - **[`dto::weather`]**: current conditions and forecasts
//!   - **[`dto::community`]**: reports, favorites and search history
//!   - **[`dto::envelope`]**: the `{ success, data, error }` wrapper every backend call returns
//!   - **[`dto::identity`]**: identity provider requests and responses
//! - **[`utils`]**: display formatting for distances, durations and fares
//!
//! ## Wire Format
//!
//! The backend speaks camelCase JSON, so most structs carry
//! `#[serde(rename_all = "camelCase")]`. The weather payloads are the exception:
//! they forward the upstream weather provider's snake_case keys (`feels_like`,
//! `rain_probability`) mixed with a few camelCase ones, and rename field by field.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::envelope::ApiResponse;
//! use shared::dto::transit::Stop;
//!
//! let body = r#"{"success":true,"data":{"id":"s1","name":"Adjamé Liberté","lat":5.35,"lon":-4.02,"stopType":"GBAKA_STOP"}}"#;
//! let response: ApiResponse<Stop> = serde_json::from_str(body).unwrap();
//! let stop = response.into_result("Stop not found").unwrap();
//! assert_eq!(stop.name, "Adjamé Liberté");
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
