//! # Transport Suggestions
//!
//! Turns the suggestions of a route response into what the user picks from.
//!
//! - [`rank`]: sort orders, filtering, renumbering, best pick
//! - [`presentation`]: cards and the board (weather banner, route summary, empty state)
//! - [`modes`]: label, icon and typical fare per mode
//!
//! ```rust
//! use gbaka_client::suggestions::{SortOrder, SuggestionBoard, SuggestionFilter};
//! # fn show(response: &shared::RouteResponse) {
//! let board = SuggestionBoard::build(response, SortOrder::Price, &SuggestionFilter::default());
//! for card in &board.cards {
//!     println!("{} {} {}", card.rank, card.mode_label, card.price_label);
//! }
//! # }
//! ```

pub mod modes;
pub mod presentation;
pub mod rank;

pub use modes::{fare_band, mode_icon, mode_label};
pub use presentation::{RouteSummary, SuggestionBoard, SuggestionCard, WeatherBanner};
pub use rank::{best, filter, rank, renumber, sort, SortOrder, SuggestionFilter};
