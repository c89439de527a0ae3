//! # Data Transfer Objects (DTOs)
//!
//! Structures exchanged with the transit backend and the identity provider.
//!
//! ## Module Organization
//!
//! - [`transit`] - Stops, transport lines, and the stop/line query payloads
//! - [`route`] - Coordinates, routes, route requests and transport suggestions
//! - [`weather`] - Current weather and hourly forecasts
//! - [`community`] - Reports, favorites and search history
//! - [`envelope`] - The standard backend response wrapper
//! - [`identity`] - Identity provider (Firebase Authentication REST) payloads
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /api/route?from=5.3364,-4.0267&to=5.3600,-3.9900&suggestions=true&weather=true
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "success": true,
//!   "data": {
//!     "routes": [{ "distance": 5400, "duration": 960, "geometry": { "type": "LineString", "coordinates": [] } }],
//!     "suggestions": [{
//!       "mode": "gbaka", "reason": "Fast and cheap on this corridor",
//!       "priceRange": { "min": 100, "max": 250 }, "duration": 1200, "distance": 5400,
//!       "pros": ["Cheap"], "cons": ["Crowded"], "availability": "high",
//!       "weatherScore": 80, "overallScore": 87, "rank": 1
//!     }],
//!     "metadata": {}
//!   }
//! }
//! ```

pub mod community;
pub mod envelope;
pub mod identity;
pub mod route;
pub mod transit;
pub mod weather;

pub use community::*;
pub use envelope::*;
pub use identity::*;
pub use route::*;
pub use transit::*;
pub use weather::*;
