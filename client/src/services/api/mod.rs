//! # Backend API Client Module
//!
//! HTTP client for the GbakaMap backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and ApiService implementation
//! ├── client.rs     - ApiClient, token handling, envelope decoding
//! ├── stops.rs      - Stop search, details, edits, nearby search
//! ├── lines.rs      - Transport lines and map overlay
//! ├── routes.rs     - Route calculation, comparison, optimisation
//! ├── weather.rs    - Current weather and forecast
//! └── community.rs  - Reports, favorites, search history
//! ```

pub mod client;
pub mod community;
pub mod lines;
pub mod routes;
pub mod stops;
pub mod weather;

pub use client::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use lines::{LinesFormat, LinesQuery, TransportLinesQuery};
pub use stops::{NearbyQuery, StopsQuery, DEFAULT_STOPS_LIMIT};
pub use weather::WeatherPlace;

use async_trait::async_trait;
use shared::{
    CompareRoutesRequest, CurrentWeather, Favorite, Forecast, NearbySearchResponse, NewHistoryEntry,
    NewLine, NewReport, OptimizeRouteRequest, Report, ReportsPage, ReportsQuery, RouteQuery,
    RouteResponse, SearchHistory, Stop, StopUpdate, StopsPage, TransportLine,
};

use crate::core::error::Result;
use crate::core::service::ApiService;

#[async_trait]
impl ApiService for ApiClient {
    async fn get_stops(&self, params: &StopsQuery) -> Result<StopsPage> {
        stops::get_stops(self, params).await
    }

    async fn get_stop(&self, id: &str) -> Result<Stop> {
        stops::get_stop(self, id).await
    }

    async fn update_stop(&self, id: &str, update: &StopUpdate) -> Result<Stop> {
        stops::update_stop(self, id, update).await
    }

    async fn search_nearby(&self, params: &NearbyQuery) -> Result<NearbySearchResponse> {
        stops::search_nearby(self, params).await
    }

    async fn get_lines(&self, params: &LinesQuery) -> Result<Vec<TransportLine>> {
        lines::get_lines(self, params).await
    }

    async fn create_line(&self, line: &NewLine) -> Result<TransportLine> {
        lines::create_line(self, line).await
    }

    async fn get_transport_lines(&self, params: &TransportLinesQuery) -> Result<serde_json::Value> {
        lines::get_transport_lines(self, params).await
    }

    async fn get_route(&self, params: &RouteQuery) -> Result<RouteResponse> {
        routes::get_route(self, params).await
    }

    async fn compare_routes(&self, request: &CompareRoutesRequest) -> Result<serde_json::Value> {
        routes::compare_routes(self, request).await
    }

    async fn optimize_route(&self, request: &OptimizeRouteRequest) -> Result<serde_json::Value> {
        routes::optimize_route(self, request).await
    }

    async fn get_saved_route(&self, id: &str, weather: bool, alternatives: bool) -> Result<serde_json::Value> {
        routes::get_saved_route(self, id, weather, alternatives).await
    }

    async fn get_current_weather(&self, place: &WeatherPlace) -> Result<CurrentWeather> {
        weather::get_current_weather(self, place).await
    }

    async fn get_forecast(&self, place: &WeatherPlace, hours: Option<u32>, transport: bool) -> Result<Forecast> {
        weather::get_forecast(self, place, hours, transport).await
    }

    async fn create_report(&self, report: &NewReport) -> Result<Report> {
        community::create_report(self, report).await
    }

    async fn get_reports(&self, params: &ReportsQuery) -> Result<ReportsPage> {
        community::get_reports(self, params).await
    }

    async fn add_favorite(&self, stop_id: &str) -> Result<Favorite> {
        community::add_favorite(self, stop_id).await
    }

    async fn get_favorites(&self) -> Result<Vec<Favorite>> {
        community::get_favorites(self).await
    }

    async fn remove_favorite(&self, stop_id: &str) -> Result<()> {
        community::remove_favorite(self, stop_id).await
    }

    async fn is_favorite(&self, stop_id: &str) -> bool {
        community::is_favorite(self, stop_id).await
    }

    async fn toggle_favorite(&self, stop_id: &str) -> Result<bool> {
        community::toggle_favorite(self, stop_id).await
    }

    async fn add_to_history(&self, entry: &NewHistoryEntry) -> Result<SearchHistory> {
        community::add_to_history(self, entry).await
    }
}
