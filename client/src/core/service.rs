//! # Service Traits
//!
//! Traits for dependency injection, so front ends and tests can swap the
//! HTTP-backed implementations.

use async_trait::async_trait;
use shared::{
    CompareRoutesRequest, CurrentWeather, Favorite, Forecast, NearbySearchResponse, NewHistoryEntry,
    NewLine, NewReport, OptimizeRouteRequest, Report, ReportsPage, ReportsQuery, RouteQuery,
    RouteResponse, SearchHistory, Stop, StopUpdate, StopsPage, TransportLine,
};

use crate::core::error::Result;
use crate::services::api::{LinesQuery, NearbyQuery, StopsQuery, TransportLinesQuery, WeatherPlace};

/// Trait for backend API operations.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Search stops around a point
    async fn get_stops(&self, params: &StopsQuery) -> Result<StopsPage>;

    /// Get one stop by id
    async fn get_stop(&self, id: &str) -> Result<Stop>;

    /// Submit a community edit of a stop
    async fn update_stop(&self, id: &str, update: &StopUpdate) -> Result<Stop>;

    /// Text and proximity search with optional clustering
    async fn search_nearby(&self, params: &NearbyQuery) -> Result<NearbySearchResponse>;

    async fn get_lines(&self, params: &LinesQuery) -> Result<Vec<TransportLine>>;

    async fn create_line(&self, line: &NewLine) -> Result<TransportLine>;

    /// Lines crossing a bounding box, in the requested map format
    async fn get_transport_lines(&self, params: &TransportLinesQuery) -> Result<serde_json::Value>;

    /// Route with ranked transport suggestions and weather
    async fn get_route(&self, params: &RouteQuery) -> Result<RouteResponse>;

    async fn compare_routes(&self, request: &CompareRoutesRequest) -> Result<serde_json::Value>;

    async fn optimize_route(&self, request: &OptimizeRouteRequest) -> Result<serde_json::Value>;

    async fn get_saved_route(&self, id: &str, weather: bool, alternatives: bool) -> Result<serde_json::Value>;

    async fn get_current_weather(&self, place: &WeatherPlace) -> Result<CurrentWeather>;

    async fn get_forecast(&self, place: &WeatherPlace, hours: Option<u32>, transport: bool) -> Result<Forecast>;

    async fn create_report(&self, report: &NewReport) -> Result<Report>;

    async fn get_reports(&self, params: &ReportsQuery) -> Result<ReportsPage>;

    async fn add_favorite(&self, stop_id: &str) -> Result<Favorite>;

    async fn get_favorites(&self) -> Result<Vec<Favorite>>;

    async fn remove_favorite(&self, stop_id: &str) -> Result<()>;

    /// Never fails; lookup errors read as `false`
    async fn is_favorite(&self, stop_id: &str) -> bool;

    /// Returns the new favorite state
    async fn toggle_favorite(&self, stop_id: &str) -> Result<bool>;

    async fn add_to_history(&self, entry: &NewHistoryEntry) -> Result<SearchHistory>;
}
