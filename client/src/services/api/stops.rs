//! # Stop Endpoints
//!
//! Area search, stop details, community edits and the clustered nearby search.

use shared::{Coordinates, NearbySearchResponse, Stop, StopUpdate, StopsPage, TransportType};

use super::client::{push_flag, ApiClient};
use crate::core::error::{AppError, Result};
use crate::location::DEFAULT_RADIUS_M;

/// Default number of stops per area search.
pub const DEFAULT_STOPS_LIMIT: u32 = 100;

/// Parameters of `GET /api/stops`.
#[derive(Debug, Clone, PartialEq)]
pub struct StopsQuery {
    pub center: Coordinates,
    pub radius: Option<u32>,
    pub transport_type: Option<TransportType>,
    pub limit: Option<u32>,
    pub refresh: bool,
}

impl StopsQuery {
    pub fn near(center: Coordinates) -> Self {
        Self {
            center,
            radius: None,
            transport_type: None,
            limit: None,
            refresh: false,
        }
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("lat", self.center.lat.to_string()),
            ("lon", self.center.lon.to_string()),
            ("radius", self.radius.filter(|r| *r > 0).unwrap_or(DEFAULT_RADIUS_M).to_string()),
            ("limit", self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_STOPS_LIMIT).to_string()),
        ];
        if let Some(kind) = self.transport_type {
            query.push(("type", kind.as_query().to_string()));
        }
        push_flag(&mut query, "refresh", self.refresh);
        query
    }
}

/// Parameters of `GET /api/search/nearby`.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub center: Coordinates,
    pub text: Option<String>,
    pub radius: Option<u32>,
    pub cluster: bool,
    pub zoom: Option<u8>,
    /// Sent verbatim; the search endpoint accepts free-form kinds.
    pub kind: Option<String>,
}

impl NearbyQuery {
    pub fn around(center: Coordinates) -> Self {
        Self {
            center,
            text: None,
            radius: None,
            cluster: false,
            zoom: None,
            kind: None,
        }
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("lat", self.center.lat.to_string()),
            ("lon", self.center.lon.to_string()),
        ];
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            query.push(("q", text.to_string()));
        }
        if let Some(radius) = self.radius.filter(|r| *r > 0) {
            query.push(("radius", radius.to_string()));
        }
        push_flag(&mut query, "cluster", self.cluster);
        if let Some(zoom) = self.zoom.filter(|z| *z > 0) {
            query.push(("zoom", zoom.to_string()));
        }
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            query.push(("type", kind.to_string()));
        }
        query
    }
}

/// Search stops around a point.
#[tracing::instrument(skip(client), fields(lat = params.center.lat, lon = params.center.lon))]
pub async fn get_stops(client: &ApiClient, params: &StopsQuery) -> Result<StopsPage> {
    let page = client
        .get::<StopsPage>("/api/stops", &params.to_query())
        .await?
        .into_result("Failed to fetch stops")?;

    tracing::debug!(count = page.count, total = page.total, from_cache = page.from_cache, "Stops fetched");
    Ok(page)
}

/// Details of one stop.
#[tracing::instrument(skip(client))]
pub async fn get_stop(client: &ApiClient, id: &str) -> Result<Stop> {
    let stop = client
        .get::<Stop>(&format!("/api/stops/{}", id), &[])
        .await?
        .into_result("Stop not found")?;
    Ok(stop)
}

/// Submit a community edit of a stop.
#[tracing::instrument(skip(client, update))]
pub async fn update_stop(client: &ApiClient, id: &str, update: &StopUpdate) -> Result<Stop> {
    if update.is_empty() {
        return Err(AppError::Validation("Nothing to update".to_string()));
    }

    let stop = client
        .patch::<_, Stop>(&format!("/api/stops/{}", id), update)
        .await?
        .into_result("Failed to update stop")?;

    tracing::info!(stop_id = %stop.id, "Stop updated");
    Ok(stop)
}

/// Hybrid text and proximity search, with optional clustering.
#[tracing::instrument(skip(client, params), fields(q = ?params.text))]
pub async fn search_nearby(client: &ApiClient, params: &NearbyQuery) -> Result<NearbySearchResponse> {
    let response = client
        .get::<NearbySearchResponse>("/api/search/nearby", &params.to_query())
        .await?
        .into_result("Search failed")?;

    tracing::debug!(groups = response.results.len(), "Nearby search completed");
    Ok(response)
}
