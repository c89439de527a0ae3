//! # Line Endpoints
//!
//! Transport lines: listing, community creation and the map overlay by bounding box.

use shared::{BoundingBox, LinesPayload, NewLine, TransportLine, TransportType};

use super::client::{push_flag, ApiClient};
use crate::core::error::{AppError, Result};

/// Parameters of `GET /api/lines`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinesQuery {
    pub transport_type: Option<TransportType>,
    pub active: Option<bool>,
    pub include_stops: bool,
}

impl LinesQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(kind) = self.transport_type {
            query.push(("type", kind.as_query().to_string()));
        }
        if let Some(active) = self.active {
            query.push(("active", active.to_string()));
        }
        push_flag(&mut query, "includeStops", self.include_stops);
        query
    }
}

/// Payload shape requested from `GET /api/transport-lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinesFormat {
    Map,
    Api,
    GeoJson,
}

impl LinesFormat {
    pub fn as_query(&self) -> &'static str {
        match self {
            LinesFormat::Map => "map",
            LinesFormat::Api => "api",
            LinesFormat::GeoJson => "geojson",
        }
    }
}

/// Parameters of `GET /api/transport-lines`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportLinesQuery {
    pub bbox: BoundingBox,
    /// Joined with commas; sent as given.
    pub types: Vec<String>,
    pub format: Option<LinesFormat>,
    pub refresh: bool,
}

impl TransportLinesQuery {
    pub fn new(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            types: Vec::new(),
            format: None,
            refresh: false,
        }
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("north", self.bbox.north.to_string()),
            ("south", self.bbox.south.to_string()),
            ("east", self.bbox.east.to_string()),
            ("west", self.bbox.west.to_string()),
        ];
        if !self.types.is_empty() {
            query.push(("types", self.types.join(",")));
        }
        if let Some(format) = self.format {
            query.push(("format", format.as_query().to_string()));
        }
        push_flag(&mut query, "refresh", self.refresh);
        query
    }
}

#[tracing::instrument(skip(client))]
pub async fn get_lines(client: &ApiClient, params: &LinesQuery) -> Result<Vec<TransportLine>> {
    let payload = client
        .get::<LinesPayload>("/api/lines", &params.to_query())
        .await?
        .into_result("Failed to fetch lines")?;

    tracing::debug!(count = payload.lines.len(), "Lines fetched");
    Ok(payload.lines)
}

#[tracing::instrument(skip(client, line), fields(name = %line.name))]
pub async fn create_line(client: &ApiClient, line: &NewLine) -> Result<TransportLine> {
    if line.name.trim().is_empty() {
        return Err(AppError::Validation("Line name is required".to_string()));
    }

    let created = client
        .post::<_, TransportLine>("/api/lines", line)
        .await?
        .into_result("Failed to create line")?;

    tracing::info!(line_id = %created.id, "Line created");
    Ok(created)
}

/// Map overlay of lines crossing a bounding box.
///
/// The payload depends on the requested format and is returned untyped.
#[tracing::instrument(skip(client, params))]
pub async fn get_transport_lines(
    client: &ApiClient,
    params: &TransportLinesQuery,
) -> Result<serde_json::Value> {
    if !params.bbox.is_valid() {
        return Err(AppError::Validation("Invalid bounding box".to_string()));
    }

    let data = client
        .get::<serde_json::Value>("/api/transport-lines", &params.to_query())
        .await?
        .into_result("Failed to fetch transport lines")?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_query() {
        assert!(LinesQuery::default().to_query().is_empty());

        let query = LinesQuery {
            transport_type: Some(TransportType::Gbaka),
            active: Some(false),
            include_stops: true,
        }
        .to_query();
        assert_eq!(
            query,
            vec![
                ("type", "gbaka".to_string()),
                ("active", "false".to_string()),
                ("includeStops", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_transport_lines_query_joins_types() {
        let mut params = TransportLinesQuery::new(BoundingBox {
            north: 5.4,
            south: 5.3,
            east: -3.9,
            west: -4.1,
        });
        params.types = vec!["bus".into(), "gbaka".into()];
        params.format = Some(LinesFormat::GeoJson);

        let query = params.to_query();
        assert!(query.contains(&("types", "bus,gbaka".to_string())));
        assert!(query.contains(&("format", "geojson".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "refresh"));
    }
}
