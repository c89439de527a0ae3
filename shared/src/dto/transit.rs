//! Stops and transport lines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Informal and formal transport modes known to the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportType {
    Bus,
    Gbaka,
    WoroWoro,
    Taxi,
    MotoTaxi,
}

impl TransportType {
    pub fn all() -> &'static [TransportType] {
        &[
            TransportType::Bus,
            TransportType::Gbaka,
            TransportType::WoroWoro,
            TransportType::Taxi,
            TransportType::MotoTaxi,
        ]
    }

    /// Lowercase form used in query strings (`woro_woro`, `moto_taxi`).
    pub fn as_query(&self) -> &'static str {
        match self {
            TransportType::Bus => "bus",
            TransportType::Gbaka => "gbaka",
            TransportType::WoroWoro => "woro_woro",
            TransportType::Taxi => "taxi",
            TransportType::MotoTaxi => "moto_taxi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransportType::Bus => "Bus",
            TransportType::Gbaka => "Gbaka",
            TransportType::WoroWoro => "Wôrô-wôrô",
            TransportType::Taxi => "Taxi",
            TransportType::MotoTaxi => "Moto-taxi",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a transport type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransportType(pub String);

impl fmt::Display for UnknownTransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown transport type '{}' (expected bus, gbaka, woro_woro, taxi or moto_taxi)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTransportType {}

impl FromStr for TransportType {
    type Err = UnknownTransportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "bus" => Ok(TransportType::Bus),
            "gbaka" => Ok(TransportType::Gbaka),
            "woro_woro" | "woroworo" => Ok(TransportType::WoroWoro),
            "taxi" => Ok(TransportType::Taxi),
            "moto_taxi" | "mototaxi" => Ok(TransportType::MotoTaxi),
            _ => Err(UnknownTransportType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopType {
    Station,
    BusStop,
    GbakaStop,
    TaxiStand,
}

impl StopType {
    pub fn label(&self) -> &'static str {
        match self {
            StopType::Station => "Station",
            StopType::BusStop => "Bus stop",
            StopType::GbakaStop => "Gbaka stop",
            StopType::TaxiStand => "Taxi stand",
        }
    }
}

/// A physical boarding point as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub stop_type: StopType,
    /// Distance from the query point in meters, only set by proximity searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bench: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gbaka: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub woroworo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mototaxi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<TransportLine>>,
}

impl Stop {
    /// Transport modes served at this stop according to its flags.
    pub fn served_modes(&self) -> Vec<TransportType> {
        let mut modes = Vec::new();
        if self.gbaka == Some(true) {
            modes.push(TransportType::Gbaka);
        }
        if self.woroworo == Some(true) {
            modes.push(TransportType::WoroWoro);
        }
        if self.taxi == Some(true) {
            modes.push(TransportType::Taxi);
        }
        if self.mototaxi == Some(true) {
            modes.push(TransportType::MotoTaxi);
        }
        modes
    }

    pub fn lines(&self) -> &[TransportLine] {
        self.lines.as_deref().unwrap_or(&[])
    }

    /// `geo:` URI that opens the stop in the platform map application.
    pub fn geo_uri(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_string() } else { percent(c) })
            .collect();
        format!("geo:{},{}?q={},{}({})", self.lat, self.lon, self.lat, self.lon, name)
    }
}

fn percent(c: char) -> String {
    if matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')') {
        return c.to_string();
    }
    let mut buf = [0u8; 4];
    c.encode_utf8(&mut buf)
        .bytes()
        .map(|b| format!("%{:02X}", b))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransportLine {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub color: String,
    pub transport_type: TransportType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<Stop>>,
}

impl TransportLine {
    /// Short name when present, otherwise the full name.
    pub fn badge(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// `data` payload of `GET /api/stops`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StopsPage {
    pub stops: Vec<Stop>,
    pub count: u32,
    pub total: u32,
    pub from_cache: bool,
    pub radius: f64,
}

/// Body of `PATCH /api/stops/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StopUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bench: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheelchair: Option<bool>,
}

impl StopUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.shelter.is_none() && self.bench.is_none() && self.wheelchair.is_none()
    }
}

/// `data` payload of `GET /api/search/nearby`.
///
/// Results come grouped (by source or by cluster); only the stop items are
/// typed, the rest of each group is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<NearbyResultGroup>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NearbyResultGroup {
    #[serde(default)]
    pub items: Vec<Stop>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NearbySearchResponse {
    /// All stops across every result group, in group order.
    pub fn stops(&self) -> Vec<Stop> {
        self.results
            .iter()
            .flat_map(|group| group.items.iter().cloned())
            .collect()
    }
}

/// `data` payload of `GET /api/lines`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinesPayload {
    pub lines: Vec<TransportLine>,
}

/// Body of `POST /api/lines`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub transport_type: TransportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_deserializes_camel_case() {
        let json = r##"{
            "id": "stop-1",
            "osmId": "node/42",
            "name": "Gare Sud",
            "lat": 5.3201,
            "lon": -4.0189,
            "stopType": "STATION",
            "ratingCount": 12,
            "gbaka": true,
            "taxi": true,
            "lines": [{"id":"l1","name":"Ligne 81","shortName":"81","color":"#ff0000","transportType":"BUS"}]
        }"##;

        let stop: Stop = serde_json::from_str(json).unwrap();
        assert_eq!(stop.osm_id.as_deref(), Some("node/42"));
        assert_eq!(stop.stop_type, StopType::Station);
        assert_eq!(stop.rating_count, Some(12));
        assert_eq!(stop.lines().len(), 1);
        assert_eq!(stop.lines()[0].badge(), "81");
        assert_eq!(stop.served_modes(), vec![TransportType::Gbaka, TransportType::Taxi]);
    }

    #[test]
    fn test_transport_type_wire_and_query_forms() {
        assert_eq!(serde_json::to_string(&TransportType::WoroWoro).unwrap(), "\"WORO_WORO\"");
        assert_eq!(TransportType::MotoTaxi.as_query(), "moto_taxi");
        assert_eq!("woro-woro".parse::<TransportType>().unwrap(), TransportType::WoroWoro);
        assert_eq!("GBAKA".parse::<TransportType>().unwrap(), TransportType::Gbaka);
        assert!("tram".parse::<TransportType>().is_err());
    }

    #[test]
    fn test_nearby_search_flattens_groups() {
        let json = r#"{
            "results": [
                {"source": "db", "items": [{"id":"a","name":"A","lat":0.0,"lon":0.0,"stopType":"BUS_STOP"}]},
                {"source": "osm"},
                {"source": "cluster", "items": [{"id":"b","name":"B","lat":0.0,"lon":0.0,"stopType":"TAXI_STAND"}]}
            ],
            "total": 2
        }"#;

        let response: NearbySearchResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<String> = response.stops().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(response.extra.get("total"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_stop_update_skips_unset_fields() {
        let update = StopUpdate {
            shelter: Some(true),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"shelter":true}"#);
        assert!(!update.is_empty());
        assert!(StopUpdate::default().is_empty());
    }

    #[test]
    fn test_geo_uri_encodes_name() {
        let stop = Stop {
            id: "s".into(),
            osm_id: None,
            name: "Gare Sud".into(),
            lat: 5.5,
            lon: -4.0,
            stop_type: StopType::Station,
            distance: None,
            shelter: None,
            bench: None,
            wheelchair: None,
            rating: None,
            rating_count: None,
            gbaka: None,
            woroworo: None,
            taxi: None,
            mototaxi: None,
            verified: None,
            last_updated: None,
            lines: None,
        };
        assert_eq!(stop.geo_uri(), "geo:5.5,-4?q=5.5,-4(Gare%20Sud)");
    }
}
