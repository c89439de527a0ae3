//! Coordinates, routes and transport suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transit::{Stop, TransportType};
use super::weather::{Weather, WeatherImpact};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `lat,lon` form used by the route endpoint.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

// region:    --- Coordinates parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatesParseError {
    Format(String),
    OutOfRange(String),
}

impl fmt::Display for CoordinatesParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatesParseError::Format(input) => {
                write!(f, "expected 'lat,lon' but got '{}'", input)
            }
            CoordinatesParseError::OutOfRange(input) => {
                write!(f, "coordinates out of range: '{}'", input)
            }
        }
    }
}

impl std::error::Error for CoordinatesParseError {}

impl FromStr for Coordinates {
    type Err = CoordinatesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordinatesParseError::Format(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoordinatesParseError::Format(s.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| CoordinatesParseError::Format(s.to_string()))?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinatesParseError::OutOfRange(s.to_string()));
        }

        Ok(Coordinates { lat, lon })
    }
}
// endregion: --- Coordinates parsing

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn is_valid(&self) -> bool {
        self.north > self.south && self.east > self.west
    }
}

/// GeoJSON LineString geometry of a route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    pub geometry: LineString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legs: Option<Vec<RouteLeg>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
    pub summary: String,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStep {
    pub distance: f64,
    pub duration: f64,
    pub name: String,
    pub instruction: String,
}

// region:    --- Suggestions

/// Transport mode of a suggestion.
///
/// Suggestions use lowercase mode names and include `walking`, which is not a
/// [`TransportType`]. Unknown names are kept verbatim so new backend modes
/// still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SuggestionMode {
    Bus,
    Gbaka,
    WoroWoro,
    Taxi,
    MotoTaxi,
    Walking,
    Other(String),
}

impl SuggestionMode {
    pub fn as_str(&self) -> &str {
        match self {
            SuggestionMode::Bus => "bus",
            SuggestionMode::Gbaka => "gbaka",
            SuggestionMode::WoroWoro => "woro_woro",
            SuggestionMode::Taxi => "taxi",
            SuggestionMode::MotoTaxi => "moto_taxi",
            SuggestionMode::Walking => "walking",
            SuggestionMode::Other(name) => name,
        }
    }

    pub fn transport_type(&self) -> Option<TransportType> {
        match self {
            SuggestionMode::Bus => Some(TransportType::Bus),
            SuggestionMode::Gbaka => Some(TransportType::Gbaka),
            SuggestionMode::WoroWoro => Some(TransportType::WoroWoro),
            SuggestionMode::Taxi => Some(TransportType::Taxi),
            SuggestionMode::MotoTaxi => Some(TransportType::MotoTaxi),
            SuggestionMode::Walking | SuggestionMode::Other(_) => None,
        }
    }
}

impl From<String> for SuggestionMode {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "bus" => SuggestionMode::Bus,
            "gbaka" => SuggestionMode::Gbaka,
            "woro_woro" | "woroworo" => SuggestionMode::WoroWoro,
            "taxi" => SuggestionMode::Taxi,
            "moto_taxi" | "mototaxi" => SuggestionMode::MotoTaxi,
            "walking" | "walk" => SuggestionMode::Walking,
            _ => SuggestionMode::Other(value),
        }
    }
}

impl From<SuggestionMode> for String {
    fn from(mode: SuggestionMode) -> Self {
        mode.as_str().to_string()
    }
}

impl From<TransportType> for SuggestionMode {
    fn from(value: TransportType) -> Self {
        match value {
            TransportType::Bus => SuggestionMode::Bus,
            TransportType::Gbaka => SuggestionMode::Gbaka,
            TransportType::WoroWoro => SuggestionMode::WoroWoro,
            TransportType::Taxi => SuggestionMode::Taxi,
            TransportType::MotoTaxi => SuggestionMode::MotoTaxi,
        }
    }
}

impl FromStr for SuggestionMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SuggestionMode::from(s.replace('-', "_")))
    }
}

/// How easy it is to find the mode right now. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Low,
    Medium,
    High,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Low => "low",
            Availability::Medium => "medium",
            Availability::High => "high",
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Availability::Low),
            "medium" => Ok(Availability::Medium),
            "high" => Ok(Availability::High),
            other => Err(format!("unknown availability '{}' (expected low, medium or high)", other)),
        }
    }
}

/// Fare band in FCFA.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NearbyStops {
    #[serde(default)]
    pub start: Vec<Stop>,
    #[serde(default)]
    pub end: Vec<Stop>,
}

/// A ranked transport-mode recommendation computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransportSuggestion {
    pub mode: SuggestionMode,
    pub reason: String,
    pub price_range: PriceRange,
    /// Seconds.
    pub duration: f64,
    /// Meters.
    pub distance: f64,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    pub availability: Availability,
    pub weather_score: f64,
    pub overall_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_factors: Option<Vec<String>>,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_stops: Option<NearbyStops>,
}

// endregion: --- Suggestions

/// Weather block attached to a route response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteWeather {
    pub conditions: String,
    pub details: Weather,
    pub impact: WeatherImpact,
    #[serde(default)]
    pub advice: Vec<String>,
}

/// `data` payload of `GET /api/route`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<TransportSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<RouteWeather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_transport: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl RouteResponse {
    pub fn primary_route(&self) -> Option<&Route> {
        self.routes.first()
    }

    pub fn suggestions(&self) -> &[TransportSuggestion] {
        self.suggestions.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
}

impl TravelMode {
    pub fn as_query(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
        }
    }
}

/// Query for `GET /api/route`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub from: Coordinates,
    pub to: Coordinates,
    pub mode: Option<TravelMode>,
    pub alternatives: bool,
    pub suggestions: bool,
    pub weather: bool,
}

impl RouteQuery {
    /// Suggestions and weather are requested unless explicitly turned off.
    pub fn new(from: Coordinates, to: Coordinates) -> Self {
        Self {
            from,
            to,
            mode: None,
            alternatives: false,
            suggestions: true,
            weather: true,
        }
    }

    /// Swap origin and destination.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedTrip {
    pub from: Coordinates,
    pub to: Coordinates,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComparePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritize_speed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consider_weather: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritize_cost: Option<bool>,
}

/// Body of `POST /api/route/compare`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareRoutesRequest {
    pub routes: Vec<NamedTrip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<ComparePreferences>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<Coordinates> for Waypoint {
    fn from(c: Coordinates) -> Self {
        Waypoint {
            lat: c.lat,
            lon: c.lon,
            name: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_traffic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consider_weather: Option<bool>,
}

/// Body of `POST /api/route/optimize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizeRouteRequest {
    pub waypoints: Vec<Waypoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<OptimizePreferences>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_parse() {
        let c: Coordinates = "5.3364, -4.0267".parse().unwrap();
        assert_eq!(c, Coordinates::new(5.3364, -4.0267));
        assert_eq!(c.to_query(), "5.3364,-4.0267");

        assert!(matches!("5.3".parse::<Coordinates>(), Err(CoordinatesParseError::Format(_))));
        assert!(matches!("abc,def".parse::<Coordinates>(), Err(CoordinatesParseError::Format(_))));
        assert!(matches!("95,0".parse::<Coordinates>(), Err(CoordinatesParseError::OutOfRange(_))));
    }

    #[test]
    fn test_suggestion_mode_keeps_unknown_names() {
        let modes: Vec<SuggestionMode> =
            serde_json::from_str(r#"["gbaka","walking","boat","MOTO_TAXI"]"#).unwrap();
        assert_eq!(
            modes,
            vec![
                SuggestionMode::Gbaka,
                SuggestionMode::Walking,
                SuggestionMode::Other("boat".to_string()),
                SuggestionMode::MotoTaxi,
            ]
        );
        assert_eq!(serde_json::to_string(&SuggestionMode::WoroWoro).unwrap(), "\"woro_woro\"");
        assert_eq!(SuggestionMode::Walking.transport_type(), None);
    }

    #[test]
    fn test_availability_ordering() {
        assert!(Availability::Low < Availability::Medium);
        assert!(Availability::Medium < Availability::High);
        assert_eq!("HIGH".parse::<Availability>().unwrap(), Availability::High);
    }

    #[test]
    fn test_route_response_without_optional_blocks() {
        let json = r#"{
            "routes": [{"distance": 5400, "duration": 960, "geometry": {"type": "LineString", "coordinates": [[-4.02, 5.33], [-3.99, 5.36]]}}],
            "suggestions": [{
                "mode": "gbaka", "reason": "Fast", "priceRange": {"min": 100, "max": 250},
                "duration": 1200, "distance": 5400, "pros": ["Cheap"], "cons": [],
                "availability": "high", "weatherScore": 80, "overallScore": 87.5, "rank": 1
            }],
            "metadata": {"provider": "osrm"}
        }"#;

        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.primary_route().unwrap().geometry.coordinates.len(), 2);
        assert_eq!(response.suggestions().len(), 1);
        assert_eq!(response.suggestions()[0].overall_score, 87.5);
        assert!(response.weather.is_none());
    }

    #[test]
    fn test_route_query_defaults_and_reverse() {
        let query = RouteQuery::new(Coordinates::new(1.0, 2.0), Coordinates::new(3.0, 4.0));
        assert!(query.suggestions);
        assert!(query.weather);
        assert!(!query.alternatives);

        let reversed = query.reversed();
        assert_eq!(reversed.from, Coordinates::new(3.0, 4.0));
        assert_eq!(reversed.to, Coordinates::new(1.0, 2.0));
    }
}
