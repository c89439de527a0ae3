//! Weather payloads.
//!
//! Field names mirror what the backend forwards from its weather provider,
//! which mixes snake_case and camelCase keys.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Weather {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub description: String,
    pub main: String,
    pub icon: String,
    #[serde(rename = "isRaining")]
    pub is_raining: bool,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
    pub visibility: f64,
    #[serde(rename = "cloudCover")]
    pub cloud_cover: f64,
}

/// Per-mode weather suitability scores (0-100).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherImpact {
    pub walking_score: f64,
    pub mototaxi_score: f64,
    pub public_transport_score: f64,
    pub open_transport_score: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherLocation {
    pub name: String,
    pub country: String,
    pub coord: GeoPoint,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Wind {
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

/// `data` payload of `GET /api/weather?type=current`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    pub location: WeatherLocation,
    pub current: Weather,
    pub wind: Wind,
    pub clouds: f64,
    pub sun: SunTimes,
    pub timestamp: i64,
    #[serde(rename = "transportAdvice", default)]
    pub transport_advice: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastConditions {
    pub humidity: f64,
    pub pressure: f64,
    pub clouds: f64,
    pub wind: Wind,
    pub visibility: f64,
    pub rain_probability: f64,
    pub rain_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModeSuitability {
    pub score: f64,
    #[serde(default)]
    pub advice: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportSuitability {
    pub walking: ModeSuitability,
    pub moto_taxi: ModeSuitability,
    pub open_transport: ModeSuitability,
    pub covered_transport: ModeSuitability,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastHour {
    pub datetime: String,
    pub timestamp: i64,
    pub hour: u8,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_range: TempRange,
    pub weather: WeatherSummary,
    pub conditions: ForecastConditions,
    #[serde(
        rename = "transportSuitability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transport_suitability: Option<TransportSuitability>,
}

/// `data` payload of `GET /api/weather/forecast`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    #[serde(default)]
    pub location: serde_json::Value,
    #[serde(default)]
    pub forecasts: Vec<ForecastHour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_impact: Option<serde_json::Value>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub hours_requested: u32,
    #[serde(default)]
    pub generated_at: String,
}

impl Forecast {
    /// First hour whose rain probability reaches `threshold` (0-1 or 0-100, as sent).
    pub fn first_rainy_hour(&self, threshold: f64) -> Option<&ForecastHour> {
        self.forecasts
            .iter()
            .find(|hour| hour.conditions.rain_probability >= threshold)
    }
}
