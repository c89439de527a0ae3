//! # Weather Endpoints
//!
//! Current conditions and hourly forecast, by city name or coordinates.

use shared::{Coordinates, CurrentWeather, Forecast};

use super::client::{push_flag, ApiClient};
use crate::core::error::{AppError, Result};

/// Where to ask the weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherPlace {
    City(String),
    Coords(Coordinates),
}

impl WeatherPlace {
    /// A non-blank city wins over coordinates; both coordinates are needed otherwise.
    pub fn from_parts(city: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> Result<Self> {
        if let Some(city) = city.map(str::trim).filter(|c| !c.is_empty()) {
            return Ok(WeatherPlace::City(city.to_string()));
        }
        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(WeatherPlace::Coords(Coordinates::new(lat, lon))),
            _ => Err(AppError::Validation("City or coordinates required".to_string())),
        }
    }

    fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        match self {
            WeatherPlace::City(city) => query.push(("q", city.clone())),
            WeatherPlace::Coords(c) => {
                query.push(("lat", c.lat.to_string()));
                query.push(("lon", c.lon.to_string()));
            }
        }
    }
}

#[tracing::instrument(skip(client))]
pub async fn get_current_weather(client: &ApiClient, place: &WeatherPlace) -> Result<CurrentWeather> {
    let mut query = Vec::new();
    place.push_query(&mut query);
    query.push(("type", "current".to_string()));

    let weather = client
        .get::<CurrentWeather>("/api/weather", &query)
        .await?
        .into_result("Weather unavailable")?;

    tracing::debug!(location = %weather.location.name, temp = weather.current.temp, "Weather fetched");
    Ok(weather)
}

/// Hourly forecast. `transport` asks for per-mode suitability scores.
#[tracing::instrument(skip(client))]
pub async fn get_forecast(
    client: &ApiClient,
    place: &WeatherPlace,
    hours: Option<u32>,
    transport: bool,
) -> Result<Forecast> {
    let mut query = Vec::new();
    place.push_query(&mut query);
    if let Some(hours) = hours.filter(|h| *h > 0) {
        query.push(("hours", hours.to_string()));
    }
    push_flag(&mut query, "transport", transport);

    let forecast = client
        .get::<Forecast>("/api/weather/forecast", &query)
        .await?
        .into_result("Forecast unavailable")?;

    tracing::debug!(hours = forecast.forecasts.len(), "Forecast fetched");
    Ok(forecast)
}
