//! View model of a route result: weather banner, route summary and one card
//! per transport suggestion.
//!
//! Building a board never mutates the [`RouteResponse`] it reads from.

use serde::Serialize;
use shared::{
    format_distance_km, format_price_range, minutes_from_seconds, Route, RouteResponse, RouteWeather,
    SuggestionMode, TransportSuggestion,
};

use super::modes::{fare_band, mode_icon, mode_label};
use super::rank::{self, SortOrder, SuggestionFilter};

pub const EMPTY_TITLE: &str = "Plan your trip";
pub const EMPTY_MESSAGE: &str = "Enter your starting point and destination to get suggestions";

/// One suggestion, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionCard {
    pub rank: u32,
    pub mode: SuggestionMode,
    pub mode_label: String,
    pub icon: &'static str,
    pub reason: String,
    /// `"82/100"`
    pub score_label: String,
    /// `"~22 min"`
    pub duration_label: String,
    pub distance_label: String,
    pub price_label: String,
    /// Usual fare band for the mode, next to the quoted price.
    pub typical_fare: Option<&'static str>,
    pub availability_label: &'static str,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub advice: Vec<String>,
    pub time_factors: Vec<String>,
}

impl SuggestionCard {
    pub fn from_suggestion(suggestion: &TransportSuggestion) -> Self {
        Self {
            rank: suggestion.rank,
            mode: suggestion.mode.clone(),
            mode_label: mode_label(&suggestion.mode).to_string(),
            icon: mode_icon(&suggestion.mode),
            reason: suggestion.reason.clone(),
            score_label: score_label(suggestion.overall_score),
            duration_label: format!("~{} min", minutes_from_seconds(suggestion.duration)),
            distance_label: format_distance_km(suggestion.distance),
            price_label: format_price_range(suggestion.price_range.min, suggestion.price_range.max),
            typical_fare: fare_band(&suggestion.mode),
            availability_label: suggestion.availability.label(),
            pros: suggestion.pros.clone(),
            cons: suggestion.cons.clone(),
            advice: suggestion.advice.clone().unwrap_or_default(),
            time_factors: suggestion.time_factors.clone().unwrap_or_default(),
        }
    }
}

fn score_label(score: f64) -> String {
    if score.is_finite() {
        format!("{}/100", score.round() as i64)
    } else {
        "-/100".to_string()
    }
}

/// Current conditions and the backend's advice for the trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherBanner {
    pub conditions: String,
    pub advice: Vec<String>,
    pub raining: bool,
}

impl From<&RouteWeather> for WeatherBanner {
    fn from(weather: &RouteWeather) -> Self {
        Self {
            conditions: weather.conditions.clone(),
            advice: weather.advice.clone(),
            raining: weather.details.is_raining,
        }
    }
}

/// Distance and duration of the primary route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_label: String,
    pub duration_label: String,
    pub alternatives: usize,
}

impl RouteSummary {
    fn new(route: &Route, alternatives: usize) -> Self {
        Self {
            distance_label: format_distance_km(route.distance),
            duration_label: format!("{} min", minutes_from_seconds(route.duration)),
            alternatives,
        }
    }
}

/// Everything the route screen shows after a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionBoard {
    pub weather: Option<WeatherBanner>,
    pub route: Option<RouteSummary>,
    pub cards: Vec<SuggestionCard>,
    /// Suggestions hidden by the filter.
    pub hidden: usize,
    #[serde(skip)]
    calculated: bool,
}

impl SuggestionBoard {
    /// Board in server order with nothing filtered.
    pub fn from_response(response: &RouteResponse) -> Self {
        Self::build(response, SortOrder::Rank, &SuggestionFilter::default())
    }

    /// Filter, then sort. Any order other than [`SortOrder::Rank`] renumbers
    /// the cards so badges follow the visible order.
    pub fn build(response: &RouteResponse, order: SortOrder, filter: &SuggestionFilter) -> Self {
        let all = response.suggestions();
        let mut visible = rank::filter(all, filter);
        rank::sort(&mut visible, order);
        if order != SortOrder::Rank {
            rank::renumber(&mut visible);
        }

        Self {
            weather: response.weather.as_ref().map(WeatherBanner::from),
            route: response
                .primary_route()
                .map(|r| RouteSummary::new(r, response.routes.len().saturating_sub(1))),
            cards: visible.iter().map(SuggestionCard::from_suggestion).collect(),
            hidden: all.len() - visible.len(),
            calculated: true,
        }
    }

    /// Nothing calculated yet. A calculation that came back without routes
    /// or suggestions still counts as calculated.
    pub fn is_empty(&self) -> bool {
        !self.calculated
    }

    /// Title of the suggestion list, `None` when there is nothing to list.
    pub fn header(&self) -> Option<String> {
        if self.cards.is_empty() {
            None
        } else {
            Some(format!("Transport suggestions ({})", self.cards.len()))
        }
    }

    /// Title and message of the empty state, when it applies.
    pub fn empty_state(&self) -> Option<(&'static str, &'static str)> {
        self.is_empty().then_some((EMPTY_TITLE, EMPTY_MESSAGE))
    }

    pub fn best(&self) -> Option<&SuggestionCard> {
        self.cards.first()
    }
}
