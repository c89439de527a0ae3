//! Ordering, filtering and renumbering of transport suggestions.
//!
//! The backend computes the scores; this module only decides the order in
//! which they are shown. Every sort here is stable and total, NaN scores
//! included, so the same input always yields the same list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use shared::{Availability, SuggestionMode, TransportSuggestion};

use super::modes::mode_label;

/// Order in which suggestions are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Server rank ascending; ties by overall score, then weather score, then mode label.
    #[default]
    Rank,
    /// Overall score, best first.
    OverallScore,
    /// Weather score, best first.
    WeatherScore,
    /// Cheapest first, by minimum then maximum fare.
    Price,
    /// Fastest first.
    Duration,
}

impl SortOrder {
    pub fn all() -> &'static [SortOrder] {
        &[
            SortOrder::Rank,
            SortOrder::OverallScore,
            SortOrder::WeatherScore,
            SortOrder::Price,
            SortOrder::Duration,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Rank => "rank",
            SortOrder::OverallScore => "score",
            SortOrder::WeatherScore => "weather",
            SortOrder::Price => "price",
            SortOrder::Duration => "duration",
        }
    }

    /// Compare two suggestions under this order.
    pub fn compare(&self, a: &TransportSuggestion, b: &TransportSuggestion) -> Ordering {
        match self {
            SortOrder::Rank => a
                .rank
                .cmp(&b.rank)
                .then_with(|| descending(a.overall_score, b.overall_score))
                .then_with(|| descending(a.weather_score, b.weather_score))
                .then_with(|| mode_label(&a.mode).cmp(mode_label(&b.mode))),
            SortOrder::OverallScore => descending(a.overall_score, b.overall_score),
            SortOrder::WeatherScore => descending(a.weather_score, b.weather_score),
            SortOrder::Price => ascending(a.price_range.min, b.price_range.min)
                .then_with(|| ascending(a.price_range.max, b.price_range.max)),
            SortOrder::Duration => ascending(a.duration, b.duration),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rank" => Ok(SortOrder::Rank),
            "score" | "overall" => Ok(SortOrder::OverallScore),
            "weather" => Ok(SortOrder::WeatherScore),
            "price" => Ok(SortOrder::Price),
            "duration" | "time" => Ok(SortOrder::Duration),
            other => Err(format!(
                "unknown sort order '{}' (expected rank, score, weather, price or duration)",
                other
            )),
        }
    }
}

/// Higher is better; NaN sorts last.
fn descending(a: f64, b: f64) -> Ordering {
    nan_as(b, f64::NEG_INFINITY).total_cmp(&nan_as(a, f64::NEG_INFINITY))
}

/// Lower is better; NaN sorts last.
fn ascending(a: f64, b: f64) -> Ordering {
    nan_as(a, f64::INFINITY).total_cmp(&nan_as(b, f64::INFINITY))
}

fn nan_as(value: f64, replacement: f64) -> f64 {
    if value.is_nan() {
        replacement
    } else {
        value
    }
}

/// Sort in place.
pub fn sort(suggestions: &mut [TransportSuggestion], order: SortOrder) {
    suggestions.sort_by(|a, b| order.compare(a, b));
}

/// Sorted copy.
pub fn rank(suggestions: &[TransportSuggestion], order: SortOrder) -> Vec<TransportSuggestion> {
    let mut ranked = suggestions.to_vec();
    sort(&mut ranked, order);
    ranked
}

/// Rewrite ranks to `1..=n` in the current order.
pub fn renumber(suggestions: &mut [TransportSuggestion]) {
    for (position, suggestion) in suggestions.iter_mut().enumerate() {
        suggestion.rank = position as u32 + 1;
    }
}

/// Top suggestion under [`SortOrder::Rank`]; the first one wins a full tie.
pub fn best(suggestions: &[TransportSuggestion]) -> Option<&TransportSuggestion> {
    suggestions
        .iter()
        .min_by(|a, b| SortOrder::Rank.compare(a, b))
}

/// Client-side narrowing of the suggestion list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionFilter {
    pub min_availability: Option<Availability>,
    /// Suggestions whose minimum fare exceeds this are dropped.
    pub max_price: Option<f64>,
    /// Allowed modes; empty allows all.
    pub modes: Vec<SuggestionMode>,
}

impl SuggestionFilter {
    pub fn is_empty(&self) -> bool {
        self.min_availability.is_none() && self.max_price.is_none() && self.modes.is_empty()
    }

    pub fn matches(&self, suggestion: &TransportSuggestion) -> bool {
        if let Some(min) = self.min_availability {
            if suggestion.availability < min {
                return false;
            }
        }
        if let Some(cap) = self.max_price {
            // NaN fares never pass a cap.
            if suggestion.price_range.min.is_nan() || suggestion.price_range.min > cap {
                return false;
            }
        }
        self.modes.is_empty() || self.modes.contains(&suggestion.mode)
    }
}

/// Suggestions that pass `filter`, order preserved.
pub fn filter(suggestions: &[TransportSuggestion], filter: &SuggestionFilter) -> Vec<TransportSuggestion> {
    suggestions
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PriceRange;

    fn suggestion(mode: SuggestionMode, rank: u32, overall: f64, weather: f64) -> TransportSuggestion {
        TransportSuggestion {
            mode,
            reason: "reason".into(),
            price_range: PriceRange { min: 100.0, max: 250.0 },
            duration: 1200.0,
            distance: 5400.0,
            pros: vec![],
            cons: vec![],
            availability: Availability::High,
            weather_score: weather,
            overall_score: overall,
            advice: None,
            time_factors: None,
            rank,
            nearby_stops: None,
        }
    }

    fn modes(list: &[TransportSuggestion]) -> Vec<&str> {
        list.iter().map(|s| s.mode.as_str()).collect()
    }

    #[test]
    fn test_rank_order_with_tie_breaks() {
        let list = vec![
            suggestion(SuggestionMode::Taxi, 2, 70.0, 90.0),
            suggestion(SuggestionMode::Bus, 1, 60.0, 50.0),
            suggestion(SuggestionMode::Gbaka, 2, 80.0, 40.0),
            suggestion(SuggestionMode::WoroWoro, 2, 70.0, 90.0),
            suggestion(SuggestionMode::MotoTaxi, 2, 70.0, 95.0),
        ];

        let ranked = rank(&list, SortOrder::Rank);
        // Taxi and Wôrô-wôrô tie on scores; the label decides.
        assert_eq!(modes(&ranked), vec!["bus", "gbaka", "moto_taxi", "taxi", "woro_woro"]);
        // Input untouched.
        assert_eq!(list[0].mode, SuggestionMode::Taxi);
    }

    #[test]
    fn test_score_orders_put_nan_last() {
        let list = vec![
            suggestion(SuggestionMode::Bus, 1, f64::NAN, 10.0),
            suggestion(SuggestionMode::Taxi, 2, 55.0, f64::NAN),
            suggestion(SuggestionMode::Gbaka, 3, 90.0, 70.0),
        ];

        assert_eq!(modes(&rank(&list, SortOrder::OverallScore)), vec!["gbaka", "taxi", "bus"]);
        assert_eq!(modes(&rank(&list, SortOrder::WeatherScore)), vec!["gbaka", "bus", "taxi"]);
    }

    #[test]
    fn test_price_and_duration_orders() {
        let mut cheap = suggestion(SuggestionMode::WoroWoro, 3, 50.0, 50.0);
        cheap.price_range = PriceRange { min: 50.0, max: 150.0 };
        cheap.duration = 1800.0;
        let mut taxi = suggestion(SuggestionMode::Taxi, 1, 90.0, 90.0);
        taxi.price_range = PriceRange { min: 500.0, max: 1500.0 };
        taxi.duration = 600.0;
        let mut gbaka = suggestion(SuggestionMode::Gbaka, 2, 70.0, 70.0);
        gbaka.price_range = PriceRange { min: 50.0, max: 250.0 };
        gbaka.duration = f64::NAN;

        let list = vec![taxi, gbaka, cheap];
        assert_eq!(modes(&rank(&list, SortOrder::Price)), vec!["woro_woro", "gbaka", "taxi"]);
        assert_eq!(modes(&rank(&list, SortOrder::Duration)), vec!["taxi", "woro_woro", "gbaka"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let list = vec![
            suggestion(SuggestionMode::Other("a".into()), 1, 50.0, 50.0),
            suggestion(SuggestionMode::Other("b".into()), 2, 50.0, 50.0),
            suggestion(SuggestionMode::Other("c".into()), 3, 50.0, 50.0),
        ];
        assert_eq!(modes(&rank(&list, SortOrder::OverallScore)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_renumber_is_contiguous() {
        let mut list = rank(
            &[
                suggestion(SuggestionMode::Bus, 4, 10.0, 0.0),
                suggestion(SuggestionMode::Taxi, 9, 90.0, 0.0),
            ],
            SortOrder::OverallScore,
        );
        renumber(&mut list);
        assert_eq!(list.iter().map(|s| s.rank).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(list[0].mode, SuggestionMode::Taxi);
    }

    #[test]
    fn test_best() {
        assert!(best(&[]).is_none());
        let list = vec![
            suggestion(SuggestionMode::Taxi, 2, 99.0, 99.0),
            suggestion(SuggestionMode::Bus, 1, 10.0, 10.0),
        ];
        assert_eq!(best(&list).unwrap().mode, SuggestionMode::Bus);
    }

    #[test]
    fn test_filter() {
        let mut low = suggestion(SuggestionMode::MotoTaxi, 1, 80.0, 20.0);
        low.availability = Availability::Low;
        let mut pricey = suggestion(SuggestionMode::Taxi, 2, 70.0, 90.0);
        pricey.price_range = PriceRange { min: 800.0, max: 2000.0 };
        let gbaka = suggestion(SuggestionMode::Gbaka, 3, 60.0, 40.0);
        let list = vec![low, pricey, gbaka];

        let by_availability = SuggestionFilter {
            min_availability: Some(Availability::Medium),
            ..Default::default()
        };
        assert_eq!(modes(&filter(&list, &by_availability)), vec!["taxi", "gbaka"]);

        let by_price = SuggestionFilter {
            max_price: Some(500.0),
            ..Default::default()
        };
        assert_eq!(modes(&filter(&list, &by_price)), vec!["moto_taxi", "gbaka"]);

        let by_mode = SuggestionFilter {
            modes: vec![SuggestionMode::Gbaka, SuggestionMode::Walking],
            ..Default::default()
        };
        assert_eq!(modes(&filter(&list, &by_mode)), vec!["gbaka"]);

        assert!(SuggestionFilter::default().is_empty());
        assert_eq!(filter(&list, &SuggestionFilter::default()).len(), 3);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("Price".parse::<SortOrder>().unwrap(), SortOrder::Price);
        assert_eq!("score".parse::<SortOrder>().unwrap(), SortOrder::OverallScore);
        assert!("cheapest".parse::<SortOrder>().is_err());
        for order in SortOrder::all() {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), *order);
        }
    }
}
