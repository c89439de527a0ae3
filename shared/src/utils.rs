//! # Shared Utility Functions
//!
//! Display formatting shared by every front end of the client.
//!
//! ## Formatting
//!
//! - [`format_distance_km`] - meters to `"3.4 km"`
//! - [`minutes_from_seconds`] - seconds to whole minutes, rounded
//! - [`format_price_range`] - fare band to `"100-250 FCFA"`
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_distance_km, format_price_range, minutes_from_seconds};
//!
//! assert_eq!(format_distance_km(5430.0), "5.4 km");
//! assert_eq!(minutes_from_seconds(1290.0), 22);
//! assert_eq!(format_price_range(100.0, 250.0), "100-250 FCFA");
//! ```

/// Currency used by every fare in the service.
pub const CURRENCY: &str = "FCFA";

/// Format a distance given in meters as kilometers with one decimal.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_distance_km;
///
/// assert_eq!(format_distance_km(0.0), "0.0 km");
/// assert_eq!(format_distance_km(12_345.0), "12.3 km");
/// ```
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

/// Convert a duration in seconds to whole minutes, rounding half away from zero.
pub fn minutes_from_seconds(seconds: f64) -> i64 {
    (seconds / 60.0).round() as i64
}

/// Format a fare band as `min-max FCFA`.
pub fn format_price_range(min: f64, max: f64) -> String {
    format!("{}-{} {}", format_amount(min), format_amount(max), CURRENCY)
}

/// Whole amounts print without decimals, fractional ones keep them.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance_km() {
        assert_eq!(format_distance_km(5400.0), "5.4 km");
        assert_eq!(format_distance_km(950.0), "0.9 km");
    }

    #[test]
    fn test_minutes_from_seconds_rounds() {
        assert_eq!(minutes_from_seconds(0.0), 0);
        assert_eq!(minutes_from_seconds(89.0), 1);
        assert_eq!(minutes_from_seconds(90.0), 2);
        assert_eq!(minutes_from_seconds(960.0), 16);
    }

    #[test]
    fn test_format_price_range() {
        assert_eq!(format_price_range(200.0, 500.0), "200-500 FCFA");
        assert_eq!(format_price_range(0.0, 0.0), "0-0 FCFA");
        assert_eq!(format_price_range(300.0, 300.0), "300-300 FCFA");
        assert_eq!(format_price_range(150.5, 300.0), "150.50-300 FCFA");
    }
}
