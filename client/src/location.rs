//! Search origin and radius.
//!
//! There is no device position on a terminal: the caller passes coordinates
//! or the search is centred on Abidjan.

use shared::Coordinates;

/// Abidjan city centre.
pub const DEFAULT_LOCATION: Coordinates = Coordinates {
    lat: 5.3364,
    lon: -4.0267,
};

pub const DEFAULT_RADIUS_M: u32 = 2000;
pub const MIN_RADIUS_M: u32 = 100;
pub const MAX_RADIUS_M: u32 = 10_000;

/// Explicit coordinates win; otherwise fall back to [`DEFAULT_LOCATION`].
pub fn resolve(explicit: Option<Coordinates>) -> Coordinates {
    match explicit {
        Some(coords) if coords.lat.is_finite() && coords.lon.is_finite() => coords,
        Some(coords) => {
            tracing::warn!(%coords, "Ignoring non-finite coordinates, using default location");
            DEFAULT_LOCATION
        }
        None => {
            tracing::warn!(
                lat = DEFAULT_LOCATION.lat,
                lon = DEFAULT_LOCATION.lon,
                "No position given, using default location"
            );
            DEFAULT_LOCATION
        }
    }
}

/// Bring a radius into `MIN_RADIUS_M..=MAX_RADIUS_M`; `None` gives the default.
pub fn clamp_radius(radius: Option<u32>) -> u32 {
    radius
        .unwrap_or(DEFAULT_RADIUS_M)
        .clamp(MIN_RADIUS_M, MAX_RADIUS_M)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_position_wins() {
        let here = Coordinates::new(5.36, -3.98);
        assert_eq!(resolve(Some(here)), here);
    }

    #[test]
    fn test_fallback_to_abidjan() {
        assert_eq!(resolve(None), DEFAULT_LOCATION);
        assert_eq!(resolve(Some(Coordinates::new(f64::NAN, -4.0))), DEFAULT_LOCATION);
    }

    #[test]
    fn test_clamp_radius() {
        assert_eq!(clamp_radius(None), 2000);
        assert_eq!(clamp_radius(Some(10)), 100);
        assert_eq!(clamp_radius(Some(50_000)), 10_000);
        assert_eq!(clamp_radius(Some(750)), 750);
    }
}
