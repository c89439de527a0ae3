//! Display metadata per transport mode.

use shared::SuggestionMode;

/// Icon key for modes without dedicated artwork.
pub const UNKNOWN_MODE_ICON: &str = "help-circle";

/// Human label. Unknown modes show their wire name.
pub fn mode_label(mode: &SuggestionMode) -> &str {
    match (mode, mode.transport_type()) {
        (_, Some(kind)) => kind.label(),
        (SuggestionMode::Other(name), None) => name,
        (_, None) => "Walking",
    }
}

/// Icon key as understood by the map and list renderers.
pub fn mode_icon(mode: &SuggestionMode) -> &'static str {
    match mode {
        SuggestionMode::Bus => "bus",
        SuggestionMode::Gbaka => "car",
        SuggestionMode::WoroWoro => "car-sport",
        SuggestionMode::Taxi => "taxi",
        SuggestionMode::MotoTaxi => "bicycle",
        SuggestionMode::Walking => "walk",
        SuggestionMode::Other(_) => UNKNOWN_MODE_ICON,
    }
}

/// Typical fare in Abidjan, shown on each card beside the quoted price.
pub fn fare_band(mode: &SuggestionMode) -> Option<&'static str> {
    match mode {
        SuggestionMode::Bus => Some("200-500 FCFA"),
        SuggestionMode::Gbaka => Some("100-250 FCFA"),
        SuggestionMode::WoroWoro => Some("50-150 FCFA"),
        SuggestionMode::Taxi => Some("500+ FCFA"),
        SuggestionMode::MotoTaxi => Some("100-400 FCFA"),
        SuggestionMode::Walking => Some("Free"),
        SuggestionMode::Other(_) => None,
    }
}
