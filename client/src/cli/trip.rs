//! `gbaka route ...` and `gbaka weather ...`

use clap::{Subcommand, ValueEnum};
use shared::{
    Availability, CompareRoutesRequest, ComparePreferences, Coordinates, NamedTrip, OptimizePreferences,
    OptimizeRouteRequest, RouteQuery, SuggestionMode, TravelMode, Waypoint,
};

use super::output::{print_board, print_current_weather, print_forecast, print_json};
use super::Context;
use crate::core::error::{AppError, Result};
use crate::core::ApiService;
use crate::location::resolve;
use crate::services::api::WeatherPlace;
use crate::suggestions::{SortOrder, SuggestionBoard, SuggestionFilter};

#[derive(Subcommand, Debug)]
pub enum RouteCommand {
    /// Route and ranked transport suggestions between two points
    Plan {
        /// Start as `lat,lon` (default: Abidjan)
        #[arg(long, allow_hyphen_values = true)]
        from: Option<Coordinates>,
        /// Destination as `lat,lon`
        #[arg(long, allow_hyphen_values = true)]
        to: Coordinates,
        #[arg(long, value_enum)]
        travel: Option<TravelArg>,
        /// Also compute alternative routes
        #[arg(long)]
        alternatives: bool,
        #[arg(long)]
        no_suggestions: bool,
        #[arg(long)]
        no_weather: bool,
        /// rank, score, weather, price or duration
        #[arg(long, default_value = "rank")]
        sort: SortOrder,
        /// Hide suggestions whose fare starts above this (FCFA)
        #[arg(long)]
        max_price: Option<f64>,
        /// high, medium or low
        #[arg(long)]
        min_availability: Option<Availability>,
        /// Only these modes (repeatable)
        #[arg(long = "mode")]
        modes: Vec<SuggestionMode>,
        /// Only print the top suggestion
        #[arg(long)]
        best: bool,
    },

    /// Compare several trips, each given as `name=lat,lon/lat,lon`
    Compare {
        #[arg(long = "trip", value_parser = parse_trip, required = true, allow_hyphen_values = true)]
        trips: Vec<NamedTrip>,
        #[arg(long)]
        prioritize_speed: bool,
        #[arg(long)]
        prioritize_cost: bool,
        #[arg(long)]
        consider_weather: bool,
    },

    /// Best visiting order for waypoints
    Optimize {
        /// Waypoint as `lat,lon` (repeatable)
        #[arg(long = "waypoint", required = true, allow_hyphen_values = true)]
        waypoints: Vec<Coordinates>,
        #[arg(long)]
        avoid_traffic: bool,
        #[arg(long)]
        consider_weather: bool,
    },

    /// A saved route
    Saved {
        id: String,
        #[arg(long)]
        no_weather: bool,
        #[arg(long)]
        alternatives: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TravelArg {
    Driving,
    Walking,
}

impl From<TravelArg> for TravelMode {
    fn from(arg: TravelArg) -> Self {
        match arg {
            TravelArg::Driving => TravelMode::Driving,
            TravelArg::Walking => TravelMode::Walking,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum WeatherCommand {
    /// Current conditions
    Current {
        #[arg(long)]
        city: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinates>,
    },

    /// Hourly forecast
    Forecast {
        #[arg(long)]
        city: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinates>,
        #[arg(long)]
        hours: Option<u32>,
        /// Include per-mode suitability
        #[arg(long)]
        transport: bool,
    },
}

/// `name=lat,lon/lat,lon`
pub fn parse_trip(input: &str) -> std::result::Result<NamedTrip, String> {
    let (name, legs) = input
        .split_once('=')
        .ok_or_else(|| format!("expected 'name=lat,lon/lat,lon' but got '{}'", input))?;
    let (from, to) = legs
        .split_once('/')
        .ok_or_else(|| format!("expected 'from/to' in '{}'", input))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("trip name is missing in '{}'", input));
    }

    Ok(NamedTrip {
        name: name.to_string(),
        from: from.parse().map_err(|e: shared::CoordinatesParseError| e.to_string())?,
        to: to.parse().map_err(|e: shared::CoordinatesParseError| e.to_string())?,
    })
}

fn weather_place(city: Option<String>, at: Option<Coordinates>) -> Result<WeatherPlace> {
    WeatherPlace::from_parts(city.as_deref(), at.map(|c| c.lat), at.map(|c| c.lon))
}

fn flag(enabled: bool) -> Option<bool> {
    enabled.then_some(true)
}

pub async fn run_route(ctx: &Context, command: RouteCommand) -> Result<()> {
    match command {
        RouteCommand::Plan {
            from,
            to,
            travel,
            alternatives,
            no_suggestions,
            no_weather,
            sort,
            max_price,
            min_availability,
            modes,
            best,
        } => {
            let mut params = RouteQuery::new(resolve(from), to);
            params.mode = travel.map(TravelMode::from);
            params.alternatives = alternatives;
            params.suggestions = !no_suggestions;
            params.weather = !no_weather;

            let response = ctx.api.get_route(&params).await?;
            let filter = SuggestionFilter {
                min_availability,
                max_price,
                modes,
            };
            let board = SuggestionBoard::build(&response, sort, &filter);

            if best {
                let top = board
                    .best()
                    .ok_or_else(|| AppError::api("No transport suggestion for this trip"))?;
                return if ctx.json {
                    print_json(top)
                } else {
                    println!("{} ({}): {}", top.mode_label, top.price_label, top.reason);
                    Ok(())
                };
            }

            if ctx.json {
                return print_json(&board);
            }
            print_board(&board);
            Ok(())
        }

        RouteCommand::Compare {
            trips,
            prioritize_speed,
            prioritize_cost,
            consider_weather,
        } => {
            let preferences = ComparePreferences {
                prioritize_speed: flag(prioritize_speed),
                consider_weather: flag(consider_weather),
                prioritize_cost: flag(prioritize_cost),
            };
            let request = CompareRoutesRequest {
                routes: trips,
                preferences: (preferences != ComparePreferences::default()).then_some(preferences),
            };
            let comparison = ctx.api.compare_routes(&request).await?;
            print_json(&comparison)
        }

        RouteCommand::Optimize {
            waypoints,
            avoid_traffic,
            consider_weather,
        } => {
            let preferences = OptimizePreferences {
                avoid_traffic: flag(avoid_traffic),
                consider_weather: flag(consider_weather),
            };
            let request = OptimizeRouteRequest {
                waypoints: waypoints.into_iter().map(Waypoint::from).collect(),
                preferences: (preferences != OptimizePreferences::default()).then_some(preferences),
            };
            let optimized = ctx.api.optimize_route(&request).await?;
            print_json(&optimized)
        }

        RouteCommand::Saved {
            id,
            no_weather,
            alternatives,
        } => {
            let route = ctx.api.get_saved_route(&id, !no_weather, alternatives).await?;
            print_json(&route)
        }
    }
}

pub async fn run_weather(ctx: &Context, command: WeatherCommand) -> Result<()> {
    match command {
        WeatherCommand::Current { city, at } => {
            let weather = ctx.api.get_current_weather(&weather_place(city, at)?).await?;
            if ctx.json {
                return print_json(&weather);
            }
            print_current_weather(&weather);
            Ok(())
        }

        WeatherCommand::Forecast {
            city,
            at,
            hours,
            transport,
        } => {
            let forecast = ctx
                .api
                .get_forecast(&weather_place(city, at)?, hours, transport)
                .await?;
            if ctx.json {
                return print_json(&forecast);
            }
            print_forecast(&forecast);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trip() {
        let trip = parse_trip("Work=5.3364,-4.0267/5.3599,-3.9870").unwrap();
        assert_eq!(trip.name, "Work");
        assert_eq!(trip.from, Coordinates::new(5.3364, -4.0267));
        assert_eq!(trip.to, Coordinates::new(5.3599, -3.987));

        assert!(parse_trip("5.3,-4.0/5.4,-4.1").is_err());
        assert!(parse_trip("=5.3,-4.0/5.4,-4.1").is_err());
        assert!(parse_trip("Work=5.3,-4.0").is_err());
        assert!(parse_trip("Work=abc/5.4,-4.1").is_err());
    }

    #[test]
    fn test_weather_place_needs_city_or_position() {
        let err = weather_place(None, None).unwrap_err();
        assert_eq!(err.user_message(), "City or coordinates required");
        assert_eq!(
            weather_place(Some("Abidjan".into()), None).unwrap(),
            WeatherPlace::City("Abidjan".into())
        );
    }
}
