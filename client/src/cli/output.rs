//! Terminal rendering of command results.
//!
//! Every command prints either these text views or, with `--json`, the
//! value as pretty JSON.

use serde::Serialize;
use shared::{
    format_distance_km, CurrentWeather, Favorite, Forecast, Report, Stop, TransportLine,
};

use crate::core::error::{AppError, Result};
use crate::services::AuthUser;
use crate::suggestions::SuggestionBoard;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::Parse(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn yes_no(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

pub fn stop_row(stop: &Stop) -> String {
    let distance = stop
        .distance
        .map(|d| format!("  {}", format_distance_km(d)))
        .unwrap_or_default();
    format!("{:<26} {:<12} {}{}", stop.id, stop.stop_type.label(), stop.name, distance)
}

pub fn print_stops(stops: &[Stop]) {
    if stops.is_empty() {
        println!("No stops found");
        return;
    }
    for stop in stops {
        println!("{}", stop_row(stop));
    }
}

pub fn print_stop_detail(stop: &Stop, favorite: bool) {
    println!("{}{}", stop.name, if favorite { "  [favorite]" } else { "" });
    println!("  Type:       {}", stop.stop_type.label());
    println!("  Position:   {}, {}", stop.lat, stop.lon);
    println!("  Shelter:    {}", yes_no(stop.shelter));
    println!("  Bench:      {}", yes_no(stop.bench));
    println!("  Wheelchair: {}", yes_no(stop.wheelchair));
    if let Some(rating) = stop.rating {
        println!("  Rating:     {:.1} ({} votes)", rating, stop.rating_count.unwrap_or(0));
    }

    let modes: Vec<&str> = stop.served_modes().iter().map(|m| m.label()).collect();
    if !modes.is_empty() {
        println!("  Served by:  {}", modes.join(", "));
    }
    let lines: Vec<&str> = stop.lines().iter().map(TransportLine::badge).collect();
    if !lines.is_empty() {
        println!("  Lines:      {}", lines.join(", "));
    }
    if stop.verified == Some(true) {
        println!("  Verified");
    }
    println!("  Map:        {}", stop.geo_uri());
}

pub fn print_lines(lines: &[TransportLine]) {
    if lines.is_empty() {
        println!("No lines found");
        return;
    }
    for line in lines {
        let fare = line.fare.map(|f| format!("  {} FCFA", f)).unwrap_or_default();
        println!(
            "{:<8} {:<10} {}{}",
            line.badge(),
            line.transport_type.label(),
            line.name,
            fare
        );
    }
}

pub fn print_board(board: &SuggestionBoard) {
    if let Some((title, message)) = board.empty_state() {
        println!("{}", title);
        println!("{}", message);
        return;
    }

    if let Some(weather) = &board.weather {
        println!("Weather: {}{}", weather.conditions, if weather.raining { " (rain)" } else { "" });
        for advice in &weather.advice {
            println!("  - {}", advice);
        }
        println!();
    }

    if let Some(route) = &board.route {
        print!("Route: {} / {}", route.distance_label, route.duration_label);
        if route.alternatives > 0 {
            print!(" (+{} alternatives)", route.alternatives);
        }
        println!();
        println!();
    }

    if let Some(header) = board.header() {
        println!("{}", header);
    }
    for card in &board.cards {
        println!(
            "#{} {} [{}]  {}  {}  {}  {}  availability {}",
            card.rank,
            card.mode_label,
            card.icon,
            card.score_label,
            card.duration_label,
            card.distance_label,
            card.price_label,
            card.availability_label
        );
        if let Some(typical) = card.typical_fare {
            println!("   usually {}", typical);
        }
        println!("   {}", card.reason);
        for pro in &card.pros {
            println!("   + {}", pro);
        }
        for con in &card.cons {
            println!("   - {}", con);
        }
        for advice in &card.advice {
            println!("   > {}", advice);
        }
        for factor in &card.time_factors {
            println!("   ~ {}", factor);
        }
    }
    if board.cards.is_empty() && board.hidden == 0 {
        println!("No transport suggestions for this trip");
    }
    if board.hidden > 0 {
        println!("({} hidden by filters)", board.hidden);
    }
}

pub fn print_current_weather(weather: &CurrentWeather) {
    println!(
        "{}, {}: {:.0}°C (feels {:.0}°C), {}",
        weather.location.name,
        weather.location.country,
        weather.current.temp,
        weather.current.feels_like,
        weather.current.description
    );
    println!(
        "  Humidity {:.0}%  Wind {:.1} m/s  Visibility {}",
        weather.current.humidity,
        weather.wind.speed,
        format_distance_km(weather.current.visibility)
    );
    for advice in &weather.transport_advice {
        println!("  - {}", advice);
    }
}

pub fn print_forecast(forecast: &Forecast) {
    if !forecast.summary.is_empty() {
        println!("{}", forecast.summary);
    }
    for hour in &forecast.forecasts {
        println!(
            "{:02}h  {:>4.0}°C  {:<18} rain {:>3.0}%",
            hour.hour,
            hour.temp,
            hour.weather.description,
            hour.conditions.rain_probability
        );
    }
    for recommendation in &forecast.recommendations {
        println!("  - {}", recommendation);
    }
}

pub fn print_favorites(favorites: &[Favorite]) {
    if favorites.is_empty() {
        println!("No favorites yet");
        return;
    }
    for favorite in favorites {
        println!("{}", stop_row(&favorite.stop));
    }
}

pub fn print_reports(reports: &[Report]) {
    if reports.is_empty() {
        println!("No reports");
        return;
    }
    for report in reports {
        println!(
            "{:<26} {}  {:<10} {:<22} {}",
            report.id,
            lib_utils::format_date(&report.created_at),
            report.status.as_query(),
            report.report_type.label(),
            report.title
        );
    }
}

pub fn print_user(user: &AuthUser) {
    println!("{}", user.display_name.as_deref().unwrap_or("(no name)"));
    if let Some(email) = &user.email {
        println!("  Email: {}", email);
    }
    println!("  Id:    {}", user.uid);
}
