//! # Route Endpoints
//!
//! Route calculation with transport suggestions, multi-trip comparison,
//! waypoint optimisation and saved routes.

use shared::{CompareRoutesRequest, OptimizeRouteRequest, RouteQuery, RouteResponse};

use super::client::{push_flag, ApiClient};
use crate::core::error::Result;

fn route_query(params: &RouteQuery) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("from", params.from.to_query()),
        ("to", params.to.to_query()),
    ];
    if let Some(mode) = params.mode {
        query.push(("mode", mode.as_query().to_string()));
    }
    push_flag(&mut query, "alternatives", params.alternatives);
    push_flag(&mut query, "suggestions", params.suggestions);
    push_flag(&mut query, "weather", params.weather);
    query
}

/// Calculate a route and the ranked transport suggestions for it.
#[tracing::instrument(skip(client, params), fields(from = %params.from.to_query(), to = %params.to.to_query()))]
pub async fn get_route(client: &ApiClient, params: &RouteQuery) -> Result<RouteResponse> {
    let start = std::time::Instant::now();

    let route = client
        .get::<RouteResponse>("/api/route", &route_query(params))
        .await?
        .into_result("No route found")?;

    tracing::info!(
        duration_ms = start.elapsed().as_millis(),
        routes = route.routes.len(),
        suggestions = route.suggestions().len(),
        weather = route.weather.is_some(),
        "Route calculated"
    );
    Ok(route)
}

/// Compare several named trips. The comparison payload is returned untyped.
#[tracing::instrument(skip(client, request), fields(trips = request.routes.len()))]
pub async fn compare_routes(client: &ApiClient, request: &CompareRoutesRequest) -> Result<serde_json::Value> {
    let data = client
        .post::<_, serde_json::Value>("/api/route/compare", request)
        .await?
        .into_result("Route comparison failed")?;
    Ok(data)
}

/// Order waypoints for the shortest tour. The result is returned untyped.
#[tracing::instrument(skip(client, request), fields(waypoints = request.waypoints.len()))]
pub async fn optimize_route(client: &ApiClient, request: &OptimizeRouteRequest) -> Result<serde_json::Value> {
    let data = client
        .post::<_, serde_json::Value>("/api/route/optimize", request)
        .await?
        .into_result("Route optimization failed")?;
    Ok(data)
}

/// Fetch a previously saved route. Weather is included unless `weather` is false.
#[tracing::instrument(skip(client))]
pub async fn get_saved_route(
    client: &ApiClient,
    id: &str,
    weather: bool,
    alternatives: bool,
) -> Result<serde_json::Value> {
    let mut query = Vec::new();
    push_flag(&mut query, "weather", weather);
    push_flag(&mut query, "alternatives", alternatives);

    let data = client
        .get::<serde_json::Value>(&format!("/api/route/{}", id), &query)
        .await?
        .into_result("Route not found")?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Coordinates, TravelMode};

    #[test]
    fn test_route_query_requests_suggestions_and_weather_by_default() {
        let params = RouteQuery::new(Coordinates::new(5.35, -4.0), Coordinates::new(5.3, -4.02));
        assert_eq!(
            route_query(&params),
            vec![
                ("from", "5.35,-4".to_string()),
                ("to", "5.3,-4.02".to_string()),
                ("suggestions", "true".to_string()),
                ("weather", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_route_query_respects_disabled_flags() {
        let mut params = RouteQuery::new(Coordinates::new(5.35, -4.0), Coordinates::new(5.3, -4.02));
        params.suggestions = false;
        params.weather = false;
        params.alternatives = true;
        params.mode = Some(TravelMode::Walking);

        let query = route_query(&params);
        assert!(query.contains(&("mode", "walking".to_string())));
        assert!(query.contains(&("alternatives", "true".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "suggestions" || *k == "weather"));
    }
}
