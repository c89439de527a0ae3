//! In-process fake servers for the integration tests.

#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL on which nothing listens.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn stop_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "lat": 5.3364,
        "lon": -4.0267,
        "stopType": "GBAKA_STOP",
        "gbaka": true,
        "woroworo": true
    })
}

pub fn suggestion_json(mode: &str, rank: u32, min: f64, max: f64, overall: f64) -> Value {
    json!({
        "mode": mode,
        "reason": format!("{} reason", mode),
        "priceRange": { "min": min, "max": max },
        "duration": 1200,
        "distance": 5400,
        "pros": ["Available"],
        "cons": [],
        "availability": "high",
        "weatherScore": 70,
        "overallScore": overall,
        "rank": rank
    })
}

pub fn route_json(suggestions: Vec<Value>) -> Value {
    json!({
        "routes": [{
            "distance": 5400,
            "duration": 960,
            "geometry": { "type": "LineString", "coordinates": [[-4.0267, 5.3364], [-3.987, 5.3599]] }
        }],
        "suggestions": suggestions,
        "metadata": {}
    })
}
