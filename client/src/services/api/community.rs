//! # Community Endpoints
//!
//! Reports, favorites and search history. All of them need a signed-in user
//! on the backend side; the bearer token is attached by [`ApiClient`].

use shared::{
    Favorite, FavoriteRequest, NewHistoryEntry, NewReport, Report, ReportsPage, ReportsQuery,
    SearchHistory,
};

use super::client::ApiClient;
use crate::core::error::{AppError, Result};

fn reports_query(params: &ReportsQuery) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(status) = params.status {
        query.push(("status", status.as_query().to_string()));
    }
    if let Some(stop_id) = params.stop_id.as_deref().filter(|s| !s.is_empty()) {
        query.push(("stopId", stop_id.to_string()));
    }
    if let Some(page) = params.page.filter(|p| *p > 0) {
        query.push(("page", page.to_string()));
    }
    if let Some(limit) = params.limit.filter(|l| *l > 0) {
        query.push(("limit", limit.to_string()));
    }
    query
}

#[tracing::instrument(skip(client, report), fields(report_type = ?report.report_type))]
pub async fn create_report(client: &ApiClient, report: &NewReport) -> Result<Report> {
    if report.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let created = client
        .post::<_, Report>("/api/reports", report)
        .await?
        .into_result("Failed to create report")?;

    tracing::info!(report_id = %created.id, "Report created");
    Ok(created)
}

#[tracing::instrument(skip(client))]
pub async fn get_reports(client: &ApiClient, params: &ReportsQuery) -> Result<ReportsPage> {
    let page = client
        .get::<ReportsPage>("/api/reports", &reports_query(params))
        .await?
        .into_result("Failed to fetch reports")?;
    Ok(page)
}

#[tracing::instrument(skip(client))]
pub async fn add_favorite(client: &ApiClient, stop_id: &str) -> Result<Favorite> {
    let request = FavoriteRequest {
        stop_id: stop_id.to_string(),
    };

    let favorite = client
        .post::<_, Favorite>("/api/favorites", &request)
        .await?
        .into_result("Failed to add favorite")?;

    tracing::info!(stop_id = %favorite.stop_id, "Favorite added");
    Ok(favorite)
}

#[tracing::instrument(skip(client))]
pub async fn get_favorites(client: &ApiClient) -> Result<Vec<Favorite>> {
    let favorites = client
        .get::<Vec<Favorite>>("/api/favorites", &[])
        .await?
        .into_result("Failed to fetch favorites")?;

    tracing::debug!(count = favorites.len(), "Favorites fetched");
    Ok(favorites)
}

#[tracing::instrument(skip(client))]
pub async fn remove_favorite(client: &ApiClient, stop_id: &str) -> Result<()> {
    client
        .delete::<serde_json::Value>(&format!("/api/favorites/{}", stop_id))
        .await?
        .into_ack("Failed to remove favorite")?;

    tracing::info!(stop_id = %stop_id, "Favorite removed");
    Ok(())
}

/// Whether `stop_id` is among the user's favorites.
///
/// Any failure reads as "not a favorite".
#[tracing::instrument(skip(client))]
pub async fn is_favorite(client: &ApiClient, stop_id: &str) -> bool {
    match get_favorites(client).await {
        Ok(favorites) => favorites.iter().any(|f| f.stop_id == stop_id),
        Err(e) => {
            tracing::debug!(error = %e, "Favorite lookup failed");
            false
        }
    }
}

/// Flip the favorite state of a stop. Returns the new state.
#[tracing::instrument(skip(client))]
pub async fn toggle_favorite(client: &ApiClient, stop_id: &str) -> Result<bool> {
    if is_favorite(client, stop_id).await {
        remove_favorite(client, stop_id).await?;
        Ok(false)
    } else {
        add_favorite(client, stop_id).await?;
        Ok(true)
    }
}

#[tracing::instrument(skip(client, entry), fields(query = %entry.query))]
pub async fn add_to_history(client: &ApiClient, entry: &NewHistoryEntry) -> Result<SearchHistory> {
    let saved = client
        .post::<_, SearchHistory>("/api/history", entry)
        .await?
        .into_result("Failed to save history")?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ReportStatus;

    #[test]
    fn test_reports_query_only_sends_set_filters() {
        assert!(reports_query(&ReportsQuery::default()).is_empty());

        let query = reports_query(&ReportsQuery {
            status: Some(ReportStatus::Pending),
            stop_id: Some("stop-1".into()),
            page: Some(2),
            limit: None,
        });
        assert_eq!(
            query,
            vec![
                ("status", "PENDING".to_string()),
                ("stopId", "stop-1".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }
}
