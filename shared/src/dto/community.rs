//! Crowd-sourced reports, favorites and search history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transit::Stop;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    MissingStop,
    IncorrectInfo,
    Damage,
    SafetyIssue,
    NewLine,
    ScheduleChange,
    DuplicateStop,
    Other,
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::MissingStop => "Missing stop",
            ReportType::IncorrectInfo => "Incorrect information",
            ReportType::Damage => "Damage",
            ReportType::SafetyIssue => "Safety issue",
            ReportType::NewLine => "New line",
            ReportType::ScheduleChange => "Schedule change",
            ReportType::DuplicateStop => "Duplicate stop",
            ReportType::Other => "Other",
        }
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = serde_json::Value::String(s.trim().to_ascii_uppercase().replace('-', "_"));
        serde_json::from_value(value).map_err(|_| format!("unknown report type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
    Resolved,
}

impl ReportStatus {
    pub fn as_query(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Approved => "APPROVED",
            ReportStatus::Rejected => "REJECTED",
            ReportStatus::Resolved => "RESOLVED",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReportStatus::Pending),
            "APPROVED" => Ok(ReportStatus::Approved),
            "REJECTED" => Ok(ReportStatus::Rejected),
            "RESOLVED" => Ok(ReportStatus::Resolved),
            _ => Err(format!("unknown report status '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportAuthor {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,
    pub report_type: ReportType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    pub status: ReportStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ReportAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Stop>,
}

/// Body of `POST /api/reports`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,
    pub report_type: ReportType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// Filters for `GET /api/reports`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportsQuery {
    pub status: Option<ReportStatus>,
    pub stop_id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

/// `data` payload of `GET /api/reports`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportsPage {
    pub reports: Vec<Report>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub stop_id: String,
    pub created_at: String,
    pub stop: Stop,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub stop_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistory {
    pub id: String,
    pub user_id: String,
    pub query: String,
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    pub created_at: String,
}

/// Body of `POST /api/history`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    pub query: String,
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}
