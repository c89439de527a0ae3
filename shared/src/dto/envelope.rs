//! Standard backend response wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every backend endpoint answers `{ success, data?, error?, code?, message? }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            code: Some(code.into()),
            message: None,
        }
    }

    /// Unwrap the payload.
    ///
    /// A response counts as failed when `success` is false or `data` is
    /// missing; the failure carries the server's `error` text, or `fallback`
    /// when the server gave none.
    pub fn into_result(self, fallback: &str) -> Result<T, ApiFailure> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ApiFailure {
                message: self.error.unwrap_or_else(|| fallback.to_string()),
                code: self.code,
            }),
        }
    }

    /// Check only the `success` flag, for endpoints whose payload is ignored.
    pub fn into_ack(self, fallback: &str) -> Result<(), ApiFailure> {
        if self.success {
            Ok(())
        } else {
            Err(ApiFailure {
                message: self.error.unwrap_or_else(|| fallback.to_string()),
                code: self.code,
            })
        }
    }
}

/// A backend-reported failure extracted from an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub message: String,
    pub code: Option<String>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiFailure {}

/// Error body sent with non-2xx statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_success() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(response.into_result("fallback"), Ok(7));
    }

    #[test]
    fn test_into_result_uses_server_error() {
        let response: ApiResponse<u32> =
            serde_json::from_str(r#"{"success":false,"error":"Stop not found","code":"NOT_FOUND"}"#).unwrap();
        let failure = response.into_result("fallback").unwrap_err();
        assert_eq!(failure.message, "Stop not found");
        assert_eq!(failure.code.as_deref(), Some("NOT_FOUND"));
    }

    #[test]
    fn test_into_result_missing_data_uses_fallback() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        let failure = response.into_result("No route found").unwrap_err();
        assert_eq!(failure.message, "No route found");
        assert_eq!(failure.code, None);
    }

    #[test]
    fn test_into_ack_ignores_missing_data() {
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(response.into_ack("Failed to delete").is_ok());
    }
}
