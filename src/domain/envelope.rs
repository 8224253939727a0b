use serde::Deserialize;

use crate::error::{DashboardError, Result};

/// `status` block present on every REST response, success or not.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub elapsed: Option<i64>,
    #[serde(default)]
    pub credit_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
    #[serde(default)]
    pub total_pages: u64,
}

/// Status/data envelope wrapping every REST payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.error_code == 0
    }

    /// Payload on success, `DashboardError::Api` when the service reported a failure.
    pub fn into_data(self) -> Result<T> {
        if !self.is_success() {
            return Err(DashboardError::Api {
                code: self.status.error_code,
                message: self
                    .status
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
            });
        }
        self.data
            .ok_or_else(|| DashboardError::Protocol("successful response without data".to_string()))
    }
}
