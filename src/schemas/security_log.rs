//! Security log schema - coordinator-only audit trail and its pagination envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audited security event (login, refresh, role check...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityLog {
    pub id: i64,

    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Outcome as reported by the server (e.g. "SUCCESS", "FAILED")
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Paginated list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,

    pub page: u32,

    pub per_page: u32,

    pub total: u64,

    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
