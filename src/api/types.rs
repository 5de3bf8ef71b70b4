//! Request and response bodies that exist only on the wire

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schemas::{Role, UserProfile};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,

    /// Present when the server rotates refresh tokens
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleResponse {
    pub role: Role,
}

/// Research details sent on registration or update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchDetails {
    pub student_nim: String,
    pub title: String,
    #[serde(rename = "advisorNIPs")]
    pub advisor_nips: Vec<String>,
}

/// Coordinator scheduling body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub seminar_id: i64,
    pub time: DateTime<Utc>,
    pub room: String,
    #[serde(rename = "assessorNIPs")]
    pub assessor_nips: [String; 2],
}

/// A local file to upload into a document slot
#[derive(Debug, Clone)]
pub struct DocumentFile {
    /// Requirement id, used as the multipart field name
    pub document_id: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Error body returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The server's message, preferring `message` over `error`
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
