//! REST client for the seminar portal backend

mod client;
mod endpoints;
mod types;

pub use client::{decode, error_from_status, ApiClient};
pub use types::{
    DocumentFile, ErrorBody, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
    ResearchDetails, RoleResponse, ScheduleRequest,
};
