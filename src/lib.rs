//! sempro - Thesis seminar portal client
//!
//! This library provides the core functionality for the sempro CLI, including:
//! - Schema definitions for seminars, profiles, security logs and config
//! - The seminar lifecycle engine: documents, statuses, role views, assessment gating
//! - An explicit auth session persisted to a JSON file
//! - A typed REST client with bearer auth and refresh-on-403
//! - Submit workflows (register, upload, schedule, assess)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use errors::{Result, SemproError};
pub use schemas::{Config, Seminar, SeminarStatus, SeminarType, UserProfile};
pub use session::Session;
