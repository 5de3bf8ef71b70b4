//! Schema types for sempro
//!
//! Field names follow the backend's camelCase JSON.

mod config;
mod profile;
mod security_log;
mod seminar;

pub use config::Config;
pub use profile::{Coordinator, Lecturer, Role, Student, UserProfile};
pub use security_log::{Page, SecurityLog};
pub use seminar::{
    Assessment, DocumentUpload, LecturerRef, LecturerRole, Seminar, SeminarStatus, SeminarType,
    StudentRef,
};
