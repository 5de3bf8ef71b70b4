//! Plain-text and JSON rendering

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::domain::{badge_label, missing_documents, required_documents, Lifecycle, SEMINAR_STATES};
use crate::errors::{Result, SemproError};
use crate::schemas::{Seminar, SeminarType};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| SemproError::InvalidJson(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

pub fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// One row of a seminar table
pub fn seminar_line(seminar: &Seminar) -> String {
    let id = seminar
        .id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<6} {:<8} {:<10} {:<12} {}",
        id,
        seminar.seminar_type,
        badge_label(seminar.status),
        seminar.student.nim,
        seminar.title
    )
}

/// Progress of one seminar type, e.g. "PROPOSAL  2/4 Submitted"
pub fn lifecycle_line(seminar_type: SeminarType, seminar: Option<&Seminar>) -> String {
    let lifecycle = Lifecycle::of(seminar);
    let step = lifecycle
        .step_index()
        .map(|i| format!("{}/{}", i, SEMINAR_STATES.len()))
        .unwrap_or_else(|| "?".to_string());
    format!("{:<8} {:>3} {}", seminar_type, step, lifecycle.label())
}

/// Multi-line detail view
pub fn seminar_detail(seminar: &Seminar) -> String {
    let mut lines = vec![seminar_line(seminar)];

    let advisors: Vec<String> = seminar
        .advisors
        .iter()
        .map(|a| format!("{} ({})", a.name, a.lecturer_nip))
        .collect();
    lines.push(format!("  advisors:  {}", advisors.join(", ")));

    if !seminar.assessors.is_empty() {
        let assessors: Vec<String> = seminar
            .assessors
            .iter()
            .map(|a| format!("{} ({})", a.name, a.lecturer_nip))
            .collect();
        lines.push(format!("  assessors: {}", assessors.join(", ")));
    }
    if let Some(time) = seminar.time {
        lines.push(format!(
            "  schedule:  {} in {}",
            format_time(time),
            seminar.room.as_deref().unwrap_or("-")
        ));
    }

    lines.push("  documents:".to_string());
    for requirement in required_documents(seminar.seminar_type) {
        let upload = seminar.documents.get(requirement.id);
        let mark = if upload.map_or(false, |u| u.uploaded) { "x" } else { " " };
        let file = upload
            .and_then(|u| u.file_name.as_deref())
            .map(|f| format!(" - {}", f))
            .unwrap_or_default();
        lines.push(format!(
            "    [{}] {:<24} {}{}",
            mark, requirement.id, requirement.display_name, file
        ));
    }
    let missing = missing_documents(seminar).len();
    if missing > 0 {
        lines.push(format!("  {} document(s) still missing", missing));
    }

    if !seminar.assessments.is_empty() {
        lines.push(format!(
            "  assessments: {}/{}",
            seminar.assessments.len(),
            seminar.participants().count()
        ));
    }
    lines.join("\n")
}
