//! Guard conditions for seminar status transitions

use std::collections::HashSet;

use crate::schemas::{Seminar, SeminarStatus, SeminarType};

use super::documents::{is_complete, missing_documents};
use super::get_allowed_next_states;

/// Maximum number of advisors on a seminar
pub const MAX_ADVISORS: usize = 2;

/// Number of assessors a coordinator must assign
pub const REQUIRED_ASSESSORS: usize = 2;

/// Facts from outside the seminar record needed by the guards
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Status of the student's PROPOSAL seminar, None if there is none.
    /// Only consulted when registering a RESULT seminar.
    pub proposal_status: Option<SeminarStatus>,
}

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// A RESULT seminar may only be registered once the PROPOSAL seminar is completed.
pub fn result_access(proposal_status: Option<SeminarStatus>) -> ValidationResult {
    match proposal_status {
        Some(SeminarStatus::Completed) => ValidationResult::success(),
        Some(status) => ValidationResult::failure(format!(
            "proposal seminar is {}, it must be COMPLETED before registering a result seminar",
            status
        )),
        None => ValidationResult::failure(
            "no proposal seminar found, it must be COMPLETED before registering a result seminar",
        ),
    }
}

/// Check the advisor list: 1 or 2 distinct lecturers.
pub fn check_advisors(seminar: &Seminar) -> ValidationResult {
    if seminar.advisors.is_empty() {
        return ValidationResult::failure("at least one advisor is required");
    }
    if seminar.advisors.len() > MAX_ADVISORS {
        return ValidationResult::failure(format!("at most {} advisors are allowed", MAX_ADVISORS));
    }
    let distinct: HashSet<&str> = seminar
        .advisors
        .iter()
        .map(|a| a.lecturer_nip.as_str())
        .collect();
    if distinct.len() != seminar.advisors.len() {
        return ValidationResult::failure("advisors must be different lecturers");
    }
    ValidationResult::success()
}

/// Validate registering research details (no record → DRAFT)
pub fn can_enter_draft(seminar: &Seminar, ctx: &ValidationContext) -> ValidationResult {
    if seminar.title.trim().is_empty() {
        return ValidationResult::failure("title is required");
    }
    let advisors = check_advisors(seminar);
    if !advisors.valid {
        return advisors;
    }
    if seminar.seminar_type == SeminarType::Result {
        return result_access(ctx.proposal_status);
    }
    ValidationResult::success()
}

/// Validate entering the "submitted" status
pub fn can_enter_submitted(seminar: &Seminar) -> ValidationResult {
    if seminar.id.is_none() {
        return ValidationResult::failure("research details are not registered yet");
    }
    if !is_complete(seminar) {
        let missing: Vec<&str> = missing_documents(seminar).iter().map(|r| r.id).collect();
        return ValidationResult::failure(format!(
            "required documents not uploaded: {}",
            missing.join(", ")
        ));
    }
    ValidationResult::success()
}

/// Validate entering the "scheduled" status.
///
/// The seminar must already carry the proposed time, room and assessors.
pub fn can_enter_scheduled(seminar: &Seminar) -> ValidationResult {
    if seminar.time.is_none() {
        return ValidationResult::failure("seminar time is required");
    }
    if seminar
        .room
        .as_deref()
        .map_or(true, |r| r.trim().is_empty())
    {
        return ValidationResult::failure("seminar room is required");
    }
    if seminar.assessors.len() != REQUIRED_ASSESSORS {
        return ValidationResult::failure(format!(
            "exactly {} assessors are required",
            REQUIRED_ASSESSORS
        ));
    }
    if seminar.assessors[0].lecturer_nip == seminar.assessors[1].lecturer_nip {
        return ValidationResult::failure("assessors must be different lecturers");
    }
    if let Some(clash) = seminar
        .assessors
        .iter()
        .find(|a| seminar.is_advisor(&a.lecturer_nip))
    {
        return ValidationResult::failure(format!(
            "lecturer {} is already an advisor for this seminar",
            clash.lecturer_nip
        ));
    }
    ValidationResult::success()
}

/// Whether every advisor and assessor has exactly one assessment recorded
pub fn all_participants_assessed(seminar: &Seminar) -> bool {
    seminar
        .participants()
        .all(|l| seminar.assessment_count(&l.lecturer_nip) == 1)
}

/// Validate entering the "completed" status
pub fn can_enter_completed(seminar: &Seminar) -> ValidationResult {
    if seminar.assessors.is_empty() {
        return ValidationResult::failure("no assessors assigned");
    }
    if !all_participants_assessed(seminar) {
        return ValidationResult::failure("not every advisor and assessor has submitted an assessment");
    }
    ValidationResult::success()
}

/// Validate a status transition of an existing seminar
pub fn validate_transition(
    seminar: &Seminar,
    target: SeminarStatus,
    _ctx: &ValidationContext,
) -> ValidationResult {
    let current = seminar.status;
    let allowed = get_allowed_next_states(current);
    if !allowed.contains(&target) {
        return ValidationResult::failure(format!(
            "cannot transition from {} to {}",
            current, target
        ));
    }

    match target {
        SeminarStatus::Submitted => can_enter_submitted(seminar),
        SeminarStatus::Scheduled => can_enter_scheduled(seminar),
        SeminarStatus::Completed => can_enter_completed(seminar),
        SeminarStatus::Draft => ValidationResult::failure("cannot transition to draft state"),
        SeminarStatus::Unknown => ValidationResult::failure("cannot transition to an unknown state"),
    }
}
