//! State transition logic
//!
//! Pure functions for applying status transitions to seminars, plus the
//! rules for folding server responses into cached copies.

use crate::schemas::{Seminar, SeminarStatus};

use super::states::{get_next_state, get_state_index};
use super::validation::{can_enter_draft, validate_transition, ValidationContext};

/// Result of a state transition attempt
#[derive(Debug)]
pub enum TransitionResult {
    /// Successful transition with the new seminar state
    Success {
        /// The seminar with updated status
        next_seminar: Seminar,
    },
    /// Failed transition with error message
    Error {
        /// Description of why the transition failed
        error: String,
    },
}

impl TransitionResult {
    /// Check if the transition was successful
    pub fn is_success(&self) -> bool {
        matches!(self, TransitionResult::Success { .. })
    }

    /// Check if the transition failed
    pub fn is_error(&self) -> bool {
        matches!(self, TransitionResult::Error { .. })
    }

    /// Get the next seminar if the transition was successful
    pub fn seminar(self) -> Option<Seminar> {
        match self {
            TransitionResult::Success { next_seminar } => Some(next_seminar),
            TransitionResult::Error { .. } => None,
        }
    }

    /// Get the error message if the transition failed
    pub fn error(self) -> Option<String> {
        match self {
            TransitionResult::Success { .. } => None,
            TransitionResult::Error { error } => Some(error),
        }
    }
}

/// Pure function that advances a seminar to its next status.
///
/// Never mutates the input; returns an error if the seminar is terminal or
/// the guard for the next status fails.
pub fn apply_state_transition(seminar: &Seminar, ctx: &ValidationContext) -> TransitionResult {
    let next_state = match get_next_state(seminar.status) {
        Some(state) => state,
        None => {
            return TransitionResult::Error {
                error: format!("Cannot transition from terminal state: {}", seminar.status),
            };
        }
    };

    let validation = validate_transition(seminar, next_state, ctx);
    if !validation.valid {
        return TransitionResult::Error {
            error: validation
                .reason
                .unwrap_or_else(|| "Transition validation failed".to_string()),
        };
    }

    TransitionResult::Success {
        next_seminar: seminar.clone().with_status(next_state),
    }
}

/// Validate a candidate for registration (no record → DRAFT).
pub fn apply_registration(candidate: &Seminar, ctx: &ValidationContext) -> TransitionResult {
    let validation = can_enter_draft(candidate, ctx);
    if !validation.valid {
        return TransitionResult::Error {
            error: validation
                .reason
                .unwrap_or_else(|| "Registration validation failed".to_string()),
        };
    }
    TransitionResult::Success {
        next_seminar: candidate.clone().with_status(SeminarStatus::Draft),
    }
}

/// Status to cache after a confirmed write.
///
/// The write-through value is taken only when it moves the seminar forward;
/// a client-side update never lowers the status.
pub fn advance_status(current: SeminarStatus, proposed: SeminarStatus) -> SeminarStatus {
    let current_index = get_state_index(current);
    let proposed_index = get_state_index(proposed);
    if proposed_index == usize::MAX {
        return current;
    }
    if current_index == usize::MAX || proposed_index > current_index {
        proposed
    } else {
        current
    }
}

/// Status to cache after a refetch: the server is always right.
pub fn reconcile_status(cached: SeminarStatus, server: SeminarStatus) -> SeminarStatus {
    let cached_index = get_state_index(cached);
    let server_index = get_state_index(server);
    if cached_index != usize::MAX && server_index < cached_index {
        tracing::warn!(
            "server reports seminar status {} behind cached {}, keeping server value",
            server,
            cached
        );
    }
    server
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::required_documents;
    use crate::schemas::{DocumentUpload, LecturerRef, SeminarType, StudentRef};

    fn make_seminar(status: SeminarStatus) -> Seminar {
        Seminar::new_draft(
            SeminarType::Proposal,
            StudentRef {
                nim: "H071191001".to_string(),
                name: "Andi".to_string(),
            },
            "Test Seminar".to_string(),
            vec![LecturerRef::advisor("123", "Dr. Budi")],
        )
        .with_id(1)
        .with_status(status)
    }

    fn with_all_documents(seminar: Seminar) -> Seminar {
        required_documents(seminar.seminar_type)
            .iter()
            .fold(seminar, |s, r| s.with_document(r.id, DocumentUpload::uploaded("f.pdf")))
    }

    #[test]
    fn test_transition_draft_to_submitted() {
        let seminar = with_all_documents(make_seminar(SeminarStatus::Draft));
        let result = apply_state_transition(&seminar, &ValidationContext::default());
        assert!(result.is_success());
        assert_eq!(result.seminar().unwrap().status, SeminarStatus::Submitted);
    }

    #[test]
    fn test_transition_missing_document() {
        let seminar = make_seminar(SeminarStatus::Draft);
        let result = apply_state_transition(&seminar, &ValidationContext::default());
        assert!(result.is_error());
        assert!(result.error().unwrap().contains("THESIS_PROPOSAL"));
    }

    #[test]
    fn test_transition_submitted_to_scheduled() {
        let seminar = make_seminar(SeminarStatus::Submitted).with_schedule(
            chrono::Utc::now(),
            "Room 301".to_string(),
            vec![LecturerRef::assessor("999", "A"), LecturerRef::assessor("888", "B")],
        );
        let result = apply_state_transition(&seminar, &ValidationContext::default());
        assert!(result.is_success());
        assert_eq!(result.seminar().unwrap().status, SeminarStatus::Scheduled);
    }

    #[test]
    fn test_transition_from_terminal_state() {
        let seminar = make_seminar(SeminarStatus::Completed);
        let result = apply_state_transition(&seminar, &ValidationContext::default());
        assert!(result.is_error());
        assert!(result.error().unwrap().contains("terminal state"));
    }

    #[test]
    fn test_transition_does_not_mutate_original() {
        let seminar = with_all_documents(make_seminar(SeminarStatus::Draft));
        let original = seminar.clone();
        let _ = apply_state_transition(&seminar, &ValidationContext::default());
        assert_eq!(seminar, original);
    }

    #[test]
    fn test_registration() {
        let candidate = make_seminar(SeminarStatus::Unknown);
        let result = apply_registration(&candidate, &ValidationContext::default());
        assert_eq!(result.seminar().unwrap().status, SeminarStatus::Draft);

        let result_seminar = Seminar {
            seminar_type: SeminarType::Result,
            ..make_seminar(SeminarStatus::Draft)
        };
        let denied = apply_registration(
            &result_seminar,
            &ValidationContext {
                proposal_status: Some(SeminarStatus::Submitted),
            },
        );
        assert!(denied.is_error());
    }

    #[test]
    fn test_advance_status_never_lowers() {
        assert_eq!(
            advance_status(SeminarStatus::Draft, SeminarStatus::Submitted),
            SeminarStatus::Submitted
        );
        assert_eq!(
            advance_status(SeminarStatus::Scheduled, SeminarStatus::Submitted),
            SeminarStatus::Scheduled
        );
        assert_eq!(
            advance_status(SeminarStatus::Draft, SeminarStatus::Draft),
            SeminarStatus::Draft
        );
        assert_eq!(
            advance_status(SeminarStatus::Unknown, SeminarStatus::Draft),
            SeminarStatus::Draft
        );
        assert_eq!(
            advance_status(SeminarStatus::Draft, SeminarStatus::Unknown),
            SeminarStatus::Draft
        );
    }

    #[test]
    fn test_reconcile_prefers_server() {
        assert_eq!(
            reconcile_status(SeminarStatus::Submitted, SeminarStatus::Draft),
            SeminarStatus::Draft
        );
        assert_eq!(
            reconcile_status(SeminarStatus::Submitted, SeminarStatus::Scheduled),
            SeminarStatus::Scheduled
        );
    }
}
