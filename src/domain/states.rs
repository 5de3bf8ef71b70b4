//! Seminar status machine definitions
//!
//! The state machine follows a linear progression:
//! draft → submitted → scheduled → completed

use crate::schemas::{Seminar, SeminarStatus};

/// The canonical ordering of seminar statuses.
///
/// IMPORTANT: This is the source of truth for status ordering.
/// `SeminarStatus::Unknown` is deliberately absent.
pub const SEMINAR_STATES: &[SeminarStatus] = &[
    SeminarStatus::Draft,
    SeminarStatus::Submitted,
    SeminarStatus::Scheduled,
    SeminarStatus::Completed,
];

/// Get the 0-based index of a status in the lifecycle.
///
/// Returns the position in SEMINAR_STATES, or usize::MAX if not found.
pub fn get_state_index(state: SeminarStatus) -> usize {
    SEMINAR_STATES
        .iter()
        .position(|&s| s == state)
        .unwrap_or(usize::MAX)
}

/// Returns the next status in the lifecycle.
///
/// Returns None for the terminal COMPLETED status and for unknown values.
pub fn get_next_state(current: SeminarStatus) -> Option<SeminarStatus> {
    let index = get_state_index(current);
    if index >= SEMINAR_STATES.len() - 1 {
        return None;
    }
    Some(SEMINAR_STATES[index + 1])
}

/// Returns the allowed next statuses (0 or 1 entries).
pub fn get_allowed_next_states(current: SeminarStatus) -> Vec<SeminarStatus> {
    match get_next_state(current) {
        Some(next) => vec![next],
        None => vec![],
    }
}

/// Check if a status is the terminal status (completed).
pub fn is_terminal_state(state: SeminarStatus) -> bool {
    state == SeminarStatus::Completed
}

/// Badge text for a status. Unknown server values render as "Unknown".
pub fn badge_label(state: SeminarStatus) -> &'static str {
    match state {
        SeminarStatus::Draft => "Draft",
        SeminarStatus::Submitted => "Submitted",
        SeminarStatus::Scheduled => "Scheduled",
        SeminarStatus::Completed => "Completed",
        SeminarStatus::Unknown => "Unknown",
    }
}

/// Where a student stands for one seminar type, including "nothing registered yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No seminar record exists
    NotRegistered,
    /// A record exists with the given status
    Registered(SeminarStatus),
}

impl Lifecycle {
    /// Project an optional seminar record onto the lifecycle
    pub fn of(seminar: Option<&Seminar>) -> Self {
        match seminar {
            None => Lifecycle::NotRegistered,
            Some(s) => Lifecycle::Registered(s.status),
        }
    }

    /// Step number for progress displays: 0 before registration, 1 for
    /// DRAFT through 4 for COMPLETED. None for unknown statuses.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            Lifecycle::NotRegistered => Some(0),
            Lifecycle::Registered(status) => match get_state_index(*status) {
                usize::MAX => None,
                index => Some(index + 1),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lifecycle::NotRegistered => "Not registered",
            Lifecycle::Registered(status) => badge_label(*status),
        }
    }
}
