//! Seminar lifecycle engine: documents, statuses, role views and assessment gating

mod assessment;
mod documents;
mod partition;
mod states;
mod transitions;
mod validation;


pub use assessment::{
    assessment_denial, can_assess, requires_guidance_score, AssessDenial, AssessmentForm,
    AssessmentPayload, MAX_SCORE, MIN_SCORE,
};
pub use documents::{
    is_complete, missing_documents, normalize_documents, required_documents, requirement,
    DocumentRequirement, PROPOSAL_DOCUMENTS, RESULT_DOCUMENTS,
};
pub use partition::{partition, Partition, SeminarFilter};
pub use states::{
    badge_label, get_allowed_next_states, get_next_state, get_state_index, is_terminal_state,
    Lifecycle, SEMINAR_STATES,
};
pub use transitions::{
    advance_status, apply_registration, apply_state_transition, reconcile_status,
    TransitionResult,
};
pub use validation::{
    all_participants_assessed, can_enter_completed, can_enter_draft, can_enter_scheduled,
    can_enter_submitted, check_advisors, result_access, validate_transition, ValidationContext,
    ValidationResult, MAX_ADVISORS, REQUIRED_ASSESSORS,
};
