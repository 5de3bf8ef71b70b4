//! Research details registration (no record → DRAFT)

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::info;

use crate::api::{ApiClient, ResearchDetails};
use crate::domain::{
    advance_status, apply_registration, normalize_documents, result_access, TransitionResult,
    ValidationContext, MAX_ADVISORS,
};
use crate::errors::{FieldErrors, Result, SemproError};
use crate::schemas::{LecturerRef, Seminar, SeminarStatus, SeminarType, StudentRef};
use crate::session::Session;

use super::cache::SeminarCache;
use super::guard::SubmitGuard;

lazy_static! {
    /// Lecturer NIPs are all digits
    static ref NIP_PATTERN: Regex = Regex::new(r"^[0-9]{3,20}$").unwrap();
}

/// Whether a string looks like a lecturer NIP
pub fn is_valid_nip(nip: &str) -> bool {
    NIP_PATTERN.is_match(nip)
}

/// Research details as entered by the student
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub seminar_type: SeminarType,
    pub title: String,
    pub advisor_nips: Vec<String>,
}

impl RegistrationForm {
    /// Field-level checks, run before anything is sent
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.push("title", "is required");
        }

        if self.advisor_nips.is_empty() {
            errors.push("advisorNIPs", "at least one advisor is required");
        } else if self.advisor_nips.len() > MAX_ADVISORS {
            errors.push(
                "advisorNIPs",
                format!("at most {} advisors are allowed", MAX_ADVISORS),
            );
        } else if let Some(bad) = self.advisor_nips.iter().find(|nip| !is_valid_nip(nip.trim())) {
            errors.push("advisorNIPs", format!("'{}' is not a valid NIP", bad));
        } else {
            let distinct: HashSet<&str> = self.advisor_nips.iter().map(|n| n.trim()).collect();
            if distinct.len() != self.advisor_nips.len() {
                errors.push("advisorNIPs", "advisors must be different lecturers");
            }
        }
        errors.into_result()
    }

    fn advisor_refs(&self) -> Vec<LecturerRef> {
        self.advisor_nips
            .iter()
            .map(|nip| LecturerRef::advisor(nip.trim(), ""))
            .collect()
    }
}

/// Decide whether a registration may be sent and build its body.
///
/// `current` is the student's existing seminar of the same type, `proposal`
/// their PROPOSAL seminar (only consulted for RESULT registrations).
pub fn prepare_registration(
    student: &StudentRef,
    form: &RegistrationForm,
    current: Option<&Seminar>,
    proposal: Option<&Seminar>,
) -> Result<ResearchDetails> {
    form.validate()?;

    if let Some(existing) = current {
        if existing.status != SeminarStatus::Draft {
            return Err(SemproError::StateTransition(format!(
                "research details cannot be changed once the seminar is {}",
                existing.status
            )));
        }
    }

    let candidate = Seminar::new_draft(
        form.seminar_type,
        student.clone(),
        form.title.trim().to_string(),
        form.advisor_refs(),
    );
    let ctx = ValidationContext {
        proposal_status: proposal.map(|p| p.status),
    };
    // Field checks already passed, so a failure here is the RESULT gate
    if let TransitionResult::Error { error } = apply_registration(&candidate, &ctx) {
        return Err(SemproError::AccessDenied(error));
    }

    Ok(ResearchDetails {
        student_nim: student.nim.clone(),
        title: candidate.title,
        advisor_nips: candidate
            .advisors
            .into_iter()
            .map(|a| a.lecturer_nip)
            .collect(),
    })
}

/// Fold the server's answer into the cached seminar: DRAFT with the advisors
pub fn confirm_registration(response: Seminar, form: &RegistrationForm) -> Seminar {
    let status = advance_status(response.status, SeminarStatus::Draft);
    let advisors = if response.advisors.is_empty() {
        form.advisor_refs()
    } else {
        response.advisors.clone()
    };
    let documents = normalize_documents(response.seminar_type, &response.documents);
    Seminar {
        status,
        documents,
        ..response
    }
    .with_advisors(advisors)
}

/// Register (or update) the student's research details.
///
/// For a RESULT seminar the PROPOSAL record is checked first; a denied
/// registration sends nothing.
pub async fn register_research(
    client: &ApiClient,
    session: &mut Session,
    guard: &SubmitGuard,
    cache: &mut SeminarCache,
    student: &StudentRef,
    form: &RegistrationForm,
) -> Result<Seminar> {
    form.validate()?;
    let _ticket = guard.try_begin()?;

    let proposal = match form.seminar_type {
        SeminarType::Result => {
            client
                .get_student_seminar(session, SeminarType::Proposal, &student.nim)
                .await?
        }
        SeminarType::Proposal => None,
    };
    if form.seminar_type == SeminarType::Result {
        let access = result_access(proposal.as_ref().map(|p| p.status));
        if !access.valid {
            return Err(SemproError::AccessDenied(
                access.reason.unwrap_or_else(|| "result seminar is locked".to_string()),
            ));
        }
    }

    let current = client
        .get_student_seminar(session, form.seminar_type, &student.nim)
        .await?;
    let details = prepare_registration(student, form, current.as_ref(), proposal.as_ref())?;

    let response = match current.as_ref().and_then(|s| s.id) {
        Some(id) => client.update_seminar(session, id, &details).await?,
        None => {
            client
                .register_seminar(session, form.seminar_type, &details)
                .await?
        }
    };

    let seminar = confirm_registration(response, form);
    info!(
        seminar_type = %seminar.seminar_type,
        id = ?seminar.id,
        "research details saved"
    );
    cache.upsert(seminar.clone());
    Ok(seminar)
}
