//! Lecturer assessment submission

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::domain::{assessment_denial, requires_guidance_score, AssessmentForm, AssessmentPayload};
use crate::errors::{Result, SemproError};
use crate::schemas::{Assessment, Seminar};
use crate::session::Session;

use super::cache::SeminarCache;
use super::guard::SubmitGuard;

/// Gate and validate an assessment; returns the seminar id and the body to send
pub fn prepare_assessment(
    seminar: &Seminar,
    viewer_nip: &str,
    form: &AssessmentForm,
    now: DateTime<Utc>,
) -> Result<(i64, AssessmentPayload)> {
    if let Some(denial) = assessment_denial(seminar, viewer_nip, now) {
        return Err(SemproError::AccessDenied(denial.to_string()));
    }
    let seminar_id = seminar
        .id
        .ok_or_else(|| SemproError::StateTransition("seminar has no id".to_string()))?;
    let payload = form.validate(requires_guidance_score(seminar, viewer_nip))?;
    Ok((seminar_id, payload))
}

/// Submit the viewer's scores for a held seminar.
///
/// The server may complete the seminar once every assessor has scored, so a
/// loaded cache is refetched afterwards.
pub async fn submit_assessment(
    client: &ApiClient,
    session: &mut Session,
    guard: &SubmitGuard,
    cache: &mut SeminarCache,
    seminar: &Seminar,
    viewer_nip: &str,
    form: &AssessmentForm,
    now: DateTime<Utc>,
) -> Result<Assessment> {
    let (seminar_id, payload) = prepare_assessment(seminar, viewer_nip, form, now)?;
    let _ticket = guard.try_begin()?;

    let assessment = client.submit_assessment(session, seminar_id, &payload).await?;
    info!(id = seminar_id, final_score = ?assessment.final_score, "assessment submitted");
    if cache.is_loaded() {
        let refreshed = cache.refetch(client, session).await.map(|_| ());
        if let Err(e) = refreshed {
            warn!(error = %e, "refetch after assessment failed");
            cache.invalidate();
        }
    }
    Ok(assessment)
}
