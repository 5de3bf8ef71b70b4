//! Coordinator scheduling (SUBMITTED → SCHEDULED)

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use tracing::info;

use crate::api::{ApiClient, ScheduleRequest};
use crate::domain::{
    apply_state_transition, TransitionResult, ValidationContext, REQUIRED_ASSESSORS,
};
use crate::errors::{FieldErrors, Result, SemproError};
use crate::schemas::{LecturerRef, Seminar, SeminarStatus};
use crate::session::Session;

use super::cache::SeminarCache;
use super::guard::SubmitGuard;
use super::registration::is_valid_nip;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a schedule time: RFC 3339, or a local wall-clock time
pub fn parse_schedule_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|time| time.with_timezone(&Utc))
}

/// Schedule input as entered by the coordinator
#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    pub time: String,
    pub room: String,
    pub assessor_nips: Vec<String>,
}

struct ParsedSchedule {
    time: DateTime<Utc>,
    room: String,
    assessors: [String; 2],
}

impl ScheduleForm {
    fn parse(&self) -> Result<ParsedSchedule> {
        let mut errors = FieldErrors::new();

        let time = parse_schedule_time(&self.time);
        if self.time.trim().is_empty() {
            errors.push("time", "is required");
        } else if time.is_none() {
            errors.push("time", "must look like 2026-11-02 09:30 or an RFC 3339 timestamp");
        }

        let room = self.room.trim().to_string();
        if room.is_empty() {
            errors.push("room", "is required");
        }

        let nips: Vec<String> = self.assessor_nips.iter().map(|n| n.trim().to_string()).collect();
        if nips.len() != REQUIRED_ASSESSORS {
            errors.push(
                "assessorNIPs",
                format!("exactly {} assessors are required", REQUIRED_ASSESSORS),
            );
        } else if let Some(bad) = nips.iter().find(|n| !is_valid_nip(n)) {
            errors.push("assessorNIPs", format!("'{}' is not a valid NIP", bad));
        }

        errors.into_result()?;
        match (time, <[String; 2]>::try_from(nips)) {
            (Some(time), Ok(assessors)) => Ok(ParsedSchedule {
                time,
                room,
                assessors,
            }),
            _ => Err(SemproError::StateTransition("incomplete schedule".to_string())),
        }
    }
}

/// Check a schedule against the seminar and build the request body
pub fn prepare_schedule(seminar: &Seminar, form: &ScheduleForm) -> Result<ScheduleRequest> {
    let parsed = form.parse()?;
    let seminar_id = seminar
        .id
        .ok_or_else(|| SemproError::StateTransition("seminar has no id".to_string()))?;
    if seminar.status != SeminarStatus::Submitted {
        return Err(SemproError::StateTransition(format!(
            "only SUBMITTED seminars can be scheduled, this one is {}",
            seminar.status
        )));
    }

    let candidate = seminar.clone().with_schedule(
        parsed.time,
        parsed.room.clone(),
        parsed
            .assessors
            .iter()
            .map(|nip| LecturerRef::assessor(nip.as_str(), ""))
            .collect(),
    );
    if let TransitionResult::Error { error } =
        apply_state_transition(&candidate, &ValidationContext::default())
    {
        return Err(SemproError::StateTransition(error));
    }

    Ok(ScheduleRequest {
        seminar_id,
        time: parsed.time,
        room: parsed.room,
        assessor_nips: parsed.assessors,
    })
}

/// Assign time, room and assessors to a submitted seminar
pub async fn schedule_seminar(
    client: &ApiClient,
    session: &mut Session,
    guard: &SubmitGuard,
    cache: &mut SeminarCache,
    seminar: &Seminar,
    form: &ScheduleForm,
) -> Result<Seminar> {
    let request = prepare_schedule(seminar, form)?;
    let _ticket = guard.try_begin()?;

    let scheduled = client.schedule_seminar(session, &request).await?;
    info!(
        id = request.seminar_id,
        room = %request.room,
        time = %request.time,
        "seminar scheduled"
    );
    cache.upsert(scheduled.clone());
    Ok(scheduled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::required_documents;
    use crate::schemas::{DocumentUpload, SeminarType, StudentRef};

    fn submitted() -> Seminar {
        let seminar = Seminar::new_draft(
            SeminarType::Proposal,
            StudentRef {
                nim: "H071191001".to_string(),
                name: "Andi".to_string(),
            },
            "T".to_string(),
            vec![LecturerRef::advisor("123", "Dr. Budi")],
        )
        .with_id(4)
        .with_status(SeminarStatus::Submitted);
        required_documents(SeminarType::Proposal)
            .iter()
            .fold(seminar, |s, r| s.with_document(r.id, DocumentUpload::uploaded("f.pdf")))
    }

    fn form(assessors: &[&str]) -> ScheduleForm {
        ScheduleForm {
            time: "2026-11-02T01:30:00Z".to_string(),
            room: "Lab 2".to_string(),
            assessor_nips: assessors.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_schedule_time() {
        let utc = parse_schedule_time("2026-11-02T09:30:00+08:00").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-11-02T01:30:00+00:00");
        assert!(parse_schedule_time("2026-11-02 09:30").is_some());
        assert!(parse_schedule_time("next tuesday").is_none());
    }

    #[test]
    fn test_prepare_schedule() {
        let request = prepare_schedule(&submitted(), &form(&["999", "888"])).unwrap();
        assert_eq!(request.seminar_id, 4);
        assert_eq!(request.assessor_nips, ["999".to_string(), "888".to_string()]);
        assert_eq!(request.room, "Lab 2");
    }

    #[test]
    fn test_assessor_count_and_format() {
        match prepare_schedule(&submitted(), &form(&["999"])).unwrap_err() {
            SemproError::Validation(fields) => assert!(fields.get("assessorNIPs").is_some()),
            other => panic!("unexpected error: {other}"),
        }
        assert!(prepare_schedule(&submitted(), &form(&["999", "x1"])).is_err());

        let mut blank = form(&["999", "888"]);
        blank.room = "  ".to_string();
        blank.time = String::new();
        match prepare_schedule(&submitted(), &blank).unwrap_err() {
            SemproError::Validation(fields) => {
                assert_eq!(fields.get("room"), Some("is required"));
                assert_eq!(fields.get("time"), Some("is required"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_assessor_cannot_be_advisor() {
        let err = prepare_schedule(&submitted(), &form(&["123", "888"])).unwrap_err();
        assert!(err.to_string().contains("already an advisor"));

        let err = prepare_schedule(&submitted(), &form(&["888", "888"])).unwrap_err();
        assert!(matches!(err, SemproError::StateTransition(_)));
    }

    #[test]
    fn test_only_submitted_seminars() {
        let draft = submitted().with_status(SeminarStatus::Draft);
        assert!(matches!(
            prepare_schedule(&draft, &form(&["999", "888"])).unwrap_err(),
            SemproError::StateTransition(_)
        ));
    }
}
