//! Assessment gate and score form validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrors, Result};
use crate::schemas::{Seminar, SeminarStatus};

/// Lowest accepted score
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score
pub const MAX_SCORE: f64 = 100.0;

/// First rule that stops a lecturer from assessing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessDenial {
    NotScheduled,
    NotHeldYet,
    NotParticipant,
    AlreadyAssessed,
}

impl std::fmt::Display for AssessDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessDenial::NotScheduled => write!(f, "seminar is not scheduled"),
            AssessDenial::NotHeldYet => write!(f, "seminar has not taken place yet"),
            AssessDenial::NotParticipant => {
                write!(f, "you are neither an advisor nor an assessor of this seminar")
            }
            AssessDenial::AlreadyAssessed => write!(f, "you have already assessed this seminar"),
        }
    }
}

/// Why `viewer_nip` may not assess `seminar` at `now`, or None if allowed.
pub fn assessment_denial(
    seminar: &Seminar,
    viewer_nip: &str,
    now: DateTime<Utc>,
) -> Option<AssessDenial> {
    if seminar.status != SeminarStatus::Scheduled {
        return Some(AssessDenial::NotScheduled);
    }
    match seminar.time {
        Some(time) if now > time => {}
        _ => return Some(AssessDenial::NotHeldYet),
    }
    if !seminar.is_advisor(viewer_nip) && !seminar.is_assessor(viewer_nip) {
        return Some(AssessDenial::NotParticipant);
    }
    if seminar.assessment_count(viewer_nip) > 0 {
        return Some(AssessDenial::AlreadyAssessed);
    }
    None
}

/// Whether a lecturer may submit an assessment now.
///
/// A seminar timed exactly at `now` is not assessable yet.
pub fn can_assess(seminar: &Seminar, viewer_nip: &str, now: DateTime<Utc>) -> bool {
    assessment_denial(seminar, viewer_nip, now).is_none()
}

/// Advisors grade guidance in addition to the common scores
pub fn requires_guidance_score(seminar: &Seminar, viewer_nip: &str) -> bool {
    seminar.is_advisor(viewer_nip)
}

/// Raw score input as typed by the lecturer
#[derive(Debug, Clone, Default)]
pub struct AssessmentForm {
    pub writing_score: String,
    pub presentation_score: String,
    pub title_score: String,
    pub guidance_score: Option<String>,
    pub feedback: Option<String>,
}

/// Validated body for `POST /api/seminars/:id/assess`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPayload {
    pub writing_score: f64,
    pub presentation_score: f64,
    pub title_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

fn parse_score(field: &str, raw: &str, errors: &mut FieldErrors) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, "is required");
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value) => Some(value),
        Ok(_) => {
            errors.push(field, "must be between 0 and 100");
            None
        }
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

impl AssessmentForm {
    /// Check the form and build the request payload.
    ///
    /// The guidance score is required only when `requires_guidance` is set;
    /// for pure assessors it is dropped from the payload.
    pub fn validate(&self, requires_guidance: bool) -> Result<AssessmentPayload> {
        let mut errors = FieldErrors::new();

        let writing = parse_score("writingScore", &self.writing_score, &mut errors);
        let presentation = parse_score("presentationScore", &self.presentation_score, &mut errors);
        let title = parse_score("titleScore", &self.title_score, &mut errors);
        let guidance = if requires_guidance {
            parse_score(
                "guidanceScore",
                self.guidance_score.as_deref().unwrap_or(""),
                &mut errors,
            )
        } else {
            None
        };

        errors.into_result()?;

        let feedback = self
            .feedback
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        Ok(AssessmentPayload {
            writing_score: writing.unwrap_or_default(),
            presentation_score: presentation.unwrap_or_default(),
            title_score: title.unwrap_or_default(),
            guidance_score: guidance,
            feedback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SemproError;
    use crate::schemas::{Assessment, LecturerRef, SeminarType, StudentRef};
    use chrono::Duration;

    fn scheduled_at(time: DateTime<Utc>) -> Seminar {
        Seminar::new_draft(
            SeminarType::Proposal,
            StudentRef {
                nim: "H071191001".to_string(),
                name: "Andi".to_string(),
            },
            "Title".to_string(),
            vec![LecturerRef::advisor("123", "Dr. Budi")],
        )
        .with_id(1)
        .with_status(SeminarStatus::Scheduled)
        .with_schedule(
            time,
            "Lab 1".to_string(),
            vec![LecturerRef::assessor("999", "Dr. Citra"), LecturerRef::assessor("888", "Dr. Dewi")],
        )
    }

    fn form(guidance: Option<&str>) -> AssessmentForm {
        AssessmentForm {
            writing_score: "80".to_string(),
            presentation_score: "85.5".to_string(),
            title_score: "90".to_string(),
            guidance_score: guidance.map(str::to_string),
            feedback: Some("  Good work  ".to_string()),
        }
    }

    #[test]
    fn test_advisor_can_assess_after_seminar() {
        let now = Utc::now();
        let seminar = scheduled_at(now - Duration::days(1));

        assert!(can_assess(&seminar, "123", now));
        assert!(requires_guidance_score(&seminar, "123"));
    }

    #[test]
    fn test_assessor_can_assess_without_guidance() {
        let now = Utc::now();
        let seminar = scheduled_at(now - Duration::days(1));

        assert!(can_assess(&seminar, "999", now));
        assert!(!requires_guidance_score(&seminar, "999"));
    }

    #[test]
    fn test_not_scheduled_is_denied_regardless_of_time() {
        let now = Utc::now();
        for status in [
            SeminarStatus::Draft,
            SeminarStatus::Submitted,
            SeminarStatus::Completed,
            SeminarStatus::Unknown,
        ] {
            let seminar = scheduled_at(now - Duration::days(30)).with_status(status);
            assert_eq!(
                assessment_denial(&seminar, "123", now),
                Some(AssessDenial::NotScheduled)
            );
        }
    }

    #[test]
    fn test_exact_time_is_not_assessable() {
        let now = Utc::now();
        let seminar = scheduled_at(now);
        assert!(!can_assess(&seminar, "123", now));
        assert!(can_assess(&seminar, "123", now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_future_and_missing_time() {
        let now = Utc::now();
        assert_eq!(
            assessment_denial(&scheduled_at(now + Duration::hours(2)), "123", now),
            Some(AssessDenial::NotHeldYet)
        );

        let mut untimed = scheduled_at(now);
        untimed.time = None;
        assert!(!can_assess(&untimed, "123", now));
    }

    #[test]
    fn test_outsider_is_denied() {
        let now = Utc::now();
        let seminar = scheduled_at(now - Duration::days(1));
        assert_eq!(
            assessment_denial(&seminar, "555", now),
            Some(AssessDenial::NotParticipant)
        );
    }

    #[test]
    fn test_second_assessment_is_denied() {
        let now = Utc::now();
        let seminar = scheduled_at(now - Duration::days(1)).with_assessment(Assessment {
            lecturer_nip: "999".to_string(),
            writing_score: 70.0,
            presentation_score: 70.0,
            title_score: 70.0,
            guidance_score: None,
            feedback: None,
            final_score: None,
        });

        assert_eq!(
            assessment_denial(&seminar, "999", now),
            Some(AssessDenial::AlreadyAssessed)
        );
        assert!(can_assess(&seminar, "123", now));
    }

    #[test]
    fn test_form_for_advisor_requires_guidance() {
        let err = form(None).validate(true).unwrap_err();
        match err {
            SemproError::Validation(errors) => {
                assert_eq!(errors.get("guidanceScore"), Some("is required"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let payload = form(Some("75")).validate(true).unwrap();
        assert_eq!(payload.guidance_score, Some(75.0));
        assert_eq!(payload.presentation_score, 85.5);
        assert_eq!(payload.feedback.as_deref(), Some("Good work"));
    }

    #[test]
    fn test_form_for_assessor_ignores_guidance() {
        let payload = form(Some("not a number")).validate(false).unwrap();
        assert_eq!(payload.guidance_score, None);

        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("guidanceScore"));
        assert!(json.contains("\"writingScore\":80"));
    }

    #[test]
    fn test_form_rejects_out_of_range_and_non_numeric() {
        let bad = AssessmentForm {
            writing_score: "101".to_string(),
            presentation_score: "-1".to_string(),
            title_score: "abc".to_string(),
            guidance_score: None,
            feedback: None,
        };

        match bad.validate(false).unwrap_err() {
            SemproError::Validation(errors) => {
                assert_eq!(errors.get("writingScore"), Some("must be between 0 and 100"));
                assert_eq!(errors.get("presentationScore"), Some("must be between 0 and 100"));
                assert_eq!(errors.get("titleScore"), Some("must be a number"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_form_accepts_bounds() {
        let edge = AssessmentForm {
            writing_score: "0".to_string(),
            presentation_score: "100".to_string(),
            title_score: "100.0".to_string(),
            guidance_score: None,
            feedback: Some("   ".to_string()),
        };
        let payload = edge.validate(false).unwrap();
        assert_eq!(payload.writing_score, 0.0);
        assert!(payload.feedback.is_none());
    }

    #[test]
    fn test_nan_is_rejected() {
        let nan = AssessmentForm {
            writing_score: "NaN".to_string(),
            presentation_score: "50".to_string(),
            title_score: "50".to_string(),
            ..Default::default()
        };
        assert!(nan.validate(false).is_err());
    }
}
