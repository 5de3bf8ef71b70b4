//! Seminar schema - The proposal/result seminar record shared with the backend

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of seminar a student registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeminarType {
    /// Thesis proposal seminar
    Proposal,
    /// Research result seminar (the backend also calls it HASIL)
    #[serde(alias = "HASIL")]
    Result,
}

impl SeminarType {
    /// Path segment the backend uses for type-specific endpoints
    pub fn path_segment(&self) -> &'static str {
        match self {
            SeminarType::Proposal => "proposal",
            SeminarType::Result => "result",
        }
    }
}

impl std::fmt::Display for SeminarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeminarType::Proposal => f.pad("PROPOSAL"),
            SeminarType::Result => f.pad("RESULT"),
        }
    }
}

impl std::str::FromStr for SeminarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PROPOSAL" => Ok(SeminarType::Proposal),
            "RESULT" | "HASIL" => Ok(SeminarType::Result),
            _ => Err(format!("Unknown seminar type: {}", s)),
        }
    }
}

/// Lifecycle status of a seminar as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeminarStatus {
    /// Research details registered, documents pending
    #[default]
    Draft,
    /// All required documents uploaded
    Submitted,
    /// Time, room and assessors assigned
    Scheduled,
    /// Every participant has assessed
    Completed,
    /// Any value this client does not recognise; only ever rendered
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SeminarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeminarStatus::Draft => f.pad("DRAFT"),
            SeminarStatus::Submitted => f.pad("SUBMITTED"),
            SeminarStatus::Scheduled => f.pad("SCHEDULED"),
            SeminarStatus::Completed => f.pad("COMPLETED"),
            SeminarStatus::Unknown => f.pad("UNKNOWN"),
        }
    }
}

impl std::str::FromStr for SeminarStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(SeminarStatus::Draft),
            "SUBMITTED" => Ok(SeminarStatus::Submitted),
            "SCHEDULED" => Ok(SeminarStatus::Scheduled),
            "COMPLETED" => Ok(SeminarStatus::Completed),
            _ => Err(format!("Unknown seminar status: {}", s)),
        }
    }
}

/// Role a lecturer plays on a seminar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LecturerRole {
    Advisor,
    Assessor,
}

/// Reference to the owning student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    pub nim: String,

    #[serde(default)]
    pub name: String,
}

/// Reference to a lecturer attached to a seminar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerRef {
    #[serde(rename = "lecturerNIP")]
    pub lecturer_nip: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<LecturerRole>,
}

impl LecturerRef {
    pub fn advisor(nip: impl Into<String>, name: impl Into<String>) -> Self {
        LecturerRef {
            lecturer_nip: nip.into(),
            name: name.into(),
            role: Some(LecturerRole::Advisor),
        }
    }

    pub fn assessor(nip: impl Into<String>, name: impl Into<String>) -> Self {
        LecturerRef {
            lecturer_nip: nip.into(),
            name: name.into(),
            role: Some(LecturerRole::Assessor),
        }
    }
}

/// Upload state of one required document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub uploaded: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, rename = "fileURL", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl DocumentUpload {
    /// A document slot that has not been filled yet
    pub fn missing() -> Self {
        DocumentUpload::default()
    }

    /// A document slot filled with the given file
    pub fn uploaded(file_name: impl Into<String>) -> Self {
        DocumentUpload {
            uploaded: true,
            file_name: Some(file_name.into()),
            file_url: None,
        }
    }
}

/// One lecturer's score submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(rename = "lecturerNIP")]
    pub lecturer_nip: String,

    pub writing_score: f64,

    pub presentation_score: f64,

    pub title_score: f64,

    /// Only advisors grade guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    /// Weighted score as computed by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
}

/// A proposal or result seminar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seminar {
    /// Server identifier (null until first persisted)
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(rename = "type")]
    pub seminar_type: SeminarType,

    #[serde(default)]
    pub title: String,

    pub student: StudentRef,

    #[serde(default)]
    pub status: SeminarStatus,

    #[serde(default)]
    pub advisors: Vec<LecturerRef>,

    #[serde(default)]
    pub assessors: Vec<LecturerRef>,

    /// Document kind id to upload state
    #[serde(default)]
    pub documents: BTreeMap<String, DocumentUpload>,

    /// Scheduled time (set from SCHEDULED onward)
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub room: Option<String>,

    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Seminar {
    /// Create an unsaved DRAFT seminar with every required document slot empty
    pub fn new_draft(
        seminar_type: SeminarType,
        student: StudentRef,
        title: String,
        advisors: Vec<LecturerRef>,
    ) -> Self {
        let documents = crate::domain::required_documents(seminar_type)
            .iter()
            .map(|req| (req.id.to_string(), DocumentUpload::missing()))
            .collect();
        Seminar {
            id: None,
            seminar_type,
            title,
            student,
            status: SeminarStatus::Draft,
            advisors,
            assessors: Vec::new(),
            documents,
            time: None,
            room: None,
            assessments: Vec::new(),
        }
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: SeminarStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_advisors(mut self, advisors: Vec<LecturerRef>) -> Self {
        self.advisors = advisors;
        self
    }

    /// Return a new Seminar with one document slot replaced
    pub fn with_document(mut self, id: &str, upload: DocumentUpload) -> Self {
        self.documents.insert(id.to_string(), upload);
        self
    }

    /// Return a new Seminar carrying the coordinator's schedule
    pub fn with_schedule(
        mut self,
        time: DateTime<Utc>,
        room: String,
        assessors: Vec<LecturerRef>,
    ) -> Self {
        self.time = Some(time);
        self.room = Some(room);
        self.assessors = assessors;
        self
    }

    pub fn with_assessment(mut self, assessment: Assessment) -> Self {
        self.assessments.push(assessment);
        self
    }

    // ===== QUERIES =====

    pub fn is_advisor(&self, nip: &str) -> bool {
        self.advisors.iter().any(|l| l.lecturer_nip == nip)
    }

    pub fn is_assessor(&self, nip: &str) -> bool {
        self.assessors.iter().any(|l| l.lecturer_nip == nip)
    }

    /// Number of assessments recorded for a lecturer
    pub fn assessment_count(&self, nip: &str) -> usize {
        self.assessments
            .iter()
            .filter(|a| a.lecturer_nip == nip)
            .count()
    }

    /// Advisors followed by assessors, in seminar order
    pub fn participants(&self) -> impl Iterator<Item = &LecturerRef> {
        self.advisors.iter().chain(self.assessors.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> StudentRef {
        StudentRef {
            nim: "H071191001".to_string(),
            name: "Andi".to_string(),
        }
    }

    #[test]
    fn test_seminar_type_serialization() {
        assert_eq!(serde_json::to_string(&SeminarType::Proposal).unwrap(), "\"PROPOSAL\"");
        assert_eq!(serde_json::to_string(&SeminarType::Result).unwrap(), "\"RESULT\"");
        assert_eq!(
            serde_json::from_str::<SeminarType>("\"HASIL\"").unwrap(),
            SeminarType::Result
        );
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("[{:<8}]", SeminarType::Result), "[RESULT  ]");
        assert_eq!(format!("[{:>10}]", SeminarStatus::Draft), "[     DRAFT]");
        assert_eq!(SeminarStatus::Submitted.to_string(), "SUBMITTED");
    }

    #[test]
    fn test_seminar_type_from_str() {
        assert_eq!("proposal".parse::<SeminarType>().unwrap(), SeminarType::Proposal);
        assert_eq!("hasil".parse::<SeminarType>().unwrap(), SeminarType::Result);
        assert!("thesis".parse::<SeminarType>().is_err());
    }

    #[test]
    fn test_unrecognised_status_decodes_as_unknown() {
        assert_eq!(
            serde_json::from_str::<SeminarStatus>("\"ARCHIVED\"").unwrap(),
            SeminarStatus::Unknown
        );
        assert_eq!(
            serde_json::from_str::<SeminarStatus>("\"SCHEDULED\"").unwrap(),
            SeminarStatus::Scheduled
        );
    }

    #[test]
    fn test_new_draft_seeds_required_documents() {
        let seminar = Seminar::new_draft(
            SeminarType::Proposal,
            student(),
            "Deep learning for rice leaf disease".to_string(),
            vec![LecturerRef::advisor("123", "Dr. Budi")],
        );

        assert_eq!(seminar.status, SeminarStatus::Draft);
        assert!(seminar.id.is_none());
        assert_eq!(seminar.documents.len(), 5);
        assert!(seminar.documents.values().all(|d| !d.uploaded));
        assert!(seminar.assessors.is_empty());
    }

    #[test]
    fn test_decode_backend_payload() {
        let json = r#"{
            "id": 7,
            "type": "PROPOSAL",
            "title": "Sentiment analysis",
            "student": {"nim": "H071191001", "name": "Andi"},
            "status": "SCHEDULED",
            "advisors": [{"lecturerNIP": "123", "name": "Dr. Budi", "role": "ADVISOR"}],
            "assessors": [{"lecturerNIP": "999", "name": "Dr. Citra"}],
            "documents": {"KRS": {"uploaded": true, "fileName": "krs.pdf", "fileURL": "/files/krs.pdf"}},
            "time": "2026-10-01T02:00:00Z",
            "room": "Lab 2",
            "assessments": [{"lecturerNIP": "999", "writingScore": 80, "presentationScore": 85, "titleScore": 90}]
        }"#;

        let seminar: Seminar = serde_json::from_str(json).unwrap();
        assert_eq!(seminar.id, Some(7));
        assert_eq!(seminar.status, SeminarStatus::Scheduled);
        assert!(seminar.is_advisor("123"));
        assert!(seminar.is_assessor("999"));
        assert_eq!(seminar.assessment_count("999"), 1);
        assert_eq!(
            seminar.documents["KRS"].file_url.as_deref(),
            Some("/files/krs.pdf")
        );
        assert!(seminar.assessments[0].guidance_score.is_none());
    }

    #[test]
    fn test_builders_do_not_touch_original() {
        let seminar = Seminar::new_draft(SeminarType::Result, student(), "T".to_string(), vec![]);
        let updated = seminar
            .clone()
            .with_id(3)
            .with_status(SeminarStatus::Submitted)
            .with_document("KRS", DocumentUpload::uploaded("krs.pdf"));

        assert_eq!(updated.id, Some(3));
        assert_eq!(updated.status, SeminarStatus::Submitted);
        assert!(updated.documents["KRS"].uploaded);
        assert!(seminar.id.is_none());
        assert!(!seminar.documents["KRS"].uploaded);
    }

    #[test]
    fn test_participants_order() {
        let seminar = Seminar::new_draft(
            SeminarType::Proposal,
            student(),
            "T".to_string(),
            vec![LecturerRef::advisor("1", "A"), LecturerRef::advisor("2", "B")],
        )
        .with_schedule(
            Utc::now(),
            "Room 1".to_string(),
            vec![LecturerRef::assessor("3", "C"), LecturerRef::assessor("4", "D")],
        );

        let nips: Vec<&str> = seminar.participants().map(|l| l.lecturer_nip.as_str()).collect();
        assert_eq!(nips, vec!["1", "2", "3", "4"]);
    }
}
