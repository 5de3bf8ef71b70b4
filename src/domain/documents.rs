//! Required documents per seminar type and completion checks

use std::collections::BTreeMap;

use crate::schemas::{DocumentUpload, Seminar, SeminarType};

/// A document kind a student must upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentRequirement {
    /// Key used in `Seminar::documents` and in upload requests
    pub id: &'static str,

    /// Label shown to users
    pub display_name: &'static str,
}

const fn req(id: &'static str, display_name: &'static str) -> DocumentRequirement {
    DocumentRequirement { id, display_name }
}

/// Documents for a proposal seminar, in upload-form order.
pub const PROPOSAL_DOCUMENTS: &[DocumentRequirement] = &[
    req("THESIS_PROPOSAL", "Thesis proposal"),
    req("ADVISOR_AVAILABILITY", "Advisor availability letter"),
    req("KRS", "Study plan card (KRS)"),
    req("ADVISOR_ASSISTANCE", "Advisor assistance form"),
    req("SEMINAR_ATTENDANCE", "Seminar attendance record"),
];

/// Documents for a result seminar, in upload-form order.
pub const RESULT_DOCUMENTS: &[DocumentRequirement] = &[
    req("FINAL_THESIS", "Final thesis draft"),
    req("FREE_THEORY_CERTIFICATE", "Free theory certificate"),
    req("KRS", "Study plan card (KRS)"),
    req("ADVISOR_APPROVAL", "Advisor approval letter"),
    req("EXAMINER_APPROVAL", "Examiner approval letter"),
    req("TRANSCRIPT", "Academic transcript"),
    req("ASSISTANCE_SHEET", "Assistance sheet"),
];

/// The fixed, ordered list of documents a seminar type requires.
pub fn required_documents(seminar_type: SeminarType) -> &'static [DocumentRequirement] {
    match seminar_type {
        SeminarType::Proposal => PROPOSAL_DOCUMENTS,
        SeminarType::Result => RESULT_DOCUMENTS,
    }
}

/// Find a requirement by id for the given seminar type.
pub fn requirement(seminar_type: SeminarType, id: &str) -> Option<&'static DocumentRequirement> {
    required_documents(seminar_type).iter().find(|r| r.id == id)
}

/// Whether every required document of the seminar has been uploaded.
///
/// Extra keys in `documents` are ignored.
pub fn is_complete(seminar: &Seminar) -> bool {
    required_documents(seminar.seminar_type)
        .iter()
        .all(|r| is_uploaded(seminar, r.id))
}

/// Required documents not uploaded yet, in requirement order.
pub fn missing_documents(seminar: &Seminar) -> Vec<&'static DocumentRequirement> {
    required_documents(seminar.seminar_type)
        .iter()
        .filter(|r| !is_uploaded(seminar, r.id))
        .collect()
}

fn is_uploaded(seminar: &Seminar, id: &str) -> bool {
    seminar.documents.get(id).map_or(false, |d| d.uploaded)
}

/// Reshape a documents map so its keys are exactly the requirement set.
///
/// Unknown keys are dropped and missing ones are added as not uploaded.
pub fn normalize_documents(
    seminar_type: SeminarType,
    documents: &BTreeMap<String, DocumentUpload>,
) -> BTreeMap<String, DocumentUpload> {
    required_documents(seminar_type)
        .iter()
        .map(|r| {
            let upload = documents.get(r.id).cloned().unwrap_or_default();
            (r.id.to_string(), upload)
        })
        .collect()
}
