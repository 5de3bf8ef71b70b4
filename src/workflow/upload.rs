//! Document upload, and the DRAFT → SUBMITTED flip once the set is complete

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::api::{ApiClient, DocumentFile};
use crate::domain::{
    advance_status, is_complete, normalize_documents, reconcile_status, requirement,
    required_documents,
};
use crate::errors::{FieldErrors, Result, SemproError};
use crate::schemas::{Seminar, SeminarStatus};
use crate::session::Session;

use super::cache::SeminarCache;
use super::guard::SubmitGuard;

/// One local file destined for a document slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub document_id: String,
    pub path: PathBuf,
}

impl UploadRequest {
    pub fn new(document_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        UploadRequest {
            document_id: document_id.into(),
            path: path.into(),
        }
    }
}

/// The seminar after an upload, and whether this upload submitted it
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub seminar: Seminar,
    pub submitted: bool,
}

/// Check that `requests` may be uploaded to `seminar`; returns its id
pub fn check_upload_target(seminar: &Seminar, requests: &[UploadRequest]) -> Result<i64> {
    let id = seminar.id.ok_or_else(|| {
        SemproError::StateTransition(
            "register research details before uploading documents".to_string(),
        )
    })?;
    if !matches!(seminar.status, SeminarStatus::Draft | SeminarStatus::Submitted) {
        return Err(SemproError::StateTransition(format!(
            "documents cannot be changed once the seminar is {}",
            seminar.status
        )));
    }

    let mut errors = FieldErrors::new();
    if requests.is_empty() {
        errors.push("documents", "select at least one file");
    }
    let mut seen = HashSet::new();
    for request in requests {
        if requirement(seminar.seminar_type, &request.document_id).is_none() {
            let known: Vec<&str> = required_documents(seminar.seminar_type)
                .iter()
                .map(|r| r.id)
                .collect();
            errors.push(
                request.document_id.clone(),
                format!(
                    "is not a {} document (expected one of {})",
                    seminar.seminar_type,
                    known.join(", ")
                ),
            );
        } else if !seen.insert(request.document_id.as_str()) {
            errors.push(request.document_id.clone(), "selected more than once");
        }
    }
    errors.into_result()?;
    Ok(id)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Read every selected file into memory
pub async fn read_document_files(requests: &[UploadRequest]) -> Result<Vec<DocumentFile>> {
    let mut files = Vec::with_capacity(requests.len());
    for request in requests {
        let bytes = tokio::fs::read(&request.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SemproError::FileNotFound(request.path.display().to_string())
            } else {
                SemproError::Io(e)
            }
        })?;
        debug!(document = %request.document_id, size = bytes.len(), "read upload file");
        files.push(DocumentFile {
            document_id: request.document_id.clone(),
            file_name: file_name_of(&request.path),
            bytes,
        });
    }
    Ok(files)
}

/// Whether the upload replaces a file the server already holds
pub fn is_replacement(cached: &Seminar, requests: &[UploadRequest]) -> bool {
    requests.iter().any(|r| {
        cached
            .documents
            .get(&r.document_id)
            .map_or(false, |d| d.uploaded)
    })
}

/// Fold an upload response into the cached seminar.
///
/// The server's status is taken as is. The only local change is the
/// SUBMITTED flip, made when the returned document map is complete.
pub fn apply_upload_response(cached: &Seminar, response: Seminar) -> UploadOutcome {
    let documents = normalize_documents(response.seminar_type, &response.documents);
    let mut seminar = Seminar {
        documents,
        ..response
    };
    seminar.status = reconcile_status(cached.status, seminar.status);
    if is_complete(&seminar) {
        seminar.status = advance_status(seminar.status, SeminarStatus::Submitted);
    }
    let submitted =
        cached.status == SeminarStatus::Draft && seminar.status == SeminarStatus::Submitted;
    UploadOutcome { seminar, submitted }
}

/// Upload files for the student's seminar and write the result through to `cache`
pub async fn upload_documents(
    client: &ApiClient,
    session: &mut Session,
    guard: &SubmitGuard,
    cache: &mut SeminarCache,
    cached: &Seminar,
    requests: &[UploadRequest],
) -> Result<UploadOutcome> {
    let seminar_id = check_upload_target(cached, requests)?;
    let _ticket = guard.try_begin()?;

    let files = read_document_files(requests).await?;
    let replace = is_replacement(cached, requests);
    let response = client
        .upload_documents(session, cached.seminar_type, seminar_id, &files, replace)
        .await?;

    let outcome = apply_upload_response(cached, response);
    if outcome.submitted {
        info!(id = seminar_id, "all documents uploaded, seminar submitted");
    } else {
        info!(id = seminar_id, uploaded = files.len(), "documents uploaded");
    }
    cache.upsert(outcome.seminar.clone());
    Ok(outcome)
}
