//! Typed wrappers for each backend endpoint

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::domain::AssessmentPayload;
use crate::errors::Result;
use crate::schemas::{
    Assessment, Lecturer, Page, Role, SecurityLog, Seminar, SeminarType, Student,
};
use crate::session::Session;

use super::client::{decode, ApiClient};
use super::types::{DocumentFile, ResearchDetails, RoleResponse, ScheduleRequest};

impl ApiClient {
    // ===== AUTH =====

    /// Ask the server which role the current token carries
    pub async fn verify_role(&self, session: &mut Session) -> Result<Role> {
        let body: RoleResponse = self.get(session, "/auth/verify-role").await?;
        Ok(body.role)
    }

    // ===== PEOPLE =====

    pub async fn list_students(&self, session: &mut Session) -> Result<Vec<Student>> {
        self.get(session, "/students").await
    }

    pub async fn get_student(&self, session: &mut Session, nim: &str) -> Result<Student> {
        self.get(session, &format!("/students/{}", nim)).await
    }

    pub async fn list_lecturers(&self, session: &mut Session) -> Result<Vec<Lecturer>> {
        self.get(session, "/lecturers").await
    }

    pub async fn get_lecturer(&self, session: &mut Session, nip: &str) -> Result<Lecturer> {
        self.get(session, &format!("/lecturers/{}", nip)).await
    }

    // ===== SEMINARS =====

    pub async fn list_seminars(&self, session: &mut Session) -> Result<Vec<Seminar>> {
        self.get(session, "/seminars").await
    }

    pub async fn get_seminar(&self, session: &mut Session, id: i64) -> Result<Seminar> {
        self.get(session, &format!("/seminars/{}", id)).await
    }

    /// The student's seminar of the given type; None when not registered yet
    pub async fn get_student_seminar(
        &self,
        session: &mut Session,
        seminar_type: SeminarType,
        nim: &str,
    ) -> Result<Option<Seminar>> {
        let path = format!("/seminars/{}/{}", seminar_type.path_segment(), nim);
        self.get_optional(session, &path).await
    }

    /// Register research details; the server creates the DRAFT seminar
    pub async fn register_seminar(
        &self,
        session: &mut Session,
        seminar_type: SeminarType,
        details: &ResearchDetails,
    ) -> Result<Seminar> {
        let path = format!("/seminars/{}-register", seminar_type.path_segment());
        self.send_json(session, Method::POST, &path, details).await
    }

    /// Update research details of an existing seminar
    pub async fn update_seminar(
        &self,
        session: &mut Session,
        id: i64,
        details: &ResearchDetails,
    ) -> Result<Seminar> {
        self.send_json(session, Method::PUT, &format!("/seminars/{}", id), details)
            .await
    }

    /// Upload document files as multipart, one part per requirement id.
    ///
    /// The first upload is a POST; replacing earlier uploads is a PUT.
    pub async fn upload_documents(
        &self,
        session: &mut Session,
        seminar_type: SeminarType,
        seminar_id: i64,
        files: &[DocumentFile],
        replace: bool,
    ) -> Result<Seminar> {
        let path = format!("/seminars/{}-documents", seminar_type.path_segment());
        let method = if replace { Method::PUT } else { Method::POST };
        tracing::debug!("{} {} ({} files)", method, path, files.len());
        let url = self.url(&path);

        let response = self
            .send_authorized(session, |http| {
                let form = files.iter().fold(
                    Form::new().text("seminarId", seminar_id.to_string()),
                    |form, file| {
                        form.part(
                            file.document_id.clone(),
                            Part::bytes(file.bytes.clone()).file_name(file.file_name.clone()),
                        )
                    },
                );
                http.request(method.clone(), &url).multipart(form)
            })
            .await?;
        decode(response).await
    }

    /// Coordinator assigns time, room and assessors
    pub async fn schedule_seminar(
        &self,
        session: &mut Session,
        request: &ScheduleRequest,
    ) -> Result<Seminar> {
        self.send_json(session, Method::PUT, "/seminars/proposal-scheduled", request)
            .await
    }

    pub async fn submit_assessment(
        &self,
        session: &mut Session,
        seminar_id: i64,
        payload: &AssessmentPayload,
    ) -> Result<Assessment> {
        let path = format!("/seminars/{}/assess", seminar_id);
        self.send_json(session, Method::POST, &path, payload).await
    }

    // ===== AUDIT =====

    pub async fn security_logs(
        &self,
        session: &mut Session,
        page: u32,
        per_page: u32,
        show_all: bool,
    ) -> Result<Page<SecurityLog>> {
        let query = [
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
            ("showAll", show_all.to_string()),
        ];
        self.get_with_query(session, "/security-logs", &query).await
    }
}
