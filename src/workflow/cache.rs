//! In-memory cache of fetched seminar, lecturer and student lists

use crate::api::ApiClient;
use crate::domain::reconcile_status;
use crate::errors::Result;
use crate::schemas::{Lecturer, Seminar, Student};
use crate::session::Session;

/// Lists fetched from the server, refreshed explicitly after mutations
#[derive(Debug, Default)]
pub struct SeminarCache {
    seminars: Option<Vec<Seminar>>,
    lecturers: Option<Vec<Lecturer>>,
    students: Option<Vec<Student>>,
}

impl SeminarCache {
    pub fn new() -> Self {
        SeminarCache::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.seminars.is_some()
    }

    /// Cached seminars, fetching them on first use
    pub async fn seminars(&mut self, client: &ApiClient, session: &mut Session) -> Result<&[Seminar]> {
        if self.seminars.is_none() {
            self.seminars = Some(client.list_seminars(session).await?);
        }
        Ok(self.seminars.as_deref().unwrap_or(&[]))
    }

    pub async fn lecturers(&mut self, client: &ApiClient, session: &mut Session) -> Result<&[Lecturer]> {
        if self.lecturers.is_none() {
            self.lecturers = Some(client.list_lecturers(session).await?);
        }
        Ok(self.lecturers.as_deref().unwrap_or(&[]))
    }

    pub async fn students(&mut self, client: &ApiClient, session: &mut Session) -> Result<&[Student]> {
        if self.students.is_none() {
            self.students = Some(client.list_students(session).await?);
        }
        Ok(self.students.as_deref().unwrap_or(&[]))
    }

    /// A cached seminar by id, without fetching
    pub fn get(&self, id: i64) -> Option<&Seminar> {
        self.seminars
            .as_deref()?
            .iter()
            .find(|s| s.id == Some(id))
    }

    /// Drop every cached list so the next read refetches
    pub fn invalidate(&mut self) {
        self.seminars = None;
        self.lecturers = None;
        self.students = None;
    }

    /// Refetch and replace the list; the server's statuses win
    pub async fn refetch(&mut self, client: &ApiClient, session: &mut Session) -> Result<&[Seminar]> {
        let fresh = client.list_seminars(session).await?;
        self.replace_all(fresh);
        Ok(self.seminars.as_deref().unwrap_or(&[]))
    }

    pub fn replace_all(&mut self, fresh: Vec<Seminar>) {
        if let Some(cached) = &self.seminars {
            for seminar in &fresh {
                if let Some(old) = cached.iter().find(|c| c.id.is_some() && c.id == seminar.id) {
                    reconcile_status(old.status, seminar.status);
                }
            }
        }
        self.seminars = Some(fresh);
    }

    /// Write a server-confirmed seminar through to the cache
    pub fn upsert(&mut self, seminar: Seminar) {
        let Some(seminars) = self.seminars.as_mut() else {
            return;
        };
        match seminars
            .iter_mut()
            .find(|s| s.id.is_some() && s.id == seminar.id)
        {
            Some(slot) => *slot = seminar,
            None => seminars.push(seminar),
        }
    }
}
