//! Shared state for one CLI invocation

use std::path::{Path, PathBuf};

use crate::api::ApiClient;
use crate::config::load_config;
use crate::errors::{Result, SemproError};
use crate::fs::{get_storage_path, resolve_config_dir};
use crate::schemas::{Config, Coordinator, Lecturer, Role, Student, UserProfile};
use crate::session::Session;

/// Config, client and hydrated session
#[derive(Debug)]
pub struct AppContext {
    pub config_dir: PathBuf,
    pub config: Config,
    pub client: ApiClient,
    pub session: Session,
}

impl AppContext {
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let config_dir = resolve_config_dir(config_dir);
        let config = load_config(&config_dir)?;
        let client = ApiClient::new(&config)?;
        let mut session = Session::new(get_storage_path(&config_dir));
        session.init()?;
        Ok(AppContext {
            config_dir,
            config,
            client,
            session,
        })
    }

    fn wrong_role(expected: Role, actual: &UserProfile) -> SemproError {
        SemproError::AccessDenied(format!(
            "this command is for {} accounts, you are logged in as {}",
            expected,
            actual.role()
        ))
    }

    pub fn student(&self) -> Result<Student> {
        match self.session.require_user()? {
            UserProfile::Student(student) => Ok(student.clone()),
            other => Err(Self::wrong_role(Role::Student, other)),
        }
    }

    pub fn lecturer(&self) -> Result<Lecturer> {
        match self.session.require_user()? {
            UserProfile::Lecturer(lecturer) => Ok(lecturer.clone()),
            other => Err(Self::wrong_role(Role::Lecturer, other)),
        }
    }

    pub fn coordinator(&self) -> Result<Coordinator> {
        match self.session.require_user()? {
            UserProfile::Coordinator(coordinator) => Ok(coordinator.clone()),
            other => Err(Self::wrong_role(Role::Coordinator, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lecturer_profile() -> UserProfile {
        UserProfile::Lecturer(Lecturer {
            nip: "123".to_string(),
            name: "Dr. Budi".to_string(),
            email: None,
            phone_number: None,
        })
    }

    #[test]
    fn test_role_accessors() {
        let temp = TempDir::new().unwrap();
        let mut ctx = AppContext::load(Some(temp.path())).unwrap();
        assert!(matches!(ctx.student().unwrap_err(), SemproError::Unauthorized(_)));

        ctx.session
            .establish("t".to_string(), "r".to_string(), lecturer_profile())
            .unwrap();
        assert_eq!(ctx.lecturer().unwrap().nip, "123");
        assert!(matches!(ctx.student().unwrap_err(), SemproError::AccessDenied(_)));
        assert!(matches!(ctx.coordinator().unwrap_err(), SemproError::AccessDenied(_)));

        let reloaded = AppContext::load(Some(temp.path())).unwrap();
        assert_eq!(reloaded.lecturer().unwrap().name, "Dr. Budi");
    }
}
