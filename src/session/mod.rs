//! Authenticated session
//!
//! The session is an explicit object handed to everything that talks to the
//! backend. `init()` hydrates it from disk and `teardown()` wipes both disk
//! and memory. Exactly three keys are persisted: `token`, `refreshToken` and
//! `userData` (the serialized profile).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SemproError};
use crate::fs::{read_json, write_json};
use crate::schemas::{Role, UserProfile};

/// On-disk form of the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default, rename = "refreshToken")]
    pub refresh_token: Option<String>,

    /// Profile JSON, stored as a string
    #[serde(default, rename = "userData")]
    pub user_data: Option<String>,
}

/// In-memory session bound to a storage file
#[derive(Debug)]
pub struct Session {
    storage_path: PathBuf,
    token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    /// Create an empty session that persists to `storage_path`
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Session {
            storage_path: storage_path.into(),
            token: None,
            refresh_token: None,
            user: None,
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Hydrate from storage. A missing file leaves the session logged out.
    pub fn init(&mut self) -> Result<()> {
        let stored: StoredSession = match read_json(&self.storage_path) {
            Ok(stored) => stored,
            Err(SemproError::FileNotFound(_)) => StoredSession::default(),
            Err(e) => return Err(e),
        };

        let user = match stored.user_data.as_deref() {
            Some(raw) => Some(serde_json::from_str::<UserProfile>(raw).map_err(|e| {
                SemproError::InvalidJson(format!("stored userData is not a valid profile: {}", e))
            })?),
            None => None,
        };

        self.token = stored.token;
        self.refresh_token = stored.refresh_token;
        self.user = user;
        tracing::debug!(authenticated = self.is_authenticated(), "session initialised");
        Ok(())
    }

    /// Clear storage and memory in one step.
    ///
    /// Storage is rewritten atomically with all three keys empty.
    pub fn teardown(&mut self) -> Result<()> {
        self.token = None;
        self.refresh_token = None;
        self.user = None;
        write_json(&self.storage_path, &StoredSession::default())?;
        tracing::info!("session cleared");
        Ok(())
    }

    /// Record a successful login
    pub fn establish(
        &mut self,
        token: String,
        refresh_token: String,
        user: UserProfile,
    ) -> Result<()> {
        self.token = Some(token);
        self.refresh_token = Some(refresh_token);
        self.user = Some(user);
        self.persist()
    }

    /// Replace the access token after a refresh
    pub fn update_token(&mut self, token: String, refresh_token: Option<String>) -> Result<()> {
        self.token = Some(token);
        if let Some(refresh_token) = refresh_token {
            self.refresh_token = Some(refresh_token);
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let user_data = match &self.user {
            Some(user) => Some(
                serde_json::to_string(user).map_err(|e| SemproError::InvalidJson(e.to_string()))?,
            ),
            None => None,
        };
        let stored = StoredSession {
            token: self.token.clone(),
            refresh_token: self.refresh_token.clone(),
            user_data,
        };
        write_json(&self.storage_path, &stored)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(UserProfile::role)
    }

    /// The logged-in profile, or `Unauthorized` when logged out
    pub fn require_user(&self) -> Result<&UserProfile> {
        self.user
            .as_ref()
            .ok_or_else(|| SemproError::Unauthorized("not logged in".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Lecturer;
    use tempfile::TempDir;

    fn lecturer() -> UserProfile {
        UserProfile::Lecturer(Lecturer {
            nip: "123".to_string(),
            name: "Dr. Budi".to_string(),
            email: None,
            phone_number: None,
        })
    }

    #[test]
    fn test_init_without_storage_is_logged_out() {
        let temp = TempDir::new().unwrap();
        let mut session = Session::new(temp.path().join("storage.json"));
        session.init().unwrap();

        assert!(!session.is_authenticated());
        assert!(session.require_user().is_err());
    }

    #[test]
    fn test_establish_persists_three_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");
        let mut session = Session::new(&path);
        session
            .establish("access".to_string(), "refresh".to_string(), lecturer())
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<&String> = raw.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(raw["token"], "access");
        assert_eq!(raw["refreshToken"], "refresh");
        assert!(raw["userData"].as_str().unwrap().contains("\"role\":\"LECTURER\""));
    }

    #[test]
    fn test_init_hydrates_from_storage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");
        Session::new(&path)
            .establish("access".to_string(), "refresh".to_string(), lecturer())
            .unwrap();

        let mut session = Session::new(&path);
        session.init().unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("access"));
        assert_eq!(session.refresh_token(), Some("refresh"));
        assert_eq!(session.role(), Some(Role::Lecturer));
    }

    #[test]
    fn test_teardown_clears_disk_and_memory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");
        let mut session = Session::new(&path);
        session
            .establish("access".to_string(), "refresh".to_string(), lecturer())
            .unwrap();

        session.teardown().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());

        let stored: StoredSession = read_json(&path).unwrap();
        assert_eq!(stored, StoredSession::default());
    }

    #[test]
    fn test_update_token_keeps_refresh_token() {
        let temp = TempDir::new().unwrap();
        let mut session = Session::new(temp.path().join("storage.json"));
        session
            .establish("old".to_string(), "refresh".to_string(), lecturer())
            .unwrap();

        session.update_token("new".to_string(), None).unwrap();
        assert_eq!(session.token(), Some("new"));
        assert_eq!(session.refresh_token(), Some("refresh"));
    }

    #[test]
    fn test_corrupt_user_data_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");
        std::fs::write(&path, r#"{"token": "t", "refreshToken": "r", "userData": "{oops"}"#).unwrap();

        let mut session = Session::new(&path);
        assert!(matches!(session.init().unwrap_err(), SemproError::InvalidJson(_)));
    }
}
