//! User profiles - the three portal roles as one tagged union

use serde::{Deserialize, Serialize};

/// Portal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Lecturer,
    Coordinator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => f.pad("STUDENT"),
            Role::Lecturer => f.pad("LECTURER"),
            Role::Coordinator => f.pad("COORDINATOR"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(Role::Student),
            "LECTURER" => Ok(Role::Lecturer),
            "COORDINATOR" => Ok(Role::Coordinator),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A student as returned by `/api/students`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub nim: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
}

/// A lecturer as returned by `/api/lecturers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecturer {
    pub nip: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A coordinator account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinator {
    pub nip: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Profile of the logged-in user, tagged by role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserProfile {
    Student(Student),
    Lecturer(Lecturer),
    Coordinator(Coordinator),
}

impl UserProfile {
    pub fn role(&self) -> Role {
        match self {
            UserProfile::Student(_) => Role::Student,
            UserProfile::Lecturer(_) => Role::Lecturer,
            UserProfile::Coordinator(_) => Role::Coordinator,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            UserProfile::Student(s) => &s.name,
            UserProfile::Lecturer(l) => &l.name,
            UserProfile::Coordinator(c) => &c.name,
        }
    }

    /// NIM for students, NIP for staff
    pub fn identifier(&self) -> &str {
        match self {
            UserProfile::Student(s) => &s.nim,
            UserProfile::Lecturer(l) => &l.nip,
            UserProfile::Coordinator(c) => &c.nip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_is_tagged_by_role() {
        let json = r#"{"role": "LECTURER", "nip": "123", "name": "Dr. Budi"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.role(), Role::Lecturer);
        assert_eq!(profile.identifier(), "123");
        assert_eq!(profile.name(), "Dr. Budi");
    }

    #[test]
    fn test_student_profile_round_trip() {
        let profile = UserProfile::Student(Student {
            nim: "H071191001".to_string(),
            name: "Andi".to_string(),
            email: None,
            phone_number: Some("0812".to_string()),
            semester: Some(8),
        });

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"role\":\"STUDENT\""));
        assert!(json.contains("\"phoneNumber\":\"0812\""));
        assert!(!json.contains("email"));

        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_role_display_pads() {
        assert_eq!(format!("{:<12}|", Role::Lecturer), "LECTURER    |");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"role": "ADMIN", "nip": "1", "name": "x"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
        assert!("admin".parse::<Role>().is_err());
        assert_eq!("coordinator".parse::<Role>().unwrap(), Role::Coordinator);
    }
}
