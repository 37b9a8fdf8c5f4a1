use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// One stored account document.
///
/// `password_hash` is a salted SHA-256 digest; the plaintext never
/// touches the store. `custom_filter` points at the user's uploaded
/// overlay image, when they have one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub role: Role,
    pub custom_filter: Option<PathBuf>,
}

/// What non-owners (the admin dashboard) get to see of a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub has_custom_filter: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            has_custom_filter: user.custom_filter.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            password_hash: "hash".to_string(),
            salt: "salt".to_string(),
            role: Role::User,
            custom_filter: None,
        }
    }

    #[test]
    fn test_summary_hides_credentials() {
        let mut u = user();
        u.custom_filter = Some(PathBuf::from("uploads/x.png"));
        let summary = UserSummary::from(&u);
        assert_eq!(summary.email, u.email);
        assert!(summary.has_custom_filter);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("salt"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_user_roundtrips_through_json() {
        let u = user();
        let json = serde_json::to_string(&u).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, u);
    }
}
