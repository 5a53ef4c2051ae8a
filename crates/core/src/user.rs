use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account, as persisted in the relational store.
///
/// The stored password hash never serializes outward: HTTP responses and
/// token claims only ever see the remaining columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity, generated by the relational store on insert.
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Logical unique key; uniqueness is not enforced at the data layer.
    pub email: String,
    pub user_image_url: String,
    /// Salted password hash. Never the raw password.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub verified: bool,
    /// Server-assigned creation timestamp.
    pub created: DateTime<Utc>,
}

impl User {
    /// Object-store key for this user's image blob.
    pub fn blob_key(&self) -> String {
        user_blob_key(self.user_id)
    }
}

/// Store-facing fields for user registration.
///
/// Holds the already-hashed password; the raw password exists only in the
/// registration request scope.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Deterministic object-store key for a user's image: `user_id_<id>`.
pub fn user_blob_key(user_id: i64) -> String {
    format!("user_id_{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            user_id: 9,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            user_image_url: crate::PLACEHOLDER_IMAGE_URL.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            verified: false,
            created: Utc::now(),
        }
    }

    #[test]
    fn blob_key_embeds_id() {
        assert_eq!(user_blob_key(9), "user_id_9");
        assert_eq!(sample_user().blob_key(), "user_id_9");
    }

    #[test]
    fn password_hash_never_serializes() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert!(value.get("password_hash").is_none());
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ada@example.com");
    }

    #[test]
    fn deserializes_without_hash() {
        let user: User = serde_json::from_value(serde_json::json!({
            "user_id": 1,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "user_image_url": crate::PLACEHOLDER_IMAGE_URL,
            "verified": true,
            "created": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(user.password_hash.is_empty());
        assert!(user.verified);
    }
}
