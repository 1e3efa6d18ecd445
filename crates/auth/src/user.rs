//! Account records exchanged with the remote user collection.

use serde::{Deserialize, Serialize};

use accesspanel_core::{Entity, UserId};

use crate::AccountRole;

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A user as reported by the remote collection.
///
/// `role` is kept as the raw string the backend sent: the role table is
/// editable, so the remote side may carry names this client has no variant
/// for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl User {
    /// Whether this account claims the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin.as_str()
    }

    /// Avatar URL, or `None` when the account has no (or an empty) image.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.trim().is_empty())
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
///
/// There is no confirmation field: it only exists on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub role: AccountRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"firstName":"Jon","lastName":"Snow","email":"jon@example.com","role":"admin","password":"winter","image":""}"#,
        )
        .unwrap();

        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.first_name, "Jon");
        assert!(user.is_admin());
        assert_eq!(user.image_url(), None);
    }

    #[test]
    fn registration_omits_missing_image() {
        let body = serde_json::to_value(Registration {
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.io".into(),
            password: "secret1".into(),
            image: None,
            role: AccountRole::User,
        })
        .unwrap();

        assert_eq!(body["firstName"], "A");
        assert_eq!(body["role"], "user");
        assert!(body.get("image").is_none());
        assert!(body.get("confirmPassword").is_none());
    }
}
