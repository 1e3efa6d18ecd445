use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role an account can be registered with.
///
/// The UI only reflects this claim; nothing in the client enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl AccountRole {
    pub const ALL: [AccountRole; 2] = [AccountRole::User, AccountRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::User => "user",
            AccountRole::Admin => "admin",
        }
    }

    /// Label shown in the role selector.
    pub fn label(&self) -> &'static str {
        match self {
            AccountRole::User => "User",
            AccountRole::Admin => "Admin",
        }
    }
}

impl FromStr for AccountRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(AccountRole::User),
            "admin" => Ok(AccountRole::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl core::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("admin".parse::<AccountRole>(), Ok(AccountRole::Admin));
        assert_eq!(
            "Admin".parse::<AccountRole>(),
            Err(UnknownRole("Admin".to_string()))
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AccountRole::Admin).unwrap(), "\"admin\"");
    }
}
