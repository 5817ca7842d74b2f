//! Claims carried by backend-issued access tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed role enumeration. Stored as text in the database and as
/// SCREAMING_SNAKE_CASE strings on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "TEACHER" => Ok(Role::Teacher),
            "STUDENT" => Ok(Role::Student),
            _ => Err(()),
        }
    }
}

/// Claims embedded in access tokens, inserted into request extensions by
/// the authentication middleware after verification. Immutable once issued;
/// each request gets its own copy.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Claims, Role};

    #[test]
    fn role_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"STUDENT\"").unwrap(),
            Role::Student
        );
    }

    #[test]
    fn role_rejects_unknown_strings() {
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("PRINCIPAL").is_err());
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn claims_use_wire_field_names() {
        let claims = Claims {
            user_id: 7,
            email: "a@example.test".to_string(),
            role: Role::Teacher,
            iat: 100,
            exp: 200,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["userId"], 7);
        assert_eq!(value["role"], "TEACHER");
    }
}
