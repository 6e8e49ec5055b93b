use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// May read bikes
    User,
    /// May read and mutate bikes
    Admin,
}

impl Role {
    /// Whether this role grants everything `required` grants
    pub fn satisfies(self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Admin => self == Role::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Stored account; the password is kept only as an Argon2 PHC string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl AppUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role,
        }
    }
}
