use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the marketplace an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Restaurant,
    Supplier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Restaurant => f.write_str("restaurant"),
            Role::Supplier => f.write_str("supplier"),
        }
    }
}

/// Represents a registered marketplace account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub business_name: String,
    pub role: Role,
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub business_name: String,
    pub role: Role,
}

/// Payload for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Notes
    /// The `id` field is initialized as an empty string and will be set by the user store.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        let name = name.into();
        Self {
            id: String::new(),
            business_name: name.clone(),
            name,
            email: email.into(),
            role,
        }
    }
}
