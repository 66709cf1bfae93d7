use serde::{Deserialize, Serialize};

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Payload for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Narrows `users.find_all`. An empty filter matches everyone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Case-insensitive substring of the user's name.
    pub name_contains: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        match &self.name_contains {
            Some(needle) => user.name.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}
