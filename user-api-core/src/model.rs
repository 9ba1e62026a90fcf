use serde::{Deserialize, Serialize};

/// A user record held by the [`UserRegistry`](crate::registry::UserRegistry).
///
/// `name` and `email` may be absent when the record was created without
/// them; absent fields are left out of the JSON object entirely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// `null` decodes to `None`. Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Input that only sets `name`.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }
}

/// Query parameters of `GET /users/filter`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }

    /// Returns `true` when `user` satisfies every non-empty criterion.
    ///
    /// Matching is a case-insensitive substring test. A record without the
    /// filtered field never matches.
    pub fn matches(&self, user: &User) -> bool {
        contains_ci(user.name.as_deref(), self.name.as_deref())
            && contains_ci(user.email.as_deref(), self.email.as_deref())
    }
}

fn contains_ci(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match needle.filter(|n| !n.is_empty()) {
        None => true,
        Some(needle) => haystack
            .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
    }
}

/// The six records every fresh registry starts with.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "John Doe", "john@example.com"),
        User::new(2, "Jane Smith", "jane@example.com"),
        User::new(3, "Alice Johnson", "alice@example.com"),
        User::new(4, "Bob Brown", "bob@example.com"),
        User::new(5, "Charlie White", "charlie@example.com"),
        User::new(6, "David Black", "david@example.com"),
    ]
}
