//! Session user model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{new_id, now};

/// A user of the tracker.
///
/// Larder runs a single-session model: the store holds at most one current
/// user at a time, and records reference users only through `owner_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id.
    ///
    /// Falls back to the email local part when no display name is given.
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        let email = email.into();
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        Self {
            id: new_id(),
            email,
            name,
            created_at: now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_defaults_to_email_local_part() {
        let user = User::new("ada@example.com", None);
        assert_eq!(user.name, "ada");

        let named = User::new("ada@example.com", Some("Ada".to_string()));
        assert_eq!(named.name, "Ada");

        let blank = User::new("ada@example.com", Some("  ".to_string()));
        assert_eq!(blank.name, "ada");
    }
}
