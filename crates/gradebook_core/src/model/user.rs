//! User domain record.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable identifier for a user row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// A registered user of the gradebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned row id.
    pub id: UserId,
    /// Display name. Never empty in persisted state.
    pub name: String,
    /// UTC creation time as stored text (`%Y-%m-%d %H:%M:%S`).
    pub created_at: String,
}

impl User {
    /// Checks a display name before it is written.
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        Ok(())
    }
}
