//! Exercise domain record.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable identifier for an exercise row.
pub type ExerciseId = i64;

/// An exercise users can attempt for a grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Server-assigned row id.
    pub id: ExerciseId,
    /// Short exercise name. Never empty in persisted state.
    pub name: String,
    /// Free-form description. Never empty in persisted state.
    pub description: String,
}

impl Exercise {
    /// Checks an exercise name before it is written.
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyExerciseName);
        }
        Ok(())
    }

    /// Checks an exercise description before it is written.
    pub fn validate_description(description: &str) -> Result<(), ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyExerciseDescription);
        }
        Ok(())
    }
}
