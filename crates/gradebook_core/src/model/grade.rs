//! Grade domain record.

use super::exercise::ExerciseId;
use super::user::UserId;
use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable identifier for a grade row.
pub type GradeId = i64;

/// One graded attempt of an exercise by a user.
///
/// `user_id` and `exercise_id` are enforced by foreign keys at insert time,
/// so a persisted grade always referenced existing rows when it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Server-assigned row id.
    pub id: GradeId,
    /// Owning user.
    pub user_id: UserId,
    /// Attempted exercise.
    pub exercise_id: ExerciseId,
    /// Numeric grade value.
    pub grade: f64,
    /// UTC attempt time as stored text (`%Y-%m-%d %H:%M:%S`).
    pub time_attempt: String,
}

impl Grade {
    /// Checks a grade value before it is written.
    ///
    /// NaN and infinities would poison the running average permanently, so
    /// they are rejected up front.
    pub fn validate_value(value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteGrade(value));
        }
        Ok(())
    }
}
