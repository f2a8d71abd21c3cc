//! Progress aggregate and the incremental mean update.
//!
//! # Responsibility
//! - Define the per-(user, exercise) running-average summary record.
//! - Provide the pure fold applied whenever a new grade is recorded.
//!
//! # Invariants
//! - `average_grade` equals the arithmetic mean of all grades folded into
//!   the row, in fold order.
//! - The aggregate is append-only: deleting or editing a past grade is not
//!   replayed into it.

use super::exercise::ExerciseId;
use super::user::UserId;
use serde::{Deserialize, Serialize};

/// Per-(user, exercise) progress summary.
///
/// Keyed by the pair; at most one row exists per combination. The row is
/// created lazily on the first recorded grade and overwritten in place on
/// every subsequent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Owning user.
    pub user_id: UserId,
    /// Attempted exercise.
    pub exercise_id: ExerciseId,
    /// Running average over all folded grades.
    pub average_grade: f64,
    /// Number of grades folded into the average.
    pub attempt_count: i64,
    /// UTC time of the most recent fold as stored text.
    pub last_attempt: String,
}

/// Folds one new grade into a `(average, attempts)` pair.
///
/// Recomputes the running average from only the previous average, previous
/// count and the new value, without rescanning grade history. A missing
/// previous aggregate is treated as `(0, 0)`, which makes a first attempt
/// come out as exactly the new grade.
pub fn fold_grade(previous: Option<(f64, i64)>, new_grade: f64) -> (f64, i64) {
    let (average, attempts) = previous.unwrap_or((0.0, 0));
    let next_attempts = attempts + 1;
    let next_average = (average * attempts as f64 + new_grade) / next_attempts as f64;
    (next_average, next_attempts)
}
