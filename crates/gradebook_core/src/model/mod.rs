//! Domain model for the gradebook store.
//!
//! # Responsibility
//! - Define the canonical records for users, exercises, grades and progress.
//! - Own field validation applied before persistence writes.
//!
//! # Invariants
//! - Identity fields are server-assigned SQLite row ids, never reused by core.
//! - Timestamps are UTC text in `%Y-%m-%d %H:%M:%S`, generated by core code.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod exercise;
pub mod grade;
pub mod progress;
pub mod user;

/// Field-level validation failure raised before a write reaches SQLite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    EmptyUserName,
    EmptyExerciseName,
    EmptyExerciseDescription,
    NonFiniteGrade(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUserName => write!(f, "user name must not be empty"),
            Self::EmptyExerciseName => write!(f, "exercise name must not be empty"),
            Self::EmptyExerciseDescription => {
                write!(f, "exercise description must not be empty")
            }
            Self::NonFiniteGrade(value) => {
                write!(f, "grade value must be finite, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}
