//! Core persistence logic for the gradebook store.
//! This crate is the single source of truth for the progress-aggregation
//! invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::exercise::{Exercise, ExerciseId};
pub use model::grade::{Grade, GradeId};
pub use model::progress::{fold_grade, Progress};
pub use model::user::{User, UserId};
pub use model::ValidationError;
pub use repo::exercise_repo::{ExerciseRepository, ExerciseUpdate, SqliteExerciseRepository};
pub use repo::grade_repo::{GradeHistoryEntry, GradeRepository, SqliteGradeRepository};
pub use repo::progress_repo::{ProgressRepository, SqliteProgressRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult, TIMESTAMP_FORMAT};
pub use service::gradebook_service::GradebookService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
