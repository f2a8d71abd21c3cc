//! Progress repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Serve the per-(user, exercise) progress aggregate read APIs.
//! - Own explicit progress removal.
//!
//! # Invariants
//! - Lookups are keyed by the full (user, exercise) composite key.
//! - Progress rows carry no foreign keys and survive user/exercise deletion
//!   until `remove_user_progress` is called.

use crate::model::progress::Progress;
use crate::model::{exercise::ExerciseId, user::UserId};
use crate::repo::RepoResult;
use rusqlite::{params, Connection, Row};

const PROGRESS_SELECT_SQL: &str =
    "SELECT user_id, exercise_id, average_grade, attempt_count, last_attempt FROM user_progress";

/// Repository interface for progress aggregate access.
pub trait ProgressRepository {
    /// Gets the aggregate for one (user, exercise) pair.
    fn get_progress(
        &self,
        user_id: UserId,
        exercise_id: ExerciseId,
    ) -> RepoResult<Option<Progress>>;
    /// Lists all aggregates of a user in exercise-id order.
    fn list_progress_of_user(&self, user_id: UserId) -> RepoResult<Vec<Progress>>;
    /// Deletes every progress row of a user; returns the number removed.
    fn remove_user_progress(&self, user_id: UserId) -> RepoResult<usize>;
}

/// SQLite-backed progress repository.
pub struct SqliteProgressRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProgressRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProgressRepository for SqliteProgressRepository<'_> {
    fn get_progress(
        &self,
        user_id: UserId,
        exercise_id: ExerciseId,
    ) -> RepoResult<Option<Progress>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROGRESS_SELECT_SQL} WHERE user_id = ?1 AND exercise_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![user_id, exercise_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_progress_row(row)?));
        }

        Ok(None)
    }

    fn list_progress_of_user(&self, user_id: UserId) -> RepoResult<Vec<Progress>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROGRESS_SELECT_SQL} WHERE user_id = ?1 ORDER BY exercise_id ASC;"
        ))?;

        let mut rows = stmt.query([user_id])?;
        let mut aggregates = Vec::new();
        while let Some(row) = rows.next()? {
            aggregates.push(parse_progress_row(row)?);
        }

        Ok(aggregates)
    }

    fn remove_user_progress(&self, user_id: UserId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM user_progress WHERE user_id = ?1;", [user_id])?;
        Ok(removed)
    }
}

fn parse_progress_row(row: &Row<'_>) -> RepoResult<Progress> {
    Ok(Progress {
        user_id: row.get("user_id")?,
        exercise_id: row.get("exercise_id")?,
        average_grade: row.get("average_grade")?,
        attempt_count: row.get("attempt_count")?,
        last_attempt: row.get("last_attempt")?,
    })
}
