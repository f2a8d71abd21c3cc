//! Grade repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Record graded attempts and keep the progress aggregate in step.
//! - Serve the per-user grade history read model.
//!
//! # Invariants
//! - `record_grade` inserts the grade row and folds the progress aggregate in
//!   ONE transaction; a rejected insert (unknown user/exercise id) leaves the
//!   aggregate untouched.
//! - `update_grade`/`remove_grade` do not replay the aggregate; the stored
//!   average reflects grades as they were recorded.

use crate::model::grade::{Grade, GradeId};
use crate::model::progress::fold_grade;
use crate::model::{exercise::ExerciseId, user::UserId};
use crate::repo::{utc_now_text, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const GRADE_SELECT_SQL: &str =
    "SELECT id, user_id, exercise_id, grade, time_attempt FROM grades";

/// Read model for a user's grade history, joined to the exercise name.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeHistoryEntry {
    /// Name of the attempted exercise.
    pub exercise_name: String,
    /// Grade obtained.
    pub grade: f64,
    /// UTC attempt time as stored text.
    pub time_attempt: String,
}

/// Repository interface for grade operations.
pub trait GradeRepository {
    /// Records a graded attempt and folds it into the progress aggregate.
    fn record_grade(
        &mut self,
        user_id: UserId,
        exercise_id: ExerciseId,
        grade: f64,
    ) -> RepoResult<GradeId>;
    /// Gets one grade row by id.
    fn get_grade(&self, id: GradeId) -> RepoResult<Option<Grade>>;
    /// Lists a user's grades joined to exercise names, most recent first.
    fn get_grades_of_user(&self, user_id: UserId) -> RepoResult<Vec<GradeHistoryEntry>>;
    /// Overwrites a grade value without touching the progress aggregate.
    fn update_grade(&mut self, id: GradeId, grade: f64) -> RepoResult<()>;
    /// Deletes a grade row without touching the progress aggregate.
    fn remove_grade(&mut self, id: GradeId) -> RepoResult<()>;
}

/// SQLite-backed grade repository.
pub struct SqliteGradeRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteGradeRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl GradeRepository for SqliteGradeRepository<'_> {
    fn record_grade(
        &mut self,
        user_id: UserId,
        exercise_id: ExerciseId,
        grade: f64,
    ) -> RepoResult<GradeId> {
        Grade::validate_value(grade)?;

        let now = utc_now_text();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Foreign keys reject unknown user/exercise ids here, before any
        // aggregate state is touched.
        tx.execute(
            "INSERT INTO grades (user_id, exercise_id, grade, time_attempt)
             VALUES (?1, ?2, ?3, ?4);",
            params![user_id, exercise_id, grade, now],
        )?;
        let grade_id = tx.last_insert_rowid();

        let previous = tx
            .query_row(
                "SELECT average_grade, attempt_count
                 FROM user_progress
                 WHERE user_id = ?1 AND exercise_id = ?2;",
                params![user_id, exercise_id],
                |row| Ok((row.get::<_, f64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        let (average, attempts) = fold_grade(previous, grade);
        if previous.is_some() {
            tx.execute(
                "UPDATE user_progress
                 SET average_grade = ?1, attempt_count = ?2, last_attempt = ?3
                 WHERE user_id = ?4 AND exercise_id = ?5;",
                params![average, attempts, now, user_id, exercise_id],
            )?;
        } else {
            tx.execute(
                "INSERT INTO user_progress
                     (user_id, exercise_id, average_grade, attempt_count, last_attempt)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![user_id, exercise_id, average, attempts, now],
            )?;
        }

        tx.commit()?;
        Ok(grade_id)
    }

    fn get_grade(&self, id: GradeId) -> RepoResult<Option<Grade>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GRADE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_grade_row(row)?));
        }

        Ok(None)
    }

    fn get_grades_of_user(&self, user_id: UserId) -> RepoResult<Vec<GradeHistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT exercises.name, grades.grade, grades.time_attempt
             FROM grades
             JOIN exercises ON grades.exercise_id = exercises.id
             WHERE grades.user_id = ?1
             ORDER BY grades.time_attempt DESC, grades.id DESC;",
        )?;

        let mut rows = stmt.query([user_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(GradeHistoryEntry {
                exercise_name: row.get(0)?,
                grade: row.get(1)?,
                time_attempt: row.get(2)?,
            });
        }

        Ok(entries)
    }

    fn update_grade(&mut self, id: GradeId, grade: f64) -> RepoResult<()> {
        Grade::validate_value(grade)?;

        let changed = self.conn.execute(
            "UPDATE grades SET grade = ?1 WHERE id = ?2;",
            params![grade, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "grade", id });
        }

        Ok(())
    }

    fn remove_grade(&mut self, id: GradeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM grades WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "grade", id });
        }

        Ok(())
    }
}

fn parse_grade_row(row: &Row<'_>) -> RepoResult<Grade> {
    Ok(Grade {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        exercise_id: row.get("exercise_id")?,
        grade: row.get("grade")?,
        time_attempt: row.get("time_attempt")?,
    })
}
