//! Exercise repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `exercises` table.
//! - Own partial-update semantics for name/description changes.
//!
//! # Invariants
//! - Supplied update fields are validated non-empty before SQL mutations.
//! - `update_exercise` applies all supplied fields in one transaction, so a
//!   partially updated row can never be observed.
//! - `remove_exercise` deletes referencing grade rows and the exercise row in
//!   one transaction.

use crate::model::exercise::{Exercise, ExerciseId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, TransactionBehavior};

const EXERCISE_SELECT_SQL: &str = "SELECT id, name, description FROM exercises";

/// Partial update for an exercise; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Repository interface for exercise CRUD operations.
pub trait ExerciseRepository {
    /// Inserts an exercise and returns the server-assigned id.
    fn add_exercise(&mut self, name: &str, description: &str) -> RepoResult<ExerciseId>;
    /// Lists all exercises in insertion (id) order.
    fn get_exercises(&self) -> RepoResult<Vec<Exercise>>;
    /// Gets one exercise by id.
    fn get_exercise(&self, id: ExerciseId) -> RepoResult<Option<Exercise>>;
    /// Applies the supplied fields; an empty update is a no-op.
    fn update_exercise(&mut self, id: ExerciseId, update: &ExerciseUpdate) -> RepoResult<()>;
    /// Removes an exercise together with all grade rows referencing it.
    fn remove_exercise(&mut self, id: ExerciseId) -> RepoResult<()>;
}

/// SQLite-backed exercise repository.
pub struct SqliteExerciseRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteExerciseRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ExerciseRepository for SqliteExerciseRepository<'_> {
    fn add_exercise(&mut self, name: &str, description: &str) -> RepoResult<ExerciseId> {
        Exercise::validate_name(name)?;
        Exercise::validate_description(description)?;

        self.conn.execute(
            "INSERT INTO exercises (name, description) VALUES (?1, ?2);",
            params![name, description],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_exercises(&self) -> RepoResult<Vec<Exercise>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXERCISE_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut exercises = Vec::new();
        while let Some(row) = rows.next()? {
            exercises.push(parse_exercise_row(row)?);
        }

        Ok(exercises)
    }

    fn get_exercise(&self, id: ExerciseId) -> RepoResult<Option<Exercise>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXERCISE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_exercise_row(row)?));
        }

        Ok(None)
    }

    fn update_exercise(&mut self, id: ExerciseId, update: &ExerciseUpdate) -> RepoResult<()> {
        if update.name.is_none() && update.description.is_none() {
            return Ok(());
        }
        if let Some(name) = update.name.as_deref() {
            Exercise::validate_name(name)?;
        }
        if let Some(description) = update.description.as_deref() {
            Exercise::validate_description(description)?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut changed = 0;
        if let Some(name) = update.name.as_deref() {
            changed = tx.execute(
                "UPDATE exercises SET name = ?1 WHERE id = ?2;",
                params![name, id],
            )?;
        }
        if let Some(description) = update.description.as_deref() {
            changed = tx.execute(
                "UPDATE exercises SET description = ?1 WHERE id = ?2;",
                params![description, id],
            )?;
        }

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "exercise",
                id,
            });
        }

        tx.commit()?;
        Ok(())
    }

    fn remove_exercise(&mut self, id: ExerciseId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM grades WHERE exercise_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM exercises WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "exercise",
                id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_exercise_row(row: &Row<'_>) -> RepoResult<Exercise> {
    let name: String = row.get("name")?;
    if name.is_empty() {
        return Err(RepoError::InvalidData(
            "empty name in exercises.name".to_string(),
        ));
    }

    Ok(Exercise {
        id: row.get("id")?,
        name,
        description: row.get("description")?,
    })
}
