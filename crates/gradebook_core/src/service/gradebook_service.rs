//! Gradebook use-case service.
//!
//! # Responsibility
//! - Provide a single entry point over every gradebook operation.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - The service borrows one connection; each call is one unit of work.

use crate::model::exercise::{Exercise, ExerciseId};
use crate::model::grade::{Grade, GradeId};
use crate::model::progress::Progress;
use crate::model::user::{User, UserId};
use crate::repo::exercise_repo::{
    ExerciseRepository, ExerciseUpdate, SqliteExerciseRepository,
};
use crate::repo::grade_repo::{GradeHistoryEntry, GradeRepository, SqliteGradeRepository};
use crate::repo::progress_repo::{ProgressRepository, SqliteProgressRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Use-case facade over the four gradebook aggregates.
///
/// Constructs the right repository per call, so callers never touch SQL or
/// repository wiring.
pub struct GradebookService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> GradebookService<'conn> {
    /// Creates a service over a migrated connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Registers a user and returns the server-assigned id.
    pub fn add_user(&mut self, name: &str) -> RepoResult<UserId> {
        SqliteUserRepository::new(self.conn).add_user(name)
    }

    /// Lists all users in insertion order.
    pub fn get_users(&mut self) -> RepoResult<Vec<User>> {
        SqliteUserRepository::new(self.conn).get_users()
    }

    /// Gets one user by id.
    pub fn get_user(&mut self, id: UserId) -> RepoResult<Option<User>> {
        SqliteUserRepository::new(self.conn).get_user(id)
    }

    /// Changes a user's display name.
    pub fn rename_user(&mut self, id: UserId, name: &str) -> RepoResult<()> {
        SqliteUserRepository::new(self.conn).rename_user(id, name)
    }

    /// Removes a user and their grade rows; progress rows stay until
    /// [`remove_user_progress`](Self::remove_user_progress).
    pub fn remove_user(&mut self, id: UserId) -> RepoResult<()> {
        SqliteUserRepository::new(self.conn).remove_user(id)
    }

    /// Registers an exercise and returns the server-assigned id.
    pub fn add_exercise(&mut self, name: &str, description: &str) -> RepoResult<ExerciseId> {
        SqliteExerciseRepository::new(self.conn).add_exercise(name, description)
    }

    /// Lists all exercises in insertion order.
    pub fn get_exercises(&mut self) -> RepoResult<Vec<Exercise>> {
        SqliteExerciseRepository::new(self.conn).get_exercises()
    }

    /// Gets one exercise by id.
    pub fn get_exercise(&mut self, id: ExerciseId) -> RepoResult<Option<Exercise>> {
        SqliteExerciseRepository::new(self.conn).get_exercise(id)
    }

    /// Applies the supplied exercise fields; `None` fields stay untouched.
    pub fn update_exercise(
        &mut self,
        id: ExerciseId,
        update: &ExerciseUpdate,
    ) -> RepoResult<()> {
        SqliteExerciseRepository::new(self.conn).update_exercise(id, update)
    }

    /// Removes an exercise and all grade rows referencing it.
    pub fn remove_exercise(&mut self, id: ExerciseId) -> RepoResult<()> {
        SqliteExerciseRepository::new(self.conn).remove_exercise(id)
    }

    /// Records a graded attempt and folds it into the progress aggregate.
    pub fn record_grade(
        &mut self,
        user_id: UserId,
        exercise_id: ExerciseId,
        grade: f64,
    ) -> RepoResult<GradeId> {
        SqliteGradeRepository::new(self.conn).record_grade(user_id, exercise_id, grade)
    }

    /// Gets one grade row by id.
    pub fn get_grade(&mut self, id: GradeId) -> RepoResult<Option<Grade>> {
        SqliteGradeRepository::new(self.conn).get_grade(id)
    }

    /// Lists a user's grade history, most recent first.
    pub fn get_grades_of_user(
        &mut self,
        user_id: UserId,
    ) -> RepoResult<Vec<GradeHistoryEntry>> {
        SqliteGradeRepository::new(self.conn).get_grades_of_user(user_id)
    }

    /// Overwrites a grade value. The progress aggregate is not replayed.
    pub fn update_grade(&mut self, id: GradeId, grade: f64) -> RepoResult<()> {
        SqliteGradeRepository::new(self.conn).update_grade(id, grade)
    }

    /// Deletes one grade row. The progress aggregate is not replayed.
    pub fn remove_grade(&mut self, id: GradeId) -> RepoResult<()> {
        SqliteGradeRepository::new(self.conn).remove_grade(id)
    }

    /// Gets the aggregate for one (user, exercise) pair.
    pub fn get_progress(
        &mut self,
        user_id: UserId,
        exercise_id: ExerciseId,
    ) -> RepoResult<Option<Progress>> {
        SqliteProgressRepository::new(self.conn).get_progress(user_id, exercise_id)
    }

    /// Lists all aggregates of a user.
    pub fn list_progress_of_user(&mut self, user_id: UserId) -> RepoResult<Vec<Progress>> {
        SqliteProgressRepository::new(self.conn).list_progress_of_user(user_id)
    }

    /// Deletes every progress row of a user; returns the number removed.
    pub fn remove_user_progress(&mut self, user_id: UserId) -> RepoResult<usize> {
        SqliteProgressRepository::new(self.conn).remove_user_progress(user_id)
    }
}
