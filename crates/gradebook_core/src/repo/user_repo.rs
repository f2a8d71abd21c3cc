//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `users` table.
//! - Own the grade cascade applied when a user is removed.
//!
//! # Invariants
//! - Write paths validate the display name before SQL mutations.
//! - `remove_user` deletes the user's grade rows and the user row in one
//!   transaction; progress rows are left untouched until explicitly removed.

use crate::model::user::{User, UserId};
use crate::repo::{utc_now_text, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, TransactionBehavior};

const USER_SELECT_SQL: &str = "SELECT id, name, created_at FROM users";

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    /// Inserts a user and returns the server-assigned id.
    fn add_user(&mut self, name: &str) -> RepoResult<UserId>;
    /// Lists all users in insertion (id) order.
    fn get_users(&self) -> RepoResult<Vec<User>>;
    /// Gets one user by id.
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Changes a user's display name.
    fn rename_user(&mut self, id: UserId, name: &str) -> RepoResult<()>;
    /// Removes a user together with all their grade rows.
    fn remove_user(&mut self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn add_user(&mut self, name: &str) -> RepoResult<UserId> {
        User::validate_name(name)?;

        self.conn.execute(
            "INSERT INTO users (name, created_at) VALUES (?1, ?2);",
            params![name, utc_now_text()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn rename_user(&mut self, id: UserId, name: &str) -> RepoResult<()> {
        User::validate_name(name)?;

        let changed = self.conn.execute(
            "UPDATE users SET name = ?1 WHERE id = ?2;",
            params![name, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        Ok(())
    }

    fn remove_user(&mut self, id: UserId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM grades WHERE user_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM users WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let name: String = row.get("name")?;
    if name.is_empty() {
        return Err(RepoError::InvalidData(
            "empty name in users.name".to_string(),
        ));
    }

    Ok(User {
        id: row.get("id")?,
        name,
        created_at: row.get("created_at")?,
    })
}
