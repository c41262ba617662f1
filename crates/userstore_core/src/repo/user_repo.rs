//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide bulk lifecycle APIs over the `users` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Listing is always in primary-key order.
//! - Anonymization preserves ids and row count.

use crate::db::DbError;
use crate::model::user::{NewUser, User, UserId, ANONYMIZED_EMAIL, ANONYMIZED_NAME};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl RepoError {
    /// Attaches the store location to storage failures that lack one.
    pub fn with_path(self, store_path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Db(err) => Self::Db(err.with_path(store_path)),
            other => other,
        }
    }

    /// Returns the storage-level error, if any.
    pub fn as_db_error(&self) -> Option<&DbError> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::from(value))
    }
}

/// Repository interface for user record lifecycle operations.
pub trait UserRepository {
    fn count_users(&self) -> RepoResult<u64>;
    fn insert_user(&self, user: &NewUser<'_>) -> RepoResult<UserId>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
    /// Deletes every row and returns how many were removed.
    fn delete_all_users(&self) -> RepoResult<usize>;
    /// Overwrites identifying fields and returns how many rows changed.
    fn anonymize_all_users(&self) -> RepoResult<usize>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn count_users(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn insert_user(&self, user: &NewUser<'_>) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2);",
            params![user.name, user.email],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email FROM users ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn delete_all_users(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM users;", [])?)
    }

    fn anonymize_all_users(&self) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE users
             SET name = ?1, email = ?2
             WHERE name IS NOT ?1 OR email IS NOT ?2;",
            params![ANONYMIZED_NAME, ANONYMIZED_EMAIL],
        )?;
        Ok(changed)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id: UserId = row.get("id")?;
    let name = row
        .get::<_, Option<String>>("name")?
        .ok_or_else(|| RepoError::InvalidData(format!("null users.name for id {id}")))?;
    let email = row
        .get::<_, Option<String>>("email")?
        .ok_or_else(|| RepoError::InvalidData(format!("null users.email for id {id}")))?;

    Ok(User { id, name, email })
}
