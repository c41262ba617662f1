//! Records store: the four lifecycle operations over the `users` table.
//!
//! # Responsibility
//! - Own the store location and run each operation as one unit of work.
//! - Seed an empty store with fixed records exactly once.
//!
//! # Invariants
//! - Every call opens its own connection and releases it on every exit path.
//! - Every call runs in a single transaction; errors roll back.
//! - Only `initialize` may create the store file or its table.
//! - Log events carry counts and timings only, never names or emails.

use crate::config::StoreConfig;
use crate::db::schema::ensure_schema;
use crate::db::{open_db, DbError, OpenMode};
use crate::model::user::{User, SEED_USERS};
use crate::repo::user_repo::{RepoResult, SqliteUserRepository, UserRepository};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// What `RecordsStore::initialize` found and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The table was empty and the seed records were inserted.
    Seeded { inserted: usize },
    /// The table already held rows; nothing was inserted.
    AlreadyPopulated { count: u64 },
}

/// Row count reported in `store_<op>` log events.
trait AffectedRows {
    fn affected_rows(&self) -> u64;
}

impl AffectedRows for InitOutcome {
    /// Rows written; an already populated store writes none.
    fn affected_rows(&self) -> u64 {
        match self {
            Self::Seeded { inserted } => *inserted as u64,
            Self::AlreadyPopulated { .. } => 0,
        }
    }
}

impl AffectedRows for Vec<User> {
    fn affected_rows(&self) -> u64 {
        self.len() as u64
    }
}

impl AffectedRows for u64 {
    fn affected_rows(&self) -> u64 {
        *self
    }
}

impl AffectedRows for usize {
    fn affected_rows(&self) -> u64 {
        *self as u64
    }
}

/// Single-table user records store backed by one SQLite file.
///
/// Holds no connection between calls; callers that share a store file across
/// threads must serialize access themselves.
#[derive(Debug, Clone)]
pub struct RecordsStore {
    config: StoreConfig,
}

impl RecordsStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates the table if absent and seeds it when empty.
    ///
    /// Safe to call on every process start; repeated calls never duplicate rows.
    ///
    /// # Errors
    /// - `StorageUnavailable` when the store file cannot be created or written.
    pub fn initialize(&self) -> RepoResult<InitOutcome> {
        self.run("initialize", OpenMode::CreateIfMissing, |conn| {
            ensure_schema(conn)?;
            let repo = SqliteUserRepository::new(conn);

            let count = repo.count_users()?;
            if count > 0 {
                return Ok(InitOutcome::AlreadyPopulated { count });
            }

            for seed in &SEED_USERS {
                repo.insert_user(seed)?;
            }
            Ok(InitOutcome::Seeded {
                inserted: SEED_USERS.len(),
            })
        })
    }

    /// Returns every record in primary-key order.
    pub fn list(&self) -> RepoResult<Vec<User>> {
        self.run("list", OpenMode::ExistingOnly, |conn| {
            SqliteUserRepository::new(conn).list_users()
        })
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> RepoResult<u64> {
        self.run("count", OpenMode::ExistingOnly, |conn| {
            SqliteUserRepository::new(conn).count_users()
        })
    }

    /// Deletes all records, keeping the table. Returns the deleted row count.
    ///
    /// Ids assigned after a purge continue from the previous maximum.
    pub fn purge(&self) -> RepoResult<usize> {
        self.run("purge", OpenMode::ExistingOnly, |conn| {
            SqliteUserRepository::new(conn).delete_all_users()
        })
    }

    /// Replaces name and email on every record with fixed placeholders.
    ///
    /// Returns how many rows actually changed; already anonymized rows are
    /// left as they are.
    pub fn anonymize(&self) -> RepoResult<usize> {
        self.run("anonymize", OpenMode::ExistingOnly, |conn| {
            SqliteUserRepository::new(conn).anonymize_all_users()
        })
    }

    fn run<T: AffectedRows>(
        &self,
        operation: &'static str,
        mode: OpenMode,
        work: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = self.run_in_transaction(mode, work);

        match &result {
            Ok(value) => info!(
                "event=store_{} module=service status=ok rows={} duration_ms={}",
                operation,
                value.affected_rows(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_{} module=service status=error duration_ms={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }

    fn run_in_transaction<T>(
        &self,
        mode: OpenMode,
        work: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let path = self.config.path();
        let mut conn = open_db(path, mode)?;
        let tx = conn
            .transaction()
            .map_err(|err| DbError::from(err).with_path(path))?;

        let value = work(&*tx).map_err(|err| err.with_path(path))?;
        tx.commit()
            .map_err(|err| DbError::from(err).with_path(path))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{AffectedRows, InitOutcome};
    use crate::model::user::User;

    #[test]
    fn affected_rows_counts_writes_for_initialize() {
        assert_eq!(InitOutcome::Seeded { inserted: 2 }.affected_rows(), 2);
        assert_eq!(InitOutcome::AlreadyPopulated { count: 9 }.affected_rows(), 0);
    }

    #[test]
    fn affected_rows_counts_listed_and_changed_rows() {
        let users = vec![User {
            id: 1,
            name: "Anna Andersson".to_string(),
            email: "anna@test.se".to_string(),
        }];
        assert_eq!(users.affected_rows(), 1);
        assert_eq!(3usize.affected_rows(), 3);
        assert_eq!(0u64.affected_rows(), 0);
    }
}
