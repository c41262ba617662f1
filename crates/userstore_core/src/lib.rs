//! Core domain logic for the user records store.
//! This crate owns the `users` table and every operation that touches it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DATABASE_PATH_ENV, DEFAULT_DB_PATH};
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::user::{NewUser, User, UserId, ANONYMIZED_EMAIL, ANONYMIZED_NAME, SEED_USERS};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::records_store::{InitOutcome, RecordsStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
