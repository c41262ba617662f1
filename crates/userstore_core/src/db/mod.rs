//! SQLite storage bootstrap, schema creation and error taxonomy.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the records store.
//! - Create the `users` table on demand without touching existing data.
//! - Classify engine errors into store-level failure kinds.
//!
//! # Invariants
//! - Schema creation never drops or alters an existing table.
//! - Engine errors are classified once, at the `rusqlite::Error` boundary.

use rusqlite::ffi;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, OpenMode};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Store file cannot be opened, created or written.
    StorageUnavailable {
        path: Option<PathBuf>,
        source: rusqlite::Error,
    },
    /// A write would store NULL into a NOT NULL column.
    SchemaViolation(rusqlite::Error),
    /// The store was used before `initialize` created its table.
    MissingTable {
        table: String,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Attaches the store location to storage failures that lack one.
    pub fn with_path(self, store_path: impl Into<PathBuf>) -> Self {
        match self {
            Self::StorageUnavailable { path: None, source } => Self::StorageUnavailable {
                path: Some(store_path.into()),
                source,
            },
            other => other,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable {
                path: Some(path),
                source,
            } => write!(
                f,
                "record store unavailable at `{}`: {source}",
                path.display()
            ),
            Self::StorageUnavailable { path: None, source } => {
                write!(f, "record store unavailable: {source}")
            }
            Self::SchemaViolation(err) => write!(f, "schema violation: {err}"),
            Self::MissingTable { table, .. } => write!(
                f,
                "table `{table}` does not exist; initialize the store first"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable { source, .. } => Some(source),
            Self::SchemaViolation(err) => Some(err),
            Self::MissingTable { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        if let Some(table) = missing_table_name(&value) {
            return Self::MissingTable {
                table,
                source: value,
            };
        }

        match value.sqlite_error_code() {
            Some(code) if is_storage_failure(code) => Self::StorageUnavailable {
                path: None,
                source: value,
            },
            Some(ErrorCode::ConstraintViolation) if is_not_null_violation(&value) => {
                Self::SchemaViolation(value)
            }
            _ => Self::Sqlite(value),
        }
    }
}

fn is_storage_failure(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::CannotOpen
            | ErrorCode::ReadOnly
            | ErrorCode::PermissionDenied
            | ErrorCode::DiskFull
            | ErrorCode::SystemIoFailure
            | ErrorCode::NotADatabase
            | ErrorCode::AuthorizationForStatementDenied
    )
}

fn is_not_null_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == ffi::SQLITE_CONSTRAINT_NOTNULL
    )
}

fn missing_table_name(err: &rusqlite::Error) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message
            .strip_prefix("no such table: ")
            .map(|table| table.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use rusqlite::ffi;
    use std::path::PathBuf;

    fn failure(code: i32, message: Option<&str>) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(code), message.map(str::to_string))
    }

    #[test]
    fn missing_table_message_is_classified_with_table_name() {
        let err = DbError::from(failure(ffi::SQLITE_ERROR, Some("no such table: users")));
        match err {
            DbError::MissingTable { table, .. } => assert_eq!(table, "users"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cantopen_is_storage_unavailable_and_accepts_path() {
        let err = DbError::from(failure(ffi::SQLITE_CANTOPEN, None)).with_path("/nope/db");
        match &err {
            DbError::StorageUnavailable { path, .. } => {
                assert_eq!(path.as_deref(), Some(PathBuf::from("/nope/db").as_path()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("/nope/db"));
    }

    #[test]
    fn not_null_constraint_is_schema_violation_but_unique_is_not() {
        let not_null = DbError::from(failure(ffi::SQLITE_CONSTRAINT_NOTNULL, None));
        assert!(matches!(not_null, DbError::SchemaViolation(_)));

        let unique = DbError::from(failure(ffi::SQLITE_CONSTRAINT_UNIQUE, None));
        assert!(matches!(unique, DbError::Sqlite(_)));
    }

    #[test]
    fn with_path_leaves_other_kinds_untouched() {
        let err = DbError::from(failure(ffi::SQLITE_MISMATCH, None)).with_path("/tmp/x.db");
        assert!(matches!(err, DbError::Sqlite(_)));
    }
}
