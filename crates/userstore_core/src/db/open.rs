//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for one unit of work.
//! - Configure connection settings required by store behavior.
//!
//! # Invariants
//! - Only `OpenMode::CreateIfMissing` may create the store file.
//! - A store file that was never created reads as a missing table.
//! - Open failures carry the store path they refer to.

use super::schema::{ensure_schema, USERS_TABLE};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, ErrorCode, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether opening may create a missing store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Used by `initialize`, the only transition into the initialized state.
    CreateIfMissing,
    /// Used by every other operation; a missing file is a storage failure.
    ExistingOnly,
}

impl OpenMode {
    fn flags(self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match self {
            Self::CreateIfMissing => base | OpenFlags::SQLITE_OPEN_CREATE,
            Self::ExistingOnly => base,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::CreateIfMissing => "create",
            Self::ExistingOnly => "existing",
        }
    }
}

/// Opens the store file at `path`.
///
/// The table is not created here; see `schema::ensure_schema`.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - `DbError::MissingTable` when `ExistingOnly` finds no store file in an
///   existing directory; nothing is created.
/// - `DbError::StorageUnavailable` when the file cannot be opened or created.
pub fn open_db(path: impl AsRef<Path>, mode: OpenMode) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode={}",
        mode.as_str()
    );

    let conn = Connection::open_with_flags(path, mode.flags())
        .map_err(|err| classify_open_error(err, path, mode))
        .and_then(|conn| {
            bootstrap_connection(&conn).map_err(|err| err.with_path(path))?;
            Ok(conn)
        });

    match conn {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode.as_str(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode.as_str(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory database with the `users` table already created.
///
/// Intended for repository-level tests; each call yields an isolated store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let conn = Connection::open_in_memory()?;
    bootstrap_connection(&conn)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

fn classify_open_error(err: rusqlite::Error, path: &Path, mode: OpenMode) -> DbError {
    let absent_in_existing_dir = mode == OpenMode::ExistingOnly
        && err.sqlite_error_code() == Some(ErrorCode::CannotOpen)
        && !path.exists()
        && path
            .parent()
            .map_or(true, |parent| parent.as_os_str().is_empty() || parent.is_dir());

    if absent_in_existing_dir {
        return DbError::MissingTable {
            table: USERS_TABLE.to_string(),
            source: err,
        };
    }
    DbError::from(err).with_path(path)
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
