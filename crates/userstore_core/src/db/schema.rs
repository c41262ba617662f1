//! `users` table definition and existence checks.
//!
//! # Invariants
//! - `ensure_schema` is create-if-absent only; it never drops or alters.
//! - The store owns exactly one table; no indices are created.

use crate::db::DbResult;
use rusqlite::Connection;

/// Name of the single table owned by the records store.
pub const USERS_TABLE: &str = "users";

const USERS_SCHEMA_SQL: &str = include_str!("users.sql");

/// Creates the `users` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(USERS_SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether `table_name` exists in the main schema.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
