//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for user records.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Repositories operate on a borrowed connection; they never open or
//!   commit on their own.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod user_repo;
