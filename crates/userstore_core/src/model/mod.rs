//! Domain model for the records store.
//!
//! # Responsibility
//! - Define the canonical `User` record and the fixed data the store writes.
//!
//! # Invariants
//! - Every record is identified by an engine-assigned `UserId`.
//! - Records are never created individually by callers; only seeding writes rows.

pub mod user;
