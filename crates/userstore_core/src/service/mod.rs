//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate connection lifetime, transactions and repository calls.
//! - Keep presentation (console output) out of the data operations.

pub mod records_store;
