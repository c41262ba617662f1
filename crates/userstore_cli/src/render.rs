//! Console rendering for store results.
//!
//! Kept apart from the core so the store only returns data.

use userstore_core::{InitOutcome, User};

pub fn init_outcome_line(outcome: &InitOutcome) -> String {
    match outcome {
        InitOutcome::Seeded { .. } => "Database initialized with test users".to_string(),
        InitOutcome::AlreadyPopulated { count } => {
            format!("Database already contains {count} users")
        }
    }
}

pub fn user_line(user: &User) -> String {
    format!("ID: {}, Name: {}, Email: {}", user.id, user.name, user.email)
}

pub fn user_listing(users: &[User]) -> Vec<String> {
    if users.is_empty() {
        return vec!["No users in database".to_string()];
    }

    let mut lines = Vec::with_capacity(users.len() + 1);
    lines.push(format!("Users in database ({}):", users.len()));
    lines.extend(users.iter().map(user_line));
    lines
}

pub fn purge_line(deleted: usize) -> String {
    format!("Deleted {deleted} users")
}

pub fn anonymize_line(changed: usize) -> String {
    format!("Anonymized {changed} users")
}
