//! User record model.
//!
//! # Responsibility
//! - Define the persisted `User` shape and insert payload.
//! - Hold the seed rows and anonymization placeholders.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes once assigned.
//! - `name` and `email` are always present.

use serde::{Deserialize, Serialize};

/// Engine-assigned row identifier. Strictly increasing in insertion order.
pub type UserId = i64;

/// Placeholder written over `name` by anonymization.
pub const ANONYMIZED_NAME: &str = "Anonymized User";
/// Placeholder written over `email` by anonymization.
pub const ANONYMIZED_EMAIL: &str = "anonymized@anonymized.invalid";

/// Records inserted, in order, when an empty store is initialized.
pub const SEED_USERS: [NewUser<'static>; 2] = [
    NewUser {
        name: "Anna Andersson",
        email: "anna@test.se",
    },
    NewUser {
        name: "Bo Bengtsson",
        email: "bo@test.se",
    },
];

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Returns whether both identifying fields hold the placeholders.
    pub fn is_anonymized(&self) -> bool {
        self.name == ANONYMIZED_NAME && self.email == ANONYMIZED_EMAIL
    }
}

/// Insert payload; `id` is left to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[cfg(test)]
mod tests {
    use super::{User, ANONYMIZED_EMAIL, ANONYMIZED_NAME, SEED_USERS};

    #[test]
    fn seed_users_are_not_anonymized_placeholders() {
        assert_eq!(SEED_USERS[0].name, "Anna Andersson");
        assert_eq!(SEED_USERS[1].email, "bo@test.se");
        assert!(SEED_USERS
            .iter()
            .all(|seed| seed.name != ANONYMIZED_NAME && seed.email != ANONYMIZED_EMAIL));
    }

    #[test]
    fn is_anonymized_requires_both_fields() {
        let mut user = User {
            id: 7,
            name: ANONYMIZED_NAME.to_string(),
            email: "still@real.se".to_string(),
        };
        assert!(!user.is_anonymized());

        user.email = ANONYMIZED_EMAIL.to_string();
        assert!(user.is_anonymized());
    }

    #[test]
    fn user_serializes_with_plain_field_names() {
        let user = User {
            id: 1,
            name: "Anna Andersson".to_string(),
            email: "anna@test.se".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Anna Andersson");
        assert_eq!(json["email"], "anna@test.se");
    }
}
