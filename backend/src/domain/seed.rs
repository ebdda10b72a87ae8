//! Fixture accounts present at process start.
//!
//! The service ships with one administrator and three customers so the
//! admin-only operations are reachable on a fresh process; registration
//! cannot mint administrators.

use super::{Email, User, UserRole};

/// The accounts every fresh process starts with.
pub fn seed_accounts() -> Vec<User> {
    vec![
        User::create("Admin", Email::from("admin@gmail.com"), "qwerty", UserRole::Admin),
        User::create(
            "User",
            Email::from("user@gmail.com"),
            "1234567890",
            UserRole::Individual,
        ),
        User::create(
            "Individual",
            Email::from("individual@gmail.com"),
            "1234567890",
            UserRole::Individual,
        ),
        User::create(
            "Business",
            Email::from("business@gmail.com"),
            "1234567890",
            UserRole::Business,
        ),
    ]
}
