// src/error.rs

use std::fmt;

/// Application error enum returned by the data access layer and the
/// credential hasher.
///
/// Handlers never propagate these to the HTTP layer: every variant is
/// pattern-matched at the call site, logged, and resolved into a flash
/// message plus a redirect (or a re-rendered form). The `Display` text is
/// what ends up in the flash, so it carries the underlying message.
#[derive(Debug)]
pub enum AppError {
    /// Unique-constraint violation (e.g., duplicate username).
    Duplicate(String),

    /// Any other database failure.
    Database(String),

    /// Password hashing / parsing failure.
    Hash(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Duplicate(msg) => write!(f, "{}", msg),
            AppError::Database(msg) => write!(f, "{}", msg),
            AppError::Hash(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `sqlx::Error` into `AppError`, classifying unique-constraint
/// violations so registration can report duplicates distinctly.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let is_unique = err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());

        if is_unique {
            AppError::Duplicate(err.to_string())
        } else {
            AppError::Database(err.to_string())
        }
    }
}
