// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Display name.
    pub name: String,

    pub email: String,

    /// Unique username, also used as the article author key.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,
}

/// Registration form. Validated on POST only; GET renders it empty.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name length must be between 1 and 50 characters."
    ))]
    pub name: String,

    #[validate(length(
        min = 6,
        max = 50,
        message = "Email length must be between 6 and 50 characters."
    ))]
    pub email: String,

    #[validate(length(
        min = 4,
        max = 25,
        message = "Username length must be between 4 and 25 characters."
    ))]
    pub username: String,

    #[validate(
        length(min = 1, message = "Password is required."),
        must_match(other = "confirm", message = "Passwords do not match")
    )]
    pub password: String,

    pub confirm: String,
}

/// Login form. The source application never validates these fields; the
/// lookup itself decides the outcome.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
