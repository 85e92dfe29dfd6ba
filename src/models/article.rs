use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'articles' table in the database.
///
/// `author` is the creating user's username, denormalized by value rather
/// than by id. `create_date` is assigned by a database default.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author: String,
    pub create_date: chrono::NaiveDateTime,
}

/// Form for creating and editing articles.
#[derive(Debug, Deserialize, Validate)]
pub struct ArticleForm {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 characters."
    ))]
    pub title: String,

    #[validate(length(min = 30, message = "Body must be at least 30 characters."))]
    pub body: String,
}
