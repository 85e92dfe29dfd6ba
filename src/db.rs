// src/db.rs

//! Data access layer.
//!
//! One function per statement, every statement with bound parameters.
//! Callers pattern-match the returned `Result` and decide how the failure
//! surfaces; nothing here logs or touches HTTP concerns. Single-statement
//! atomicity is the database's responsibility, and connections are checked
//! out of the pool per statement.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{article::Article, user::User};

/// All articles, in database default order.
pub async fn list_articles(pool: &SqlitePool) -> Result<Vec<Article>, AppError> {
    let articles = sqlx::query_as::<_, Article>(
        "SELECT id, title, body, author, create_date FROM articles",
    )
    .fetch_all(pool)
    .await?;

    Ok(articles)
}

pub async fn get_article(pool: &SqlitePool, id: i64) -> Result<Option<Article>, AppError> {
    let article = sqlx::query_as::<_, Article>(
        "SELECT id, title, body, author, create_date FROM articles WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(article)
}

pub async fn list_articles_by_author(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<Article>, AppError> {
    let articles = sqlx::query_as::<_, Article>(
        "SELECT id, title, body, author, create_date FROM articles WHERE author = ?",
    )
    .bind(username)
    .fetch_all(pool)
    .await?;

    Ok(articles)
}

/// Inserts a new user. A duplicate username surfaces as
/// `AppError::Duplicate` via the schema's UNIQUE constraint.
pub async fn insert_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO users (name, email, username, password) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, username, password FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn insert_article(
    pool: &SqlitePool,
    title: &str,
    body: &str,
    author: &str,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO articles (title, body, author) VALUES (?, ?, ?)")
        .bind(title)
        .bind(body)
        .bind(author)
        .execute(pool)
        .await?;

    Ok(())
}

/// Updates title and body by id. No row-count check: updating a missing id
/// is a silent no-op.
pub async fn update_article(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    body: &str,
) -> Result<(), AppError> {
    sqlx::query("UPDATE articles SET title = ?, body = ? WHERE id = ?")
        .bind(title)
        .bind(body)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Deletes by id, with the same no-op-on-missing-id policy as
/// [`update_article`].
pub async fn delete_article(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
