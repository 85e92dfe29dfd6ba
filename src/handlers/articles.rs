// src/handlers/articles.rs
//
// Authenticated article management. Every route here sits behind the
// `require_login` gate; there are no per-article ownership checks, so any
// logged-in user can edit or delete any article by id.

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde_json::json;
use tera::Context;
use validator::Validate;

use crate::{
    db,
    models::{article::ArticleForm, field_errors},
    render::{redirect, render_page},
    session::Session,
    state::AppState,
};

fn form_context(form: &serde_json::Value, errors: &serde_json::Value) -> Context {
    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", errors);
    context
}

/// The logged-in user's own articles.
pub async fn dashboard(State(state): State<AppState>, mut session: Session) -> Response {
    let result = db::list_articles_by_author(&state.pool, session.username()).await;

    match result {
        Ok(articles) => {
            let mut context = Context::new();
            if articles.is_empty() {
                context.insert("msg", "No Articles Found");
            }
            context.insert("articles", &articles);
            render_page(&state, session, "dashboard.html", context)
        }
        Err(e) => {
            tracing::error!("Failed to load dashboard for '{}': {}", session.username(), e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, "/dashboard")
        }
    }
}

pub async fn add_article_form(State(state): State<AppState>, session: Session) -> Response {
    let context = form_context(&json!({ "title": "", "body": "" }), &json!({}));
    render_page(&state, session, "add_article.html", context)
}

/// Creates an article authored by the session's username.
pub async fn add_article(
    State(state): State<AppState>,
    mut session: Session,
    Form(payload): Form<ArticleForm>,
) -> Response {
    if let Err(validation_errors) = payload.validate() {
        let context = form_context(
            &json!({ "title": payload.title, "body": payload.body }),
            &json!(field_errors(&validation_errors)),
        );
        return render_page(&state, session, "add_article.html", context);
    }

    let result =
        db::insert_article(&state.pool, &payload.title, &payload.body, session.username()).await;

    match result {
        Ok(()) => {
            session.flash("Article Created", "success");
            redirect(&state, &session, "/dashboard")
        }
        Err(e) => {
            tracing::error!("Failed to create article: {}", e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, "/add_article")
        }
    }
}

/// Edit form, prefilled from the stored row. A missing row degrades to a
/// flash and a dashboard redirect.
pub async fn edit_article_form(
    State(state): State<AppState>,
    mut session: Session,
    Path(id): Path<i64>,
) -> Response {
    match db::get_article(&state.pool, id).await {
        Ok(Some(article)) => {
            let mut context =
                form_context(&json!({ "title": article.title, "body": article.body }), &json!({}));
            context.insert("id", &id);
            render_page(&state, session, "edit_article.html", context)
        }
        Ok(None) => {
            session.flash("An error occurred: Article not found", "danger");
            redirect(&state, &session, "/dashboard")
        }
        Err(e) => {
            tracing::error!("Failed to load article {} for edit: {}", id, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, "/dashboard")
        }
    }
}

/// Applies an edit. The submitted fields are written as-is, without
/// re-running the form validator; this matches the source application,
/// which validated the stored values and persisted the raw submission.
pub async fn edit_article(
    State(state): State<AppState>,
    mut session: Session,
    Path(id): Path<i64>,
    Form(payload): Form<ArticleForm>,
) -> Response {
    match db::get_article(&state.pool, id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            session.flash("An error occurred: Article not found", "danger");
            return redirect(&state, &session, "/dashboard");
        }
        Err(e) => {
            tracing::error!("Failed to load article {} for edit: {}", id, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            return redirect(&state, &session, "/dashboard");
        }
    }

    match db::update_article(&state.pool, id, &payload.title, &payload.body).await {
        Ok(()) => {
            session.flash("Article Updated", "success");
            redirect(&state, &session, "/dashboard")
        }
        Err(e) => {
            tracing::error!("Failed to update article {}: {}", id, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, &format!("/edit_article/{}", id))
        }
    }
}

/// Deletes by id and reports success whether or not a row existed.
pub async fn delete_article(
    State(state): State<AppState>,
    mut session: Session,
    Path(id): Path<i64>,
) -> Response {
    match db::delete_article(&state.pool, id).await {
        Ok(()) => {
            session.flash("Article Deleted", "success");
            redirect(&state, &session, "/dashboard")
        }
        Err(e) => {
            tracing::error!("Failed to delete article {}: {}", id, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, "/dashboard")
        }
    }
}
