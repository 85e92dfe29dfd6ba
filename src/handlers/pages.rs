// src/handlers/pages.rs

use axum::{
    extract::{Path, State},
    response::Response,
};
use tera::Context;

use crate::{
    db,
    render::{redirect, render_page},
    session::Session,
    state::AppState,
    utils::html::clean_html,
};

pub async fn index(State(state): State<AppState>, session: Session) -> Response {
    render_page(&state, session, "home.html", Context::new())
}

pub async fn about(State(state): State<AppState>, session: Session) -> Response {
    render_page(&state, session, "about.html", Context::new())
}

/// Public article list. An empty table is an informational message, not an
/// error.
pub async fn articles(State(state): State<AppState>, mut session: Session) -> Response {
    match db::list_articles(&state.pool).await {
        Ok(articles) => {
            let mut context = Context::new();
            if articles.is_empty() {
                context.insert("msg", "No Articles Found");
            }
            context.insert("articles", &articles);
            render_page(&state, session, "articles.html", context)
        }
        Err(e) => {
            tracing::error!("Failed to list articles: {}", e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, "/")
        }
    }
}

/// Single article by id. A missing row renders the empty-article view;
/// there is no distinct not-found branch.
pub async fn article(
    State(state): State<AppState>,
    mut session: Session,
    Path(id): Path<i64>,
) -> Response {
    match db::get_article(&state.pool, id).await {
        Ok(article) => {
            let mut context = Context::new();
            // The body is rendered unescaped, so sanitize it first.
            if let Some(ref article) = article {
                context.insert("body_html", &clean_html(&article.body));
            }
            context.insert("article", &article);
            render_page(&state, session, "article.html", context)
        }
        Err(e) => {
            tracing::error!("Failed to fetch article {}: {}", id, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, "/articles")
        }
    }
}
