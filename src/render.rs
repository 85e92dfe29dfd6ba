// src/render.rs

//! Response construction: template rendering and flash-carrying redirects.
//!
//! Every response re-signs the session cookie. Rendering a page drains the
//! queued flashes into the template context (they are one-shot); a redirect
//! preserves them for the page that finally renders.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::{Context, Tera};

use crate::session::Session;
use crate::state::AppState;

/// Loads the template environment once at startup. Auto-escaping is on for
/// every `.html` template.
pub fn load_templates() -> tera::Result<Tera> {
    Tera::new("templates/**/*.html")
}

/// Renders a template with the session's nav fields and pending flashes,
/// then rewrites the session cookie without the consumed flashes.
pub fn render_page(
    state: &AppState,
    mut session: Session,
    template: &str,
    mut context: Context,
) -> Response {
    let flashes = session.take_flashes();
    context.insert("flashes", &flashes);
    context.insert("logged_in", &session.logged_in);
    context.insert("username", session.username());

    match state.templates.render(template, &context) {
        Ok(html) => {
            let mut response = Html(html).into_response();
            session.write_cookie(response.headers_mut(), &state.config.session_secret);
            response
        }
        Err(e) => {
            tracing::error!("Failed to render template '{}': {}", template, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// 303 redirect that carries the session (and its queued flashes) forward.
pub fn redirect(state: &AppState, session: &Session, location: &str) -> Response {
    let mut response = Redirect::to(location).into_response();
    session.write_cookie(response.headers_mut(), &state.config.session_secret);
    response
}
