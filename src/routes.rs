// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{articles, auth, pages},
    session::require_login,
    state::AppState,
};

/// Assembles the main application router.
///
/// * Public routes are open to anonymous visitors.
/// * The gated group is layered with `require_login`, which redirects
///   unauthenticated requests to the login page.
/// * Injects global state (pool, config, templates).
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/articles", get(pages::articles))
        .route("/article/{id}/", get(pages::article))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login));

    let gated_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(articles::dashboard))
        .route(
            "/add_article",
            get(articles::add_article_form).post(articles::add_article),
        )
        .route(
            "/edit_article/{id}",
            get(articles::edit_article_form).post(articles::edit_article),
        )
        .route("/delete_article/{id}", post(articles::delete_article))
        .layer(middleware::from_fn_with_state(state.clone(), require_login));

    Router::new()
        .merge(public_routes)
        .merge(gated_routes)
        // Global middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
