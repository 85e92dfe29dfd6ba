// src/handlers/auth.rs

use axum::{
    Form,
    extract::State,
    response::Response,
};
use serde_json::json;
use tera::Context;
use validator::Validate;

use crate::{
    db,
    models::{
        field_errors,
        user::{LoginForm, RegisterForm},
    },
    render::{redirect, render_page},
    session::Session,
    state::AppState,
    utils::hash::{hash_password, verify_password},
};

fn register_context(form: &serde_json::Value, errors: &serde_json::Value) -> Context {
    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", errors);
    context
}

pub async fn register_form(State(state): State<AppState>, session: Session) -> Response {
    let context = register_context(
        &json!({ "name": "", "email": "", "username": "" }),
        &json!({}),
    );
    render_page(&state, session, "register.html", context)
}

/// Registers a new user.
///
/// Hashes the password with Argon2 before storing it. On success flashes
/// and redirects to the login page; a duplicate username or any other
/// database failure flashes the error and redirects back here.
pub async fn register(
    State(state): State<AppState>,
    mut session: Session,
    Form(payload): Form<RegisterForm>,
) -> Response {
    if let Err(validation_errors) = payload.validate() {
        let context = register_context(
            &json!({
                "name": payload.name,
                "email": payload.email,
                "username": payload.username,
            }),
            &json!(field_errors(&validation_errors)),
        );
        return render_page(&state, session, "register.html", context);
    }

    let hashed_password = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            session.flash(format!("An error occurred: {}", e), "danger");
            return redirect(&state, &session, "/register");
        }
    };

    match db::insert_user(
        &state.pool,
        &payload.name,
        &payload.email,
        &payload.username,
        &hashed_password,
    )
    .await
    {
        Ok(()) => {
            session.flash("You are now registered and can log in", "success");
            redirect(&state, &session, "/login")
        }
        Err(e) => {
            tracing::error!("Failed to register user '{}': {}", payload.username, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            redirect(&state, &session, "/register")
        }
    }
}

pub async fn login_form(State(state): State<AppState>, session: Session) -> Response {
    render_page(&state, session, "login.html", Context::new())
}

/// Authenticates a user against the stored Argon2 hash.
///
/// An unknown username and a wrong password are distinct inline errors on
/// the re-rendered form; only a data-access failure degrades to a
/// flash-and-redirect.
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(payload): Form<LoginForm>,
) -> Response {
    let user = match db::get_user_by_username(&state.pool, &payload.username).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Login lookup failed for '{}': {}", payload.username, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            return redirect(&state, &session, "/login");
        }
    };

    let Some(user) = user else {
        let mut context = Context::new();
        context.insert("error", "Username not found");
        return render_page(&state, session, "login.html", context);
    };

    let is_valid = match verify_password(&payload.password, &user.password) {
        Ok(is_valid) => is_valid,
        Err(e) => {
            tracing::error!("Password verification failed for '{}': {}", user.username, e);
            session.flash(format!("An error occurred: {}", e), "danger");
            return redirect(&state, &session, "/login");
        }
    };

    if !is_valid {
        let mut context = Context::new();
        context.insert("error", "Invalid login, incorrect password.");
        return render_page(&state, session, "login.html", context);
    }

    session.log_in(&user.username);
    session.flash("You are now logged in", "success");
    redirect(&state, &session, "/dashboard")
}

/// Clears the whole session, then queues the goodbye flash on the fresh
/// (anonymous) session.
pub async fn logout(State(state): State<AppState>, mut session: Session) -> Response {
    session.clear();
    session.flash("You are now logged out", "success");
    redirect(&state, &session, "/login")
}
