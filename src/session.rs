// src/session.rs

//! Signed, client-held session.
//!
//! The whole session rides in one HttpOnly cookie: a signed token carrying
//! the login flag, the username, and any queued flash messages. The server
//! keeps no session table, so there is no expiry and no revocation; an
//! absent or tamper-invalid cookie simply decodes to the anonymous session.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub const SESSION_COOKIE: &str = "session";

/// One-shot message queued on the session and consumed by the next
/// rendered page. `category` drives presentation styling only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub logged_in: bool,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub flashes: Vec<Flash>,
}

impl Session {
    /// Marks the session authenticated for the given user.
    pub fn log_in(&mut self, username: &str) {
        self.logged_in = true;
        self.username = Some(username.to_string());
    }

    /// Clears everything, including pending flashes.
    pub fn clear(&mut self) {
        *self = Session::default();
    }

    /// Username for gated handlers. Gated routes only run when
    /// `logged_in` is set, so the empty fallback is never rendered there.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    /// Queues a flash message for the next rendered page.
    pub fn flash(&mut self, text: impl Into<String>, category: &str) {
        self.flashes.push(Flash {
            text: text.into(),
            category: category.to_string(),
        });
    }

    /// Drains pending flashes; the caller renders them and the cookie is
    /// rewritten without them.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    /// Signs the session into a cookie-ready token.
    pub fn encode(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Verifies and decodes a session token. The session has no expiry,
    /// so the standard expiry claim is neither required nor checked.
    pub fn decode(token: &str, secret: &str) -> Option<Session> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Session>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .ok()
        .map(|data| data.claims)
    }

    /// Reads the session out of the request's cookie header. Anything
    /// missing or invalid yields the anonymous session.
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Session {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split("; "))
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, token)| Session::decode(token, secret))
            .unwrap_or_default()
    }

    /// Re-signs the session into a Set-Cookie header on the outgoing
    /// response. A signing failure is logged and the cookie left unset;
    /// the client then falls back to the anonymous session.
    pub fn write_cookie(&self, headers: &mut HeaderMap, secret: &str) {
        let token = match self.encode(secret) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Failed to sign session cookie: {}", e);
                return;
            }
        };

        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, token
        );

        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.insert(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid session cookie value: {}", e),
        }
    }
}

/// Extractor: any handler can take `Session` directly. Never rejects;
/// unauthenticated requests get the anonymous session.
impl<S> FromRequestParts<S> for Session
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Infallible> {
        let config = Config::from_ref(state);
        Ok(Session::from_headers(&parts.headers, &config.session_secret))
    }
}

/// Axum middleware: the authorization gate.
///
/// Layered over the gated route group at registration time. Authenticated
/// requests pass through untouched; everything else is turned away to the
/// login page with a flash, without invoking the handler.
pub async fn require_login(
    State(config): State<Config>,
    req: Request,
    next: Next,
) -> Response {
    let mut session = Session::from_headers(req.headers(), &config.session_secret);

    if session.logged_in {
        return next.run(req).await;
    }

    session.flash("Unauthorized, Please login", "danger");

    let mut response = Redirect::to("/login").into_response();
    session.write_cookie(response.headers_mut(), &config.session_secret);
    response
}
