use crate::config::Config;
use axum::extract::FromRef;
use sqlx::SqlitePool;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub templates: Tera,
}

/// Lets the session extractor and the login gate borrow `Config` alone.
impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
