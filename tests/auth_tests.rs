// tests/auth_tests.rs

use pressroom::{config::Config, render, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL and the pool backing the app, so tests can seed
/// and inspect rows directly.
async fn spawn_app() -> (String, SqlitePool) {
    // Single connection: an in-memory SQLite database lives and dies with
    // its connection, so the whole test shares one.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        session_secret: "test_secret_for_integration_tests".to_string(),
        rust_log: "error".to_string(),
    };

    let templates = render::load_templates().expect("Failed to load templates");

    let state = AppState {
        pool: pool.clone(),
        config,
        templates,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

/// Browser-like client: keeps cookies, follows redirects.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap()
}

/// Client that stops at redirects so tests can assert on them.
fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn register(client: &reqwest::Client, address: &str, username: &str, password: &str) {
    let response = client
        .post(format!("{}/register", address))
        .form(&[
            ("name", "Test User"),
            ("email", "user@example.com"),
            ("username", username),
            ("password", password),
            ("confirm", password),
        ])
        .send()
        .await
        .expect("Register request failed");
    assert!(response.status().is_success());
}

async fn login(client: &reqwest::Client, address: &str, username: &str, password: &str) -> String {
    client
        .post(format!("{}/login", address))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Login request failed")
        .text()
        .await
        .expect("Failed to read login response")
}

#[tokio::test]
async fn register_then_login_succeeds() {
    let (address, _pool) = spawn_app().await;
    let client = client();
    let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    register(&client, &address, &username, "hunter2pw").await;

    let body = login(&client, &address, &username, "hunter2pw").await;
    assert!(body.contains("You are now logged in"));
    assert!(body.contains("Dashboard"));
}

#[tokio::test]
async fn register_flashes_success_on_the_login_page() {
    let (address, _pool) = spawn_app().await;
    let client = client();

    let response = client
        .post(format!("{}/register", address))
        .form(&[
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("username", "alice"),
            ("password", "pw123456"),
            ("confirm", "pw123456"),
        ])
        .send()
        .await
        .unwrap();

    // 303 to /login, followed; the flash renders there.
    let body = response.text().await.unwrap();
    assert!(body.contains("You are now registered and can log in"));
    assert!(body.contains("Login"));
}

#[tokio::test]
async fn login_with_wrong_password_reports_incorrect_password() {
    let (address, _pool) = spawn_app().await;
    let client = client();

    register(&client, &address, "alice", "right-password").await;

    let body = login(&client, &address, "alice", "wrong-password").await;
    assert!(body.contains("Invalid login, incorrect password."));
    assert!(!body.contains("Username not found"));
}

#[tokio::test]
async fn login_with_unknown_username_reports_not_found_and_sets_no_session() {
    let (address, _pool) = spawn_app().await;
    let client = client();

    let body = login(&client, &address, "nobody", "whatever").await;
    assert!(body.contains("Username not found"));

    // The session was never set: the dashboard turns this client away.
    let dashboard = client
        .get(format!("{}/dashboard", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(dashboard.contains("Unauthorized, Please login"));
}

#[tokio::test]
async fn register_with_mismatched_passwords_rerenders_with_inline_error() {
    let (address, pool) = spawn_app().await;
    let client = client();

    let response = client
        .post(format!("{}/register", address))
        .form(&[
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("username", "alice"),
            ("password", "pw123456"),
            ("confirm", "different"),
        ])
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Passwords do not match"));
    // Entered values are preserved on the re-rendered form.
    assert!(body.contains("alice@example.com"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn register_with_short_username_rerenders_with_inline_error() {
    let (address, _pool) = spawn_app().await;
    let client = client();

    let response = client
        .post(format!("{}/register", address))
        .form(&[
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("username", "al"),
            ("password", "pw123456"),
            ("confirm", "pw123456"),
        ])
        .send()
        .await
        .unwrap();

    let body = response.text().await.unwrap();
    assert!(body.contains("Username length must be between 4 and 25 characters."));
}

#[tokio::test]
async fn duplicate_username_flashes_error_back_on_register() {
    let (address, _pool) = spawn_app().await;
    let client = client();

    register(&client, &address, "alice", "pw123456").await;

    // Second registration with the same username hits the UNIQUE constraint
    // and degrades to a flash + redirect back to the register page.
    let response = client
        .post(format!("{}/register", address))
        .form(&[
            ("name", "Other Alice"),
            ("email", "other@example.com"),
            ("username", "alice"),
            ("password", "pw123456"),
            ("confirm", "pw123456"),
        ])
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("An error occurred:"));
    assert!(body.contains("Register"));
}

#[tokio::test]
async fn gated_routes_redirect_anonymous_visitors_to_login() {
    let (address, _pool) = spawn_app().await;
    let client = no_redirect_client();

    for path in ["/logout", "/dashboard", "/add_article", "/edit_article/1"] {
        let response = client
            .get(format!("{}{}", address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 303, "GET {} should redirect", path);
        assert_eq!(
            response.headers().get("location").unwrap().to_str().unwrap(),
            "/login"
        );
    }

    let response = client
        .post(format!("{}/delete_article/1", address))
        .form(&[("dummy", "x")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/login"
    );
}

#[tokio::test]
async fn logout_clears_the_session() {
    let (address, _pool) = spawn_app().await;
    let client = client();

    register(&client, &address, "alice", "pw123456").await;
    login(&client, &address, "alice", "pw123456").await;

    let body = client
        .get(format!("{}/logout", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("You are now logged out"));

    // The cleared cookie no longer opens the dashboard.
    let dashboard = client
        .get(format!("{}/dashboard", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(dashboard.contains("Unauthorized, Please login"));
}

#[tokio::test]
async fn flash_messages_are_one_shot() {
    let (address, _pool) = spawn_app().await;
    let client = client();

    register(&client, &address, "alice", "pw123456").await;
    let first = login(&client, &address, "alice", "pw123456").await;
    assert!(first.contains("You are now logged in"));

    // Reloading does not replay the flash.
    let second = client
        .get(format!("{}/dashboard", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!second.contains("You are now logged in"));
}
