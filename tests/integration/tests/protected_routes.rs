//! Integration test: an axum login route and a router guarded by the bearer
//! middleware.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceExt;
use warden_auth::{protected, AuthError, Authenticator, LoginRequest, LoginResponse, Principal};
use warden_core::AuthenticatedPrincipal;
use warden_integration_tests::{authenticator, store_with_alice, ALICE_PASSWORD};

async fn me(Principal(principal): Principal) -> Json<AuthenticatedPrincipal> {
    Json(principal)
}

async fn login(
    State(auth): State<Arc<Authenticator>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    auth.login(&request.username, &request.password)
        .await
        .map(Json)
}

fn login_app(auth: Arc<Authenticator>) -> Router {
    Router::new().route("/login", post(login)).with_state(auth)
}

async fn post_login(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

async fn health() -> &'static str {
    "ok"
}

fn app(auth: Arc<Authenticator>) -> Router {
    let guarded = protected(Router::new().route("/me", get(me)), auth);
    Router::new().route("/health", get(health)).merge(guarded)
}

async fn send(app: Router, uri: &str, authorization: Option<String>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    (status, body.to_vec())
}

#[tokio::test]
async fn test_unguarded_route_needs_no_credential() {
    let (store, _) = store_with_alice();
    let (status, body) = send(app(authenticator(b"routes", store)), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_guarded_route_with_login_credential() {
    let (store, alice) = store_with_alice();
    let auth = authenticator(b"routes", store);
    let token = auth
        .login("alice", ALICE_PASSWORD)
        .await
        .expect("login")
        .token
        .into_string();

    let (status, body) = send(app(auth), "/me", Some(format!("Bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(json["handle"], "alice");
    assert_eq!(json["user_id"], alice.id.to_string());
}

#[tokio::test]
async fn test_guarded_route_rejects_uniformly() {
    let (store, _) = store_with_alice();
    let auth = authenticator(b"routes", Arc::clone(&store));
    let foreign = authenticator(b"some-other-secret", store)
        .login("alice", ALICE_PASSWORD)
        .await
        .expect("login")
        .token
        .into_string();

    let cases = [
        None,
        Some("Token abc".to_string()),
        Some("Bearer garbage".to_string()),
        Some(format!("Bearer {}", foreign)),
    ];
    for authorization in cases {
        let (status, body) = send(app(Arc::clone(&auth)), "/me", authorization).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json, serde_json::json!({"error": "unauthorized"}));
    }
}

// =========================================================================
// Login route
// =========================================================================

#[tokio::test]
async fn test_login_route_then_guarded_route() {
    let (store, alice) = store_with_alice();
    let auth = authenticator(b"routes", store);

    let (status, body) = post_login(
        login_app(Arc::clone(&auth)),
        serde_json::json!({"username": "alice", "password": ALICE_PASSWORD}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], alice.id.to_string());
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().expect("token is a string").to_string();
    let (status, _) = send(app(auth), "/me", Some(format!("Bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_route_rejects_with_one_message() {
    let (store, _) = store_with_alice();
    let auth = authenticator(b"routes", store);

    for body in [
        serde_json::json!({"username": "alice", "password": "wrongpass"}),
        serde_json::json!({"username": "mallory", "password": ALICE_PASSWORD}),
    ] {
        let (status, body) = post_login(login_app(Arc::clone(&auth)), body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "invalid username or password"}));
    }
}
