use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use aunt_rosies_api::{
    build_router,
    config::AppConfig,
    db::create_lazy_pool,
    models::Role,
    services::auth_service::issue_token,
    state::AppState,
};

// None of these requests reach the database, so a pool that never connects is enough.
fn app() -> (Router, AppState) {
    let config = AppConfig {
        database_url: "postgres://localhost/unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        jwt_ttl_hours: 1,
        max_connections: 1,
    };
    let pool = create_lazy_pool(&config.database_url).unwrap();
    let state = AppState::new(pool, &config);
    (build_router(state.clone()), state)
}

fn bearer(state: &AppState, role: Role) -> String {
    let (token, _) = issue_token(&state.auth, 7, role).unwrap();
    format!("Bearer {token}")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public_and_carries_request_id() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["data"]["path"], "/api/nope");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_token_is_unauthorized() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::get("/api/dashboard")
                .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_forbidden() {
    let (app, state) = app();

    let kitchen = bearer(&state, Role::Kitchen);
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/employees")
                .header(header::AUTHORIZATION, &kitchen)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let sales = bearer(&state, Role::Sales);
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/ingredients/low-stock")
                .header(header::AUTHORIZATION, &sales)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(
            Request::get("/api/labels/1")
                .header(header::AUTHORIZATION, &sales)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn sale_form_errors_come_back_per_field() {
    let (app, state) = app();
    let sales = bearer(&state, Role::Sales);

    let response = app
        .oneshot(
            Request::post("/api/sales")
                .header(header::AUTHORIZATION, &sales)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"items":[],"payment_method":"Cheque"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    let fields = &json["data"]["fields"];
    assert!(fields["location_id"].is_string());
    assert!(fields["items"].is_string());
    assert!(fields["payment_method"].is_string());
}
