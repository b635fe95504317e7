mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    routing::get,
};
use common::{JWT_SECRET, admin, setup_state};
use serde_json::Value;
use tower::ServiceExt;
use warehouse_ledger_api::{
    routes::{create_api_router, health::health_check},
    services::auth_service::issue_token,
    state::AppState,
};

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", create_api_router())
        .with_state(state)
}

async fn body_json(response: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_check_reports_database_status() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let response = app(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["message"], "Health check");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "up");
    Ok(())
}

#[tokio::test]
async fn ledger_routes_require_a_bearer_token() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/product-stocks")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await?;
    assert_eq!(body["code"], 401);
    assert!(body["data"].is_null());
    Ok(())
}

#[tokio::test]
async fn authorized_create_returns_201_and_errors_keep_the_envelope() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let exp = chrono::Utc::now().timestamp() + 3600;
    let token = issue_token(JWT_SECRET, user.user_id, &user.role, exp)?;
    let app = app(state);

    let create = Request::builder()
        .method("POST")
        .uri("/api/v1/brands")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Acme"}"#))?;
    let response = app.clone().oneshot(create).await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    assert_eq!(body["data"]["name"], "Acme");

    let missing = Request::builder()
        .uri("/api/v1/product-batches/999")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    let response = app.oneshot(missing).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body["code"], 404);
    assert_eq!(body["error"], "Product batch not found");
    Ok(())
}
