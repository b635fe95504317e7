mod common;

use common::{JWT_SECRET, data, setup_state};
use warehouse_ledger_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    middleware::auth::decode_token,
    routes::params::Pagination,
    services::{auth_service, user_service},
    state::AppState,
};

async fn register(state: &AppState, email: &str) -> anyhow::Result<i32> {
    let user = data(
        auth_service::register_user(
            state,
            RegisterRequest {
                email: email.into(),
                password: "password123".into(),
            },
        )
        .await?,
    );
    Ok(user.id)
}

fn login(email: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: "password123".into(),
    }
}

#[tokio::test]
async fn deleted_users_cannot_log_in_until_restored() -> anyhow::Result<()> {
    let state = setup_state().await?;
    register(&state, "owner@example.com").await?;
    let clerk_id = register(&state, "clerk@example.com").await?;

    let token = data(auth_service::login_user(&state, login("owner@example.com")).await?).token;
    let admin = decode_token(&token, JWT_SECRET)?;

    let users = data(user_service::list_users(&state, &admin, Pagination::default()).await?);
    assert_eq!(users.items.len(), 2);

    user_service::delete_user(&state, &admin, clerk_id).await?;
    let active = data(user_service::list_users(&state, &admin, Pagination::default()).await?);
    assert_eq!(active.items.len(), 1);
    let deleted =
        data(user_service::list_deleted_users(&state, &admin, Pagination::default()).await?);
    assert_eq!(deleted.items.len(), 1);
    assert_eq!(deleted.items[0].id, clerk_id);
    assert!(deleted.items[0].deleted_at.is_some());

    let err = auth_service::login_user(&state, login("clerk@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let restored = data(user_service::restore_user(&state, &admin, clerk_id).await?);
    assert!(restored.deleted_at.is_none());
    auth_service::login_user(&state, login("clerk@example.com")).await?;
    Ok(())
}

#[tokio::test]
async fn user_administration_is_admin_only() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner_id = register(&state, "owner@example.com").await?;
    register(&state, "clerk@example.com").await?;

    let token = data(auth_service::login_user(&state, login("clerk@example.com")).await?).token;
    let clerk = decode_token(&token, JWT_SECRET)?;

    let err = user_service::list_users(&state, &clerk, Pagination::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    let err = user_service::delete_user(&state, &clerk, owner_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}

#[tokio::test]
async fn admins_cannot_delete_themselves() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner_id = register(&state, "owner@example.com").await?;
    let token = data(auth_service::login_user(&state, login("owner@example.com")).await?).token;
    let admin = decode_token(&token, JWT_SECRET)?;

    let err = user_service::delete_user(&state, &admin, owner_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = user_service::restore_user(&state, &admin, owner_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}
