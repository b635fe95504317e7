mod common;

use common::{JWT_SECRET, data, setup_state};
use warehouse_ledger_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    middleware::auth::decode_token,
    services::auth_service::{self, ROLE_ADMIN, ROLE_STAFF},
};

fn register(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn first_registered_user_becomes_admin() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let first = data(auth_service::register_user(&state, register("Owner@Example.com", "password1")).await?);
    assert_eq!(first.email, "owner@example.com");
    assert_eq!(first.role, ROLE_ADMIN);

    let second = data(auth_service::register_user(&state, register("clerk@example.com", "password2")).await?);
    assert_eq!(second.role, ROLE_STAFF);

    let err = auth_service::register_user(&state, register("owner@example.com", "password3"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn short_passwords_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let err = auth_service::register_user(&state, register("a@example.com", "short"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn login_issues_a_token_for_the_user() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = data(auth_service::register_user(&state, register("ops@example.com", "correct-horse")).await?);

    let login = data(
        auth_service::login_user(
            &state,
            LoginRequest {
                email: " OPS@example.com ".into(),
                password: "correct-horse".into(),
            },
        )
        .await?,
    );
    assert_eq!(login.token_type, "Bearer");
    assert_eq!(login.user_id, user.id);
    assert_eq!(login.role, ROLE_ADMIN);
    let principal = decode_token(&login.token, JWT_SECRET)?;
    assert_eq!(principal.user_id, user.id);
    assert_eq!(principal.role, ROLE_ADMIN);

    let me = data(auth_service::current_user(&state, &principal).await?);
    assert_eq!(me.email, "ops@example.com");

    let err = auth_service::login_user(
        &state,
        LoginRequest {
            email: "ops@example.com".into(),
            password: "wrong-horse".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    Ok(())
}
