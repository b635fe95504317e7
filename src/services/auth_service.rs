use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use sea_orm::ActiveValue::Set;

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::{Users, users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

const MIN_PASSWORD_LEN: usize = 8;

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest { email, password } = payload;
    let email = normalize_email(&email)?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let exist = Users::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict("Email is already taken".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let role = if Users::find().count(&state.orm).await? == 0 {
        ROLE_ADMIN
    } else {
        ROLE_STAFF
    };

    let user = users::ActiveModel {
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = user.id, role, "user registered");
    Ok(ApiResponse::created("User created", user.into()))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim().to_lowercase();
    let user = Users::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .filter(users::Column::DeletedAt.is_null())
        .one(&state.orm)
        .await?
        .ok_or_else(invalid_credentials)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::warn!(user_id = user.id, "login rejected");
        return Err(invalid_credentials());
    }

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(state.config.jwt_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let token = issue_token(&state.config.jwt_secret, user.id, &user.role, expiration.timestamp())?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_at: expiration.timestamp(),
            user_id: user.id,
            role: user.role.clone(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let id = user.actor()?;
    let model = Users::find_by_id(id)
        .filter(users::Column::DeletedAt.is_null())
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;
    Ok(ApiResponse::success("Current user", model.into(), Some(Meta::empty())))
}

/// Signs an HS256 token whose `sub` is the user id.
pub fn issue_token(secret: &str, user_id: i32, role: &str, expires_at: i64) -> AppResult<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expires_at as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".into())
}

fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::BadRequest("email is invalid".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_token;

    #[test]
    fn issued_token_decodes_to_the_same_principal() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = issue_token("secret", 42, ROLE_ADMIN, exp).unwrap();
        let user = decode_token(&token, "secret").unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.role, ROLE_ADMIN);
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email(" Admin@Example.COM ").unwrap(), "admin@example.com");
        assert!(normalize_email("not-an-email").is_err());
    }
}
