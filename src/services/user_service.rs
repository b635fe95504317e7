//! Account administration. Every operation here is admin-only.

use sea_orm::QueryOrder;

use crate::{
    dto::auth::UserList,
    entity::{Users, users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    repository::{self, paginate},
    response::{ApiResponse, Deleted, Meta},
    routes::params::Pagination,
    services::ensure_active,
    state::AppState,
};

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let finder = repository::find_active::<Users>().order_by_asc(users::Column::Email);
    let (rows, meta) = paginate::<_, users::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(User::from).collect();
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn list_deleted_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let finder = repository::find_deleted::<Users>().order_by_desc(users::Column::DeletedAt);
    let (rows, meta) = paginate::<_, users::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(User::from).collect();
    Ok(ApiResponse::success("Deleted users", UserList { items }, Some(meta)))
}

pub async fn get_user(state: &AppState, user: &AuthUser, id: i32) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let found = ensure_active::<Users, _>(&state.orm, id, "User").await?;
    Ok(ApiResponse::success("User found", found.into(), Some(Meta::empty())))
}

/// Deactivates an account. Its past `user_ins`/`user_updt` stamps stay valid.
pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    ensure_admin(user)?;
    let actor = user.actor()?;
    if actor == id {
        return Err(AppError::BadRequest("cannot delete your own account".into()));
    }
    if !repository::soft_delete::<Users, _>(&state.orm, id, actor).await? {
        return Err(AppError::not_found("User"));
    }
    tracing::info!(id, actor, "user deleted");
    Ok(ApiResponse::success("User deleted", Deleted { id }, Some(Meta::empty())))
}

pub async fn restore_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let actor = user.actor()?;
    if !repository::restore::<Users, _>(&state.orm, id, actor).await? {
        return Err(AppError::not_found("Deleted user"));
    }
    let restored = ensure_active::<Users, _>(&state.orm, id, "User").await?;
    tracing::info!(id, actor, "user restored");
    Ok(ApiResponse::success("User restored", restored.into(), Some(Meta::empty())))
}
