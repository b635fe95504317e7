use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};

use crate::{
    dto::auth::UserList,
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/deleted", get(list_deleted_users))
        .route("/{id}", get(get_user).delete(delete_user))
        .route("/{id}/restore", put(restore_user))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(Pagination),
    responses(
        (status = 200, description = "List users", body = ApiResponse<UserList>),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List deactivated users", body = ApiResponse<UserList>),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_deleted_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_deleted_users(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<User>),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deactivate user", body = ApiResponse<Deleted>),
        (status = 400, description = "Cannot delete own account"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = user_service::delete_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/restore",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Restore user", body = ApiResponse<User>),
        (status = 404, description = "Deleted user not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn restore_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::restore_user(&state, &user, id).await?;
    Ok(Json(resp))
}
