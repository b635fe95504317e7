use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::catalog::{BrandList, CreateBrandRequest, UpdateBrandRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Brand,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_brands).post(create_brand))
        .route("/deleted", get(list_deleted_brands))
        .route("/{id}", get(get_brand).put(update_brand).delete(delete_brand))
        .route("/{id}/restore", put(restore_brand))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands",
    params(Pagination),
    responses(
        (status = 200, description = "List brands", body = ApiResponse<BrandList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Brands"
)]
pub async fn list_brands(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<BrandList>>> {
    let resp = catalog_service::list_brands(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted brands", body = ApiResponse<BrandList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Brands"
)]
pub async fn list_deleted_brands(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<BrandList>>> {
    let resp = catalog_service::list_deleted_brands(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Get brand", body = ApiResponse<Brand>),
        (status = 404, description = "Brand not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Brands"
)]
pub async fn get_brand(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let resp = catalog_service::get_brand(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/brands",
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Create brand", body = ApiResponse<Brand>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Brands"
)]
pub async fn create_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBrandRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Brand>>)> {
    let resp = catalog_service::create_brand(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand ID")),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Update brand", body = ApiResponse<Brand>),
        (status = 404, description = "Brand not found"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Brands"
)]
pub async fn update_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBrandRequest>,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let resp = catalog_service::update_brand(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Soft-delete brand", body = ApiResponse<Deleted>),
        (status = 404, description = "Brand not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Brands"
)]
pub async fn delete_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = catalog_service::delete_brand(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}/restore",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Restore brand", body = ApiResponse<Brand>),
        (status = 404, description = "Deleted brand not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Brands"
)]
pub async fn restore_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let resp = catalog_service::restore_brand(&state, &user, id).await?;
    Ok(Json(resp))
}
