use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::batch::{
        CreateProductBatchRequest, ProductBatchDetail, ProductBatchList, UpdateProductBatchRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::batch_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_batches).post(create_batch))
        .route("/deleted", get(list_deleted_batches))
        .route("/{id}", get(get_batch).put(update_batch).delete(delete_batch))
        .route("/{id}/restore", put(restore_batch))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-batches",
    params(Pagination),
    responses(
        (status = 200, description = "List product batches", body = ApiResponse<ProductBatchList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product batches"
)]
pub async fn list_batches(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductBatchList>>> {
    let resp = batch_service::list_batches(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-batches/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted product batches", body = ApiResponse<ProductBatchList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product batches"
)]
pub async fn list_deleted_batches(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductBatchList>>> {
    let resp = batch_service::list_deleted_batches(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-batches/{id}",
    params(("id" = i32, Path, description = "Product batch ID")),
    responses(
        (status = 200, description = "Get product batch", body = ApiResponse<ProductBatchDetail>),
        (status = 404, description = "Product batch not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product batches"
)]
pub async fn get_batch(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductBatchDetail>>> {
    let resp = batch_service::get_batch(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/product-batches",
    request_body = CreateProductBatchRequest,
    responses(
        (status = 201, description = "Create product batch", body = ApiResponse<ProductBatchDetail>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product batches"
)]
pub async fn create_batch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductBatchRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductBatchDetail>>)> {
    let resp = batch_service::create_batch(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-batches/{id}",
    params(("id" = i32, Path, description = "Product batch ID")),
    request_body = UpdateProductBatchRequest,
    responses(
        (status = 200, description = "Update product batch", body = ApiResponse<ProductBatchDetail>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product batch not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product batches"
)]
pub async fn update_batch(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductBatchRequest>,
) -> AppResult<Json<ApiResponse<ProductBatchDetail>>> {
    let resp = batch_service::update_batch(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-batches/{id}",
    params(("id" = i32, Path, description = "Product batch ID")),
    responses(
        (status = 200, description = "Soft-delete product batch", body = ApiResponse<Deleted>),
        (status = 404, description = "Product batch not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product batches"
)]
pub async fn delete_batch(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = batch_service::delete_batch(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-batches/{id}/restore",
    params(("id" = i32, Path, description = "Product batch ID")),
    responses(
        (status = 200, description = "Restore product batch", body = ApiResponse<ProductBatchDetail>),
        (status = 404, description = "Deleted product batch not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product batches"
)]
pub async fn restore_batch(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductBatchDetail>>> {
    let resp = batch_service::restore_batch(&state, &user, id).await?;
    Ok(Json(resp))
}
