use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::item::{
        CreateProductItemRequest, ProductItemDetail, ProductItemList, ProductItemSummaryList,
        UpdateProductItemRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/deleted", get(list_deleted_items))
        .route("/summary/by-product", get(summary_by_product))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/{id}/restore", put(restore_item))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-items",
    params(Pagination),
    responses(
        (status = 200, description = "List product items", body = ApiResponse<ProductItemList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductItemList>>> {
    let resp = item_service::list_items(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-items/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted product items", body = ApiResponse<ProductItemList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn list_deleted_items(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductItemList>>> {
    let resp = item_service::list_deleted_items(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-items/summary/by-product",
    responses(
        (status = 200, description = "Item totals grouped by product", body = ApiResponse<ProductItemSummaryList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn summary_by_product(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ProductItemSummaryList>>> {
    let resp = item_service::summary_by_product(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-items/{id}",
    params(("id" = i32, Path, description = "Product item ID")),
    responses(
        (status = 200, description = "Get product item", body = ApiResponse<ProductItemDetail>),
        (status = 404, description = "Product item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductItemDetail>>> {
    let resp = item_service::get_item(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/product-items",
    request_body = CreateProductItemRequest,
    responses(
        (status = 201, description = "Create product item", body = ApiResponse<ProductItemDetail>),
        (status = 400, description = "Invalid quantities or insufficient stock"),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductItemDetail>>)> {
    let resp = item_service::create_item(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-items/{id}",
    params(("id" = i32, Path, description = "Product item ID")),
    request_body = UpdateProductItemRequest,
    responses(
        (status = 200, description = "Update product item", body = ApiResponse<ProductItemDetail>),
        (status = 400, description = "Invalid quantities or insufficient stock"),
        (status = 404, description = "Product item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductItemRequest>,
) -> AppResult<Json<ApiResponse<ProductItemDetail>>> {
    let resp = item_service::update_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-items/{id}",
    params(("id" = i32, Path, description = "Product item ID")),
    responses(
        (status = 200, description = "Soft-delete product item and revert its movement", body = ApiResponse<Deleted>),
        (status = 400, description = "Insufficient stock to revert"),
        (status = 404, description = "Product item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = item_service::delete_item(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-items/{id}/restore",
    params(("id" = i32, Path, description = "Product item ID")),
    responses(
        (status = 200, description = "Restore product item and reapply its movement", body = ApiResponse<ProductItemDetail>),
        (status = 400, description = "Insufficient stock to reapply"),
        (status = 404, description = "Deleted product item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product items"
)]
pub async fn restore_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductItemDetail>>> {
    let resp = item_service::restore_item(&state, &user, id).await?;
    Ok(Json(resp))
}
