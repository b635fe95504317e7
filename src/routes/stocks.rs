use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::{
        item::{ProductItemDetail, ProductItemList},
        stock::{
            CreateProductStockRequest, ProductStockDetail, ProductStockList, StockMovementRequest,
            StockReconciliation, UpdateProductStockRequest,
        },
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::{item_service, stock_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks).post(create_stock))
        .route("/deleted", get(list_deleted_stocks))
        .route("/{id}", get(get_stock).put(update_stock).delete(delete_stock))
        .route("/{id}/restore", put(restore_stock))
        .route("/{id}/movements", post(record_movement))
        .route("/{id}/reconciliation", get(reconcile_stock))
        .route("/{id}/product-items", get(list_stock_items))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stocks",
    params(Pagination),
    responses(
        (status = 200, description = "List product stocks", body = ApiResponse<ProductStockList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn list_stocks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductStockList>>> {
    let resp = stock_service::list_stocks(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stocks/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted product stocks", body = ApiResponse<ProductStockList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn list_deleted_stocks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductStockList>>> {
    let resp = stock_service::list_deleted_stocks(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stocks/{id}",
    params(("id" = i32, Path, description = "Product stock ID")),
    responses(
        (status = 200, description = "Get product stock", body = ApiResponse<ProductStockDetail>),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductStockDetail>>> {
    let resp = stock_service::get_stock(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/product-stocks",
    request_body = CreateProductStockRequest,
    responses(
        (status = 201, description = "Create product stock", body = ApiResponse<ProductStockDetail>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product, batch or location not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn create_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductStockRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductStockDetail>>)> {
    let resp = stock_service::create_stock(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-stocks/{id}",
    params(("id" = i32, Path, description = "Product stock ID")),
    request_body = UpdateProductStockRequest,
    responses(
        (status = 200, description = "Update product stock", body = ApiResponse<ProductStockDetail>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product stock not found"),
        (status = 409, description = "Stale version")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductStockRequest>,
) -> AppResult<Json<ApiResponse<ProductStockDetail>>> {
    let resp = stock_service::update_stock(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-stocks/{id}",
    params(("id" = i32, Path, description = "Product stock ID")),
    responses(
        (status = 200, description = "Soft-delete product stock", body = ApiResponse<Deleted>),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn delete_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = stock_service::delete_stock(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-stocks/{id}/restore",
    params(("id" = i32, Path, description = "Product stock ID")),
    responses(
        (status = 200, description = "Restore product stock", body = ApiResponse<ProductStockDetail>),
        (status = 404, description = "Deleted product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn restore_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductStockDetail>>> {
    let resp = stock_service::restore_stock(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/product-stocks/{id}/movements",
    params(("id" = i32, Path, description = "Product stock ID")),
    request_body = StockMovementRequest,
    responses(
        (status = 201, description = "Movement recorded", body = ApiResponse<ProductItemDetail>),
        (status = 400, description = "Invalid movement or insufficient stock"),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn record_movement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<StockMovementRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductItemDetail>>)> {
    let resp = item_service::process_stock_movement(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stocks/{id}/reconciliation",
    params(("id" = i32, Path, description = "Product stock ID")),
    responses(
        (status = 200, description = "Stored quantity against the track ledger", body = ApiResponse<StockReconciliation>),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn reconcile_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<StockReconciliation>>> {
    let resp = stock_service::reconcile_stock(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stocks/{id}/product-items",
    params(("id" = i32, Path, description = "Product stock ID"), Pagination),
    responses(
        (status = 200, description = "Items recorded against a stock", body = ApiResponse<ProductItemList>),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product stocks"
)]
pub async fn list_stock_items(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductItemList>>> {
    let resp = item_service::list_items_by_stock(&state, id, pagination).await?;
    Ok(Json(resp))
}
