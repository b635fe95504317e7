use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::{
        batch::ProductBatchList,
        catalog::{CreateProductRequest, ProductList, UpdateProductRequest},
        item::ProductItemList,
        stock::ProductStockList,
        unit::ProductUnitList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::{batch_service, catalog_service, item_service, stock_service, unit_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/deleted", get(list_deleted_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/restore", put(restore_product))
        .route("/{id}/product-batches", get(list_product_batches))
        .route("/{id}/product-stocks", get(list_product_stocks))
        .route("/{id}/product-units", get(list_product_units))
        .route("/{id}/product-items", get(list_product_items))
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(Pagination),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_products(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted products", body = ApiResponse<ProductList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_deleted_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_deleted_products(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already used in this category")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = catalog_service::create_product(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Update product", body = ApiResponse<Product>),
        (status = 404, description = "Product or category not found"),
        (status = 409, description = "Name already used in this category")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Soft-delete product", body = ApiResponse<Deleted>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = catalog_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}/restore",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Restore product", body = ApiResponse<Product>),
        (status = 404, description = "Deleted product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn restore_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::restore_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/product-batches",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Batches of a product, earliest expiry first", body = ApiResponse<ProductBatchList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_product_batches(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductBatchList>>> {
    let resp = batch_service::list_batches_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/product-stocks",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Stocks of a product", body = ApiResponse<ProductStockList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_product_stocks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductStockList>>> {
    let resp = stock_service::list_stocks_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/product-units",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Units of a product", body = ApiResponse<ProductUnitList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_product_units(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductUnitList>>> {
    let resp = unit_service::list_units_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/product-items",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Items of a product", body = ApiResponse<ProductItemList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_product_items(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductItemList>>> {
    let resp = item_service::list_items_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}
