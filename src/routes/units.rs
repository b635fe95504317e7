use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::unit::{
        CreateProductUnitRequest, ProductUnitDetail, ProductUnitList, UpdateProductUnitRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::unit_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units).post(create_unit))
        .route("/deleted", get(list_deleted_units))
        .route("/barcode/{barcode}", get(get_unit_by_barcode))
        .route("/{id}", get(get_unit).put(update_unit).delete(delete_unit))
        .route("/{id}/restore", put(restore_unit))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-units",
    params(Pagination),
    responses(
        (status = 200, description = "List product units", body = ApiResponse<ProductUnitList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn list_units(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductUnitList>>> {
    let resp = unit_service::list_units(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-units/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted product units", body = ApiResponse<ProductUnitList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn list_deleted_units(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductUnitList>>> {
    let resp = unit_service::list_deleted_units(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-units/barcode/{barcode}",
    params(("barcode" = String, Path, description = "Unit barcode")),
    responses(
        (status = 200, description = "Unit carrying the barcode", body = ApiResponse<ProductUnitDetail>),
        (status = 404, description = "No active unit carries the barcode")
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn get_unit_by_barcode(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(barcode): Path<String>,
) -> AppResult<Json<ApiResponse<ProductUnitDetail>>> {
    let resp = unit_service::get_unit_by_barcode(&state, &barcode).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-units/{id}",
    params(("id" = i32, Path, description = "Product unit ID")),
    responses(
        (status = 200, description = "Get product unit", body = ApiResponse<ProductUnitDetail>),
        (status = 404, description = "Product unit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn get_unit(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductUnitDetail>>> {
    let resp = unit_service::get_unit(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/product-units",
    request_body = CreateProductUnitRequest,
    responses(
        (status = 201, description = "Create product unit", body = ApiResponse<ProductUnitDetail>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product, location or batch not found"),
        (status = 409, description = "Barcode or name conflict")
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn create_unit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductUnitRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductUnitDetail>>)> {
    let resp = unit_service::create_unit(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-units/{id}",
    params(("id" = i32, Path, description = "Product unit ID")),
    request_body = UpdateProductUnitRequest,
    responses(
        (status = 200, description = "Update product unit", body = ApiResponse<ProductUnitDetail>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product unit not found"),
        (status = 409, description = "Barcode or name conflict")
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn update_unit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductUnitRequest>,
) -> AppResult<Json<ApiResponse<ProductUnitDetail>>> {
    let resp = unit_service::update_unit(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-units/{id}",
    params(("id" = i32, Path, description = "Product unit ID")),
    responses(
        (status = 200, description = "Soft-delete product unit", body = ApiResponse<Deleted>),
        (status = 404, description = "Product unit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = unit_service::delete_unit(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-units/{id}/restore",
    params(("id" = i32, Path, description = "Product unit ID")),
    responses(
        (status = 200, description = "Restore product unit", body = ApiResponse<ProductUnitDetail>),
        (status = 404, description = "Deleted product unit not found"),
        (status = 409, description = "Barcode now used by another unit")
    ),
    security(("bearer_auth" = [])),
    tag = "Product units"
)]
pub async fn restore_unit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductUnitDetail>>> {
    let resp = unit_service::restore_unit(&state, &user, id).await?;
    Ok(Json(resp))
}
