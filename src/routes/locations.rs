use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::{
        catalog::{CreateLocationRequest, LocationList, UpdateLocationRequest},
        stock::ProductStockList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Location,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::{catalog_service, stock_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route("/deleted", get(list_deleted_locations))
        .route(
            "/{id}",
            get(get_location).put(update_location).delete(delete_location),
        )
        .route("/{id}/restore", put(restore_location))
        .route("/{id}/product-stocks", get(list_location_stocks))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations",
    params(Pagination),
    responses(
        (status = 200, description = "List locations", body = ApiResponse<LocationList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn list_locations(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<LocationList>>> {
    let resp = catalog_service::list_locations(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted locations", body = ApiResponse<LocationList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn list_deleted_locations(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<LocationList>>> {
    let resp = catalog_service::list_deleted_locations(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Get location", body = ApiResponse<Location>),
        (status = 404, description = "Location not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn get_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Location>>> {
    let resp = catalog_service::get_location(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Create location", body = ApiResponse<Location>),
        (status = 400, description = "Unknown location kind"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn create_location(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateLocationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Location>>)> {
    let resp = catalog_service::create_location(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}",
    params(("id" = i32, Path, description = "Location ID")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Update location", body = ApiResponse<Location>),
        (status = 404, description = "Location not found"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn update_location(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLocationRequest>,
) -> AppResult<Json<ApiResponse<Location>>> {
    let resp = catalog_service::update_location(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Soft-delete location", body = ApiResponse<Deleted>),
        (status = 404, description = "Location not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn delete_location(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = catalog_service::delete_location(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}/restore",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Restore location", body = ApiResponse<Location>),
        (status = 404, description = "Deleted location not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn restore_location(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Location>>> {
    let resp = catalog_service::restore_location(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}/product-stocks",
    params(("id" = i32, Path, description = "Location ID"), Pagination),
    responses(
        (status = 200, description = "Stocks held at a location", body = ApiResponse<ProductStockList>),
        (status = 404, description = "Location not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Locations"
)]
pub async fn list_location_stocks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductStockList>>> {
    let resp = stock_service::list_stocks_by_location(&state, id, pagination).await?;
    Ok(Json(resp))
}
