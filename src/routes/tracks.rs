//! Read endpoints for the four track families plus the admin-only corrections.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::track::{
        BatchTrackDetail, BatchTrackList, DateRangeQuery, ItemTrackDetail, ItemTrackList,
        ItemValueReportList, OperationQuery, StockTrackDetail, StockTrackList, UnitTrackDetail,
        UnitTrackList, UpdateTrackRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::track_service,
    state::AppState,
};

pub fn batch_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_batch_tracks))
        .route("/batch/{id}", get(list_batch_tracks_by_batch))
        .route("/product/{id}", get(list_batch_tracks_by_product))
        .route("/{id}", get(get_batch_track).delete(delete_batch_track))
}

pub fn unit_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_unit_tracks))
        .route("/unit/{id}", get(list_unit_tracks_by_unit))
        .route("/product/{id}", get(list_unit_tracks_by_product))
        .route("/{id}", get(get_unit_track).delete(delete_unit_track))
}

pub fn stock_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stock_tracks))
        .route("/stock/{id}", get(list_stock_tracks_by_stock))
        .route("/product/{id}", get(list_stock_tracks_by_product))
        .route("/date-range", get(list_stock_tracks_by_date))
        .route(
            "/{id}",
            get(get_stock_track)
                .put(update_stock_track)
                .delete(delete_stock_track),
        )
}

pub fn item_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_item_tracks))
        .route("/item/{id}", get(list_item_tracks_by_item))
        .route("/stock/{id}", get(list_item_tracks_by_stock))
        .route("/product/{id}", get(list_item_tracks_by_product))
        .route("/date-range", get(list_item_tracks_by_date))
        .route("/by-operation", get(list_item_tracks_by_operation))
        .route("/value-report", get(item_value_report))
        .route(
            "/{id}",
            get(get_item_track)
                .put(update_item_track)
                .delete(delete_item_track),
        )
}

// Batch tracks

#[utoipa::path(
    get,
    path = "/api/v1/product-batch-tracks",
    params(Pagination),
    responses(
        (status = 200, description = "List batch tracks", body = ApiResponse<BatchTrackList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_batch_tracks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<BatchTrackList>>> {
    let resp = track_service::list_batch_tracks(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-batch-tracks/{id}",
    params(("id" = i32, Path, description = "Batch track ID")),
    responses(
        (status = 200, description = "Get batch track", body = ApiResponse<BatchTrackDetail>),
        (status = 404, description = "Batch track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn get_batch_track(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<BatchTrackDetail>>> {
    let resp = track_service::get_batch_track(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-batch-tracks/batch/{id}",
    params(("id" = i32, Path, description = "Product batch ID"), Pagination),
    responses(
        (status = 200, description = "Tracks of one batch", body = ApiResponse<BatchTrackList>),
        (status = 404, description = "Product batch not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_batch_tracks_by_batch(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<BatchTrackList>>> {
    let resp = track_service::list_batch_tracks_by_batch(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-batch-tracks/product/{id}",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Batch tracks of one product", body = ApiResponse<BatchTrackList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_batch_tracks_by_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<BatchTrackList>>> {
    let resp = track_service::list_batch_tracks_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-batch-tracks/{id}",
    params(("id" = i32, Path, description = "Batch track ID")),
    responses(
        (status = 200, description = "Soft-delete batch track", body = ApiResponse<Deleted>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Batch track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn delete_batch_track(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = track_service::delete_batch_track(&state, &user, id).await?;
    Ok(Json(resp))
}

// Unit tracks

#[utoipa::path(
    get,
    path = "/api/v1/product-unit-tracks",
    params(Pagination),
    responses(
        (status = 200, description = "List unit tracks", body = ApiResponse<UnitTrackList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_unit_tracks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UnitTrackList>>> {
    let resp = track_service::list_unit_tracks(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-unit-tracks/{id}",
    params(("id" = i32, Path, description = "Unit track ID")),
    responses(
        (status = 200, description = "Get unit track", body = ApiResponse<UnitTrackDetail>),
        (status = 404, description = "Unit track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn get_unit_track(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<UnitTrackDetail>>> {
    let resp = track_service::get_unit_track(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-unit-tracks/unit/{id}",
    params(("id" = i32, Path, description = "Product unit ID"), Pagination),
    responses(
        (status = 200, description = "Tracks of one unit", body = ApiResponse<UnitTrackList>),
        (status = 404, description = "Product unit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_unit_tracks_by_unit(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UnitTrackList>>> {
    let resp = track_service::list_unit_tracks_by_unit(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-unit-tracks/product/{id}",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Unit tracks of one product", body = ApiResponse<UnitTrackList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_unit_tracks_by_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UnitTrackList>>> {
    let resp = track_service::list_unit_tracks_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-unit-tracks/{id}",
    params(("id" = i32, Path, description = "Unit track ID")),
    responses(
        (status = 200, description = "Soft-delete unit track", body = ApiResponse<Deleted>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Unit track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn delete_unit_track(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = track_service::delete_unit_track(&state, &user, id).await?;
    Ok(Json(resp))
}

// Stock tracks

#[utoipa::path(
    get,
    path = "/api/v1/product-stock-tracks",
    params(Pagination),
    responses(
        (status = 200, description = "List stock tracks", body = ApiResponse<StockTrackList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_stock_tracks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<StockTrackList>>> {
    let resp = track_service::list_stock_tracks(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stock-tracks/{id}",
    params(("id" = i32, Path, description = "Stock track ID")),
    responses(
        (status = 200, description = "Get stock track", body = ApiResponse<StockTrackDetail>),
        (status = 404, description = "Stock track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn get_stock_track(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<StockTrackDetail>>> {
    let resp = track_service::get_stock_track(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stock-tracks/stock/{id}",
    params(("id" = i32, Path, description = "Product stock ID"), Pagination),
    responses(
        (status = 200, description = "Tracks of one stock", body = ApiResponse<StockTrackList>),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_stock_tracks_by_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<StockTrackList>>> {
    let resp = track_service::list_stock_tracks_by_stock(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stock-tracks/product/{id}",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Stock tracks of one product", body = ApiResponse<StockTrackList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_stock_tracks_by_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<StockTrackList>>> {
    let resp = track_service::list_stock_tracks_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-stock-tracks/date-range",
    params(DateRangeQuery, Pagination),
    responses(
        (status = 200, description = "Stock tracks dated within the range", body = ApiResponse<StockTrackList>),
        (status = 400, description = "Malformed or inverted range")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_stock_tracks_by_date(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(range): Query<DateRangeQuery>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<StockTrackList>>> {
    let resp = track_service::list_stock_tracks_by_date(&state, range, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-stock-tracks/{id}",
    params(("id" = i32, Path, description = "Stock track ID")),
    request_body = UpdateTrackRequest,
    responses(
        (status = 200, description = "Correct stock track", body = ApiResponse<StockTrackDetail>),
        (status = 400, description = "Invalid correction"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Stock track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn update_stock_track(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTrackRequest>,
) -> AppResult<Json<ApiResponse<StockTrackDetail>>> {
    let resp = track_service::update_stock_track(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-stock-tracks/{id}",
    params(("id" = i32, Path, description = "Stock track ID")),
    responses(
        (status = 200, description = "Soft-delete stock track", body = ApiResponse<Deleted>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Stock track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn delete_stock_track(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = track_service::delete_stock_track(&state, &user, id).await?;
    Ok(Json(resp))
}

// Item tracks

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks",
    params(Pagination),
    responses(
        (status = 200, description = "List item tracks", body = ApiResponse<ItemTrackList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_item_tracks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ItemTrackList>>> {
    let resp = track_service::list_item_tracks(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks/{id}",
    params(("id" = i32, Path, description = "Item track ID")),
    responses(
        (status = 200, description = "Get item track", body = ApiResponse<ItemTrackDetail>),
        (status = 404, description = "Item track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn get_item_track(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ItemTrackDetail>>> {
    let resp = track_service::get_item_track(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks/item/{id}",
    params(("id" = i32, Path, description = "Product item ID"), Pagination),
    responses(
        (status = 200, description = "Tracks of one item", body = ApiResponse<ItemTrackList>),
        (status = 404, description = "Product item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_item_tracks_by_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ItemTrackList>>> {
    let resp = track_service::list_item_tracks_by_item(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks/stock/{id}",
    params(("id" = i32, Path, description = "Product stock ID"), Pagination),
    responses(
        (status = 200, description = "Item tracks of one stock", body = ApiResponse<ItemTrackList>),
        (status = 404, description = "Product stock not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_item_tracks_by_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ItemTrackList>>> {
    let resp = track_service::list_item_tracks_by_stock(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks/product/{id}",
    params(("id" = i32, Path, description = "Product ID"), Pagination),
    responses(
        (status = 200, description = "Item tracks of one product", body = ApiResponse<ItemTrackList>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_item_tracks_by_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ItemTrackList>>> {
    let resp = track_service::list_item_tracks_by_product(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks/date-range",
    params(DateRangeQuery, Pagination),
    responses(
        (status = 200, description = "Item tracks dated within the range", body = ApiResponse<ItemTrackList>),
        (status = 400, description = "Malformed or inverted range")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_item_tracks_by_date(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(range): Query<DateRangeQuery>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ItemTrackList>>> {
    let resp = track_service::list_item_tracks_by_date(&state, range, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks/by-operation",
    params(OperationQuery, Pagination),
    responses(
        (status = 200, description = "Item tracks with one operation", body = ApiResponse<ItemTrackList>),
        (status = 400, description = "Unknown operation")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn list_item_tracks_by_operation(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<OperationQuery>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ItemTrackList>>> {
    let resp =
        track_service::list_item_tracks_by_operation(&state, &query.operation, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-item-tracks/value-report",
    responses(
        (status = 200, description = "Movement value grouped by product", body = ApiResponse<ItemValueReportList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn item_value_report(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ItemValueReportList>>> {
    let resp = track_service::item_value_report(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-item-tracks/{id}",
    params(("id" = i32, Path, description = "Item track ID")),
    request_body = UpdateTrackRequest,
    responses(
        (status = 200, description = "Correct item track", body = ApiResponse<ItemTrackDetail>),
        (status = 400, description = "Invalid correction"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Item track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn update_item_track(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTrackRequest>,
) -> AppResult<Json<ApiResponse<ItemTrackDetail>>> {
    let resp = track_service::update_item_track(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-item-tracks/{id}",
    params(("id" = i32, Path, description = "Item track ID")),
    responses(
        (status = 200, description = "Soft-delete item track", body = ApiResponse<Deleted>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Item track not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tracks"
)]
pub async fn delete_item_track(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = track_service::delete_item_track(&state, &user, id).await?;
    Ok(Json(resp))
}
