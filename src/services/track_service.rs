//! Read side of the four track families plus the admin correction paths.

use chrono::{Days, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, Func, SimpleExpr},
};
use sea_orm::ActiveValue::Set;

use crate::{
    dto::track::{
        BatchTrackDetail, BatchTrackList, DateRangeQuery, ItemTrackDetail, ItemTrackList,
        ItemValueReport, ItemValueReportList, StockTrackDetail, StockTrackList, UnitTrackDetail,
        UnitTrackList, UpdateTrackRequest,
    },
    entity::{
        ProductBatchTracks, ProductBatches, ProductItemTracks, ProductItems, ProductStockTracks,
        ProductStocks, ProductUnitTracks, ProductUnits, Products, product_batch_tracks,
        product_item_tracks, product_stock_tracks, product_unit_tracks, products,
        track_kind::Operation,
    },
    error::{AppError, AppResult},
    ledger::families::parse_date,
    middleware::auth::{AuthUser, ensure_admin},
    repository::{self, Audited, details, paginate},
    response::{ApiResponse, Deleted, Meta},
    routes::params::Pagination,
    services::{clean_text, ensure_active},
    state::AppState,
};

async fn page<E, M>(
    state: &AppState,
    finder: Select<E>,
    pagination: &Pagination,
) -> AppResult<(Vec<M>, Meta)>
where
    E: EntityTrait,
    E::Model: Sync,
    M: FromQueryResult + Send + Sync,
{
    Ok(paginate(&state.orm, finder, pagination).await?)
}

async fn one<E, M>(state: &AppState, finder: Select<E>, label: &str) -> AppResult<M>
where
    E: EntityTrait,
    M: FromQueryResult,
{
    finder
        .into_model::<M>()
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(label))
}

// Batch tracks

fn batch_tracks() -> Select<ProductBatchTracks> {
    details::batch_track_details()
        .filter(product_batch_tracks::Column::DeletedAt.is_null())
        .order_by_asc(product_batch_tracks::Column::Id)
}

pub async fn list_batch_tracks(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<BatchTrackList>> {
    let (items, meta) = page(state, batch_tracks(), &pagination).await?;
    Ok(ApiResponse::success("Product batch tracks", BatchTrackList { items }, Some(meta)))
}

pub async fn get_batch_track(state: &AppState, id: i32) -> AppResult<ApiResponse<BatchTrackDetail>> {
    let finder = batch_tracks().filter(product_batch_tracks::Column::Id.eq(id));
    let detail = one(state, finder, "Product batch track").await?;
    Ok(ApiResponse::success("Product batch track found", detail, Some(Meta::empty())))
}

pub async fn list_batch_tracks_by_batch(
    state: &AppState,
    batch_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<BatchTrackList>> {
    ensure_exists::<ProductBatches>(state, batch_id, "Product batch").await?;
    let finder = batch_tracks().filter(product_batch_tracks::Column::ProductBatchId.eq(batch_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product batch tracks", BatchTrackList { items }, Some(meta)))
}

pub async fn list_batch_tracks_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<BatchTrackList>> {
    ensure_exists::<Products>(state, product_id, "Product").await?;
    let finder = batch_tracks().filter(product_batch_tracks::Column::ProductId.eq(product_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product batch tracks", BatchTrackList { items }, Some(meta)))
}

// Unit tracks

fn unit_tracks() -> Select<ProductUnitTracks> {
    details::unit_track_details()
        .filter(product_unit_tracks::Column::DeletedAt.is_null())
        .order_by_asc(product_unit_tracks::Column::Id)
}

pub async fn list_unit_tracks(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<UnitTrackList>> {
    let (items, meta) = page(state, unit_tracks(), &pagination).await?;
    Ok(ApiResponse::success("Product unit tracks", UnitTrackList { items }, Some(meta)))
}

pub async fn get_unit_track(state: &AppState, id: i32) -> AppResult<ApiResponse<UnitTrackDetail>> {
    let finder = unit_tracks().filter(product_unit_tracks::Column::Id.eq(id));
    let detail = one(state, finder, "Product unit track").await?;
    Ok(ApiResponse::success("Product unit track found", detail, Some(Meta::empty())))
}

pub async fn list_unit_tracks_by_unit(
    state: &AppState,
    unit_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<UnitTrackList>> {
    ensure_exists::<ProductUnits>(state, unit_id, "Product unit").await?;
    let finder = unit_tracks().filter(product_unit_tracks::Column::ProductUnitId.eq(unit_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product unit tracks", UnitTrackList { items }, Some(meta)))
}

pub async fn list_unit_tracks_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<UnitTrackList>> {
    ensure_exists::<Products>(state, product_id, "Product").await?;
    let finder = unit_tracks().filter(product_unit_tracks::Column::ProductId.eq(product_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product unit tracks", UnitTrackList { items }, Some(meta)))
}

// Stock tracks

fn stock_tracks() -> Select<ProductStockTracks> {
    details::stock_track_details()
        .filter(product_stock_tracks::Column::DeletedAt.is_null())
        .order_by_asc(product_stock_tracks::Column::Id)
}

pub async fn list_stock_tracks(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<StockTrackList>> {
    let (items, meta) = page(state, stock_tracks(), &pagination).await?;
    Ok(ApiResponse::success("Product stock tracks", StockTrackList { items }, Some(meta)))
}

pub async fn get_stock_track(state: &AppState, id: i32) -> AppResult<ApiResponse<StockTrackDetail>> {
    let finder = stock_tracks().filter(product_stock_tracks::Column::Id.eq(id));
    let detail = one(state, finder, "Product stock track").await?;
    Ok(ApiResponse::success("Product stock track found", detail, Some(Meta::empty())))
}

pub async fn list_stock_tracks_by_stock(
    state: &AppState,
    stock_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<StockTrackList>> {
    ensure_exists::<ProductStocks>(state, stock_id, "Product stock").await?;
    let finder = stock_tracks().filter(product_stock_tracks::Column::ProductStockId.eq(stock_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product stock tracks", StockTrackList { items }, Some(meta)))
}

pub async fn list_stock_tracks_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<StockTrackList>> {
    ensure_exists::<Products>(state, product_id, "Product").await?;
    let finder = stock_tracks().filter(product_stock_tracks::Column::ProductId.eq(product_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product stock tracks", StockTrackList { items }, Some(meta)))
}

pub async fn list_stock_tracks_by_date(
    state: &AppState,
    range: DateRangeQuery,
    pagination: Pagination,
) -> AppResult<ApiResponse<StockTrackList>> {
    let (from, until) = day_bounds(&range)?;
    let finder = stock_tracks()
        .filter(product_stock_tracks::Column::Date.gte(from))
        .filter(product_stock_tracks::Column::Date.lt(until));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product stock tracks", StockTrackList { items }, Some(meta)))
}

pub async fn update_stock_track(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateTrackRequest,
) -> AppResult<ApiResponse<StockTrackDetail>> {
    ensure_admin(user)?;
    let actor = user.actor()?;
    validate_correction(&payload)?;
    if payload.operation.is_some_and(|op| !op.is_ledger_adjustment()) {
        return Err(AppError::BadRequest(
            "stock track operation must be Plus or Minus".into(),
        ));
    }

    let track = ensure_active::<ProductStockTracks, _>(&state.orm, id, "Product stock track").await?;
    let mut active: product_stock_tracks::ActiveModel = track.into();
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(operation) = payload.operation {
        active.operation = Set(operation);
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
    }
    if let Some(description) = clean_text(payload.description) {
        active.description = Set(description);
    }
    active.user_updt = Set(Some(actor));
    active.update(&state.orm).await?;

    tracing::info!(id, actor, "product stock track corrected");
    let finder = stock_tracks().filter(product_stock_tracks::Column::Id.eq(id));
    let detail = one(state, finder, "Product stock track").await?;
    Ok(ApiResponse::success("Product stock track updated", detail, Some(Meta::empty())))
}

// Item tracks

fn item_tracks() -> Select<ProductItemTracks> {
    details::item_track_details()
        .filter(product_item_tracks::Column::DeletedAt.is_null())
        .order_by_asc(product_item_tracks::Column::Id)
}

pub async fn list_item_tracks(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ItemTrackList>> {
    let (items, meta) = page(state, item_tracks(), &pagination).await?;
    Ok(ApiResponse::success("Product item tracks", ItemTrackList { items }, Some(meta)))
}

pub async fn get_item_track(state: &AppState, id: i32) -> AppResult<ApiResponse<ItemTrackDetail>> {
    let finder = item_tracks().filter(product_item_tracks::Column::Id.eq(id));
    let detail = one(state, finder, "Product item track").await?;
    Ok(ApiResponse::success("Product item track found", detail, Some(Meta::empty())))
}

pub async fn list_item_tracks_by_item(
    state: &AppState,
    item_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ItemTrackList>> {
    ensure_exists::<ProductItems>(state, item_id, "Product item").await?;
    let finder = item_tracks().filter(product_item_tracks::Column::ProductItemId.eq(item_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product item tracks", ItemTrackList { items }, Some(meta)))
}

pub async fn list_item_tracks_by_stock(
    state: &AppState,
    stock_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ItemTrackList>> {
    ensure_exists::<ProductStocks>(state, stock_id, "Product stock").await?;
    let finder = item_tracks().filter(product_item_tracks::Column::ProductStockId.eq(stock_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product item tracks", ItemTrackList { items }, Some(meta)))
}

pub async fn list_item_tracks_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ItemTrackList>> {
    ensure_exists::<Products>(state, product_id, "Product").await?;
    let finder = item_tracks().filter(product_item_tracks::Column::ProductId.eq(product_id));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product item tracks", ItemTrackList { items }, Some(meta)))
}

pub async fn list_item_tracks_by_date(
    state: &AppState,
    range: DateRangeQuery,
    pagination: Pagination,
) -> AppResult<ApiResponse<ItemTrackList>> {
    let (from, until) = day_bounds(&range)?;
    let finder = item_tracks()
        .filter(product_item_tracks::Column::Date.gte(from))
        .filter(product_item_tracks::Column::Date.lt(until));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product item tracks", ItemTrackList { items }, Some(meta)))
}

pub async fn list_item_tracks_by_operation(
    state: &AppState,
    operation: &str,
    pagination: Pagination,
) -> AppResult<ApiResponse<ItemTrackList>> {
    let operation = Operation::parse(operation).ok_or_else(|| {
        AppError::BadRequest("operation must be one of Plus, Minus, In, Out".into())
    })?;
    let finder = item_tracks().filter(product_item_tracks::Column::Operation.eq(operation));
    let (items, meta) = page(state, finder, &pagination).await?;
    Ok(ApiResponse::success("Product item tracks", ItemTrackList { items }, Some(meta)))
}

/// Per product: Σ signed quantity × unit price over priced tracks, their count and average unit price.
///
/// Outbound and reversal tracks (`Out`, `Minus`) subtract, so deleting an item cancels its value.
pub async fn item_value_report(state: &AppState) -> AppResult<ApiResponse<ItemValueReportList>> {
    let quantity = Expr::col((ProductItemTracks, product_item_tracks::Column::Quantity));
    let unit_price = Expr::col((ProductItemTracks, product_item_tracks::Column::UnitPrice));
    let sign: SimpleExpr = Expr::case(
        Expr::col((ProductItemTracks, product_item_tracks::Column::Operation))
            .is_in([Operation::Out.as_str(), Operation::Minus.as_str()]),
        Expr::val(-1.0),
    )
    .finally(Expr::val(1.0))
    .into();
    let total_value: SimpleExpr = Func::sum(quantity.mul(sign).mul(unit_price.clone())).into();
    let transactions: SimpleExpr =
        Func::count(Expr::col((ProductItemTracks, product_item_tracks::Column::Id))).into();
    let average_unit_price: SimpleExpr = Func::avg(unit_price).into();

    let items = ProductItemTracks::find()
        .select_only()
        .column(product_item_tracks::Column::ProductId)
        .column_as(products::Column::Name, "product_name")
        .column_as(total_value, "total_value")
        .column_as(transactions, "transactions")
        .column_as(average_unit_price, "average_unit_price")
        .join(JoinType::LeftJoin, product_item_tracks::Relation::Product.def())
        .filter(product_item_tracks::Column::DeletedAt.is_null())
        .filter(product_item_tracks::Column::UnitPrice.is_not_null())
        .group_by(product_item_tracks::Column::ProductId)
        .group_by(products::Column::Name)
        .order_by_asc(product_item_tracks::Column::ProductId)
        .into_model::<ItemValueReport>()
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Product item value report",
        ItemValueReportList { items },
        Some(Meta::empty()),
    ))
}

pub async fn update_item_track(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateTrackRequest,
) -> AppResult<ApiResponse<ItemTrackDetail>> {
    ensure_admin(user)?;
    let actor = user.actor()?;
    validate_correction(&payload)?;

    let track = ensure_active::<ProductItemTracks, _>(&state.orm, id, "Product item track").await?;
    let mut active: product_item_tracks::ActiveModel = track.into();
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(operation) = payload.operation {
        active.operation = Set(operation);
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
    }
    if let Some(description) = clean_text(payload.description) {
        active.description = Set(description);
    }
    active.user_updt = Set(Some(actor));
    active.update(&state.orm).await?;

    tracing::info!(id, actor, "product item track corrected");
    let finder = item_tracks().filter(product_item_tracks::Column::Id.eq(id));
    let detail = one(state, finder, "Product item track").await?;
    Ok(ApiResponse::success("Product item track updated", detail, Some(Meta::empty())))
}

// Admin deletion, the only path that shrinks a track family.

pub async fn delete_batch_track(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    delete_track::<ProductBatchTracks>(state, user, id, "Product batch track").await
}

pub async fn delete_stock_track(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    delete_track::<ProductStockTracks>(state, user, id, "Product stock track").await
}

pub async fn delete_item_track(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    delete_track::<ProductItemTracks>(state, user, id, "Product item track").await
}

pub async fn delete_unit_track(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    delete_track::<ProductUnitTracks>(state, user, id, "Product unit track").await
}

async fn delete_track<E: Audited>(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    label: &str,
) -> AppResult<ApiResponse<Deleted>> {
    ensure_admin(user)?;
    let actor = user.actor()?;
    if !repository::soft_delete::<E, _>(&state.orm, id, actor).await? {
        return Err(AppError::not_found(label));
    }
    tracing::info!(id, actor, track = label, "track deleted");
    Ok(ApiResponse::success(
        format!("{label} deleted"),
        Deleted { id },
        Some(Meta::empty()),
    ))
}

/// Parents may be soft-deleted; their history stays readable.
async fn ensure_exists<E: Audited>(state: &AppState, id: i32, label: &str) -> AppResult<()> {
    E::find()
        .filter(E::id_column().eq(id))
        .one(&state.orm)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(label))
}

fn validate_correction(payload: &UpdateTrackRequest) -> AppResult<()> {
    if payload.quantity.is_some_and(|q| !q.is_finite() || q <= 0.0) {
        return Err(AppError::BadRequest("quantity must be greater than zero".into()));
    }
    if payload.stock.is_some_and(|s| !s.is_finite() || s < 0.0) {
        return Err(AppError::BadRequest("stock cannot be negative".into()));
    }
    Ok(())
}

/// `[start 00:00 UTC, end + 1 day 00:00 UTC)`.
fn day_bounds(range: &DateRangeQuery) -> AppResult<(DateTimeWithTimeZone, DateTimeWithTimeZone)> {
    let start = parse_date(&range.start_date)
        .ok_or_else(|| AppError::BadRequest("start_date must be formatted as YYYY-MM-DD".into()))?;
    let end = parse_date(&range.end_date)
        .ok_or_else(|| AppError::BadRequest("end_date must be formatted as YYYY-MM-DD".into()))?;
    if end < start {
        return Err(AppError::BadRequest("end_date must not be before start_date".into()));
    }
    let until = end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::BadRequest("end_date is out of range".into()))?;
    Ok((
        start.and_time(NaiveTime::MIN).and_utc().fixed_offset(),
        until.and_time(NaiveTime::MIN).and_utc().fixed_offset(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> DateRangeQuery {
        DateRangeQuery {
            start_date: start.into(),
            end_date: end.into(),
        }
    }

    #[test]
    fn day_bounds_cover_the_whole_end_day() {
        let (from, until) = day_bounds(&range("2025-01-01", "2025-01-31")).unwrap();
        assert_eq!(from.to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert_eq!(until.to_rfc3339(), "2025-02-01T00:00:00+00:00");
    }

    #[test]
    fn reversed_or_malformed_range_is_rejected() {
        assert!(day_bounds(&range("2025-02-01", "2025-01-01")).is_err());
        assert!(day_bounds(&range("01/01/2025", "2025-01-31")).is_err());
    }

    #[test]
    fn corrections_require_positive_quantity() {
        let zero = UpdateTrackRequest {
            quantity: Some(0.0),
            ..Default::default()
        };
        assert!(validate_correction(&zero).is_err());
        let negative_stock = UpdateTrackRequest {
            stock: Some(-1.0),
            ..Default::default()
        };
        assert!(validate_correction(&negative_stock).is_err());
        assert!(validate_correction(&UpdateTrackRequest::default()).is_ok());
    }
}
