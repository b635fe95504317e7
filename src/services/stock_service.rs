use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, TransactionTrait,
};
use sea_orm::ActiveValue::Set;

use crate::{
    dto::stock::{
        CreateProductStockRequest, ProductStockDetail, ProductStockList, StockReconciliation,
        UpdateProductStockRequest,
    },
    entity::{
        Locations, ProductBatches, ProductStockTracks, ProductStocks, Products,
        product_stock_tracks, product_stocks, track_kind::Operation,
    },
    error::{AppError, AppResult},
    ledger::{Movement, tracker},
    middleware::auth::AuthUser,
    repository::{self, details, paginate},
    response::{ApiResponse, Deleted, Meta},
    routes::params::Pagination,
    services::{ensure_active, require_id, require_non_negative},
    state::AppState,
};

const SUBJECT: &str = "Product stock";

/// Tolerance when comparing a stock level against its track history.
const RECONCILE_EPSILON: f64 = 1e-6;

pub async fn list_stocks(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductStockList>> {
    let finder = details::stock_details()
        .filter(product_stocks::Column::DeletedAt.is_null())
        .order_by_desc(product_stocks::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product stocks",
        ProductStockList { items },
        Some(meta),
    ))
}

pub async fn list_deleted_stocks(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductStockList>> {
    let finder = details::stock_details()
        .filter(product_stocks::Column::DeletedAt.is_not_null())
        .order_by_desc(product_stocks::Column::DeletedAt);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Deleted product stocks",
        ProductStockList { items },
        Some(meta),
    ))
}

pub async fn list_stocks_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductStockList>> {
    ensure_active::<Products, _>(&state.orm, product_id, "Product").await?;
    let finder = details::stock_details()
        .filter(product_stocks::Column::DeletedAt.is_null())
        .filter(product_stocks::Column::ProductId.eq(product_id))
        .order_by_desc(product_stocks::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product stocks",
        ProductStockList { items },
        Some(meta),
    ))
}

pub async fn list_stocks_by_location(
    state: &AppState,
    location_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductStockList>> {
    ensure_active::<Locations, _>(&state.orm, location_id, "Location").await?;
    let finder = details::stock_details()
        .filter(product_stocks::Column::DeletedAt.is_null())
        .filter(product_stocks::Column::LocationId.eq(location_id))
        .order_by_desc(product_stocks::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product stocks",
        ProductStockList { items },
        Some(meta),
    ))
}

pub async fn get_stock(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductStockDetail>> {
    let detail = stock_detail(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Product stock found",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn create_stock(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductStockRequest,
) -> AppResult<ApiResponse<ProductStockDetail>> {
    let actor = user.actor()?;
    require_id(payload.product_batch_id, "product_batch_id")?;
    require_id(payload.product_id, "product_id")?;
    require_id(payload.location_id, "location_id")?;
    require_non_negative(payload.quantity, "quantity")?;
    let quantity = payload.quantity.unwrap_or(0.0);

    let txn = state.orm.begin().await?;
    check_references(
        &txn,
        payload.product_batch_id,
        payload.product_id,
        payload.location_id,
    )
    .await?;
    ensure_unique_triple(
        &txn,
        payload.product_batch_id,
        payload.product_id,
        payload.location_id,
        None,
    )
    .await?;

    let stock = product_stocks::ActiveModel {
        product_batch_id: Set(payload.product_batch_id),
        product_id: Set(payload.product_id),
        location_id: Set(payload.location_id),
        quantity: Set(quantity),
        version: Set(1),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    tracker::record_create(
        &txn,
        &stock,
        Movement::new(Operation::Plus, quantity, quantity),
        actor,
    )
    .await?;
    let detail = stock_detail(&txn, stock.id).await?;
    txn.commit().await?;

    tracing::info!(id = stock.id, product_id = stock.product_id, actor, quantity, "product stock created");
    Ok(ApiResponse::created("Product stock created", detail))
}

pub async fn update_stock(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateProductStockRequest,
) -> AppResult<ApiResponse<ProductStockDetail>> {
    let actor = user.actor()?;
    for (value, field) in [
        (payload.product_batch_id, "product_batch_id"),
        (payload.product_id, "product_id"),
        (payload.location_id, "location_id"),
    ] {
        if let Some(value) = value {
            require_id(value, field)?;
        }
    }
    require_non_negative(payload.quantity, "quantity")?;

    let txn = state.orm.begin().await?;
    let old = repository::lock_active_by_id::<ProductStocks, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))?;

    if let Some(expected) = payload.version {
        if expected != old.version {
            return Err(AppError::Conflict(format!(
                "product stock was modified concurrently (expected version {expected}, current {})",
                old.version
            )));
        }
    }

    let batch_id = payload.product_batch_id.unwrap_or(old.product_batch_id);
    let product_id = payload.product_id.unwrap_or(old.product_id);
    let location_id = payload.location_id.unwrap_or(old.location_id);
    let references_changed = batch_id != old.product_batch_id
        || product_id != old.product_id
        || location_id != old.location_id;
    if references_changed {
        check_references(&txn, batch_id, product_id, location_id).await?;
        ensure_unique_triple(&txn, batch_id, product_id, location_id, Some(id)).await?;
    }

    let quantity = payload.quantity.unwrap_or(old.quantity);
    let mut active: product_stocks::ActiveModel = old.clone().into();
    active.product_batch_id = Set(batch_id);
    active.product_id = Set(product_id);
    active.location_id = Set(location_id);
    active.quantity = Set(quantity);
    active.version = Set(old.version + 1);
    active.user_updt = Set(Some(actor));
    let updated = active.update(&txn).await?;

    tracker::record_update(
        &txn,
        &payload,
        &old,
        &updated,
        Movement::adjustment(old.quantity, updated.quantity),
        actor,
    )
    .await?;
    let detail = stock_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, version = updated.version, "product stock updated");
    Ok(ApiResponse::success(
        "Product stock updated",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn delete_stock(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let stock = repository::lock_active_by_id::<ProductStocks, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))?;
    tracker::record_delete(
        &txn,
        &stock,
        Movement::new(Operation::Minus, stock.quantity, 0.0),
        actor,
    )
    .await?;
    if !repository::soft_delete::<ProductStocks, _>(&txn, id, actor).await? {
        return Err(AppError::not_found(SUBJECT));
    }
    txn.commit().await?;

    tracing::info!(id, actor, "product stock deleted");
    Ok(ApiResponse::success(
        "Product stock deleted",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

pub async fn restore_stock(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<ProductStockDetail>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let deleted = repository::find_deleted_by_id::<ProductStocks, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Deleted product stock"))?;
    ensure_active::<Products, _>(&txn, deleted.product_id, "Product").await?;
    ensure_active::<ProductBatches, _>(&txn, deleted.product_batch_id, "Product batch").await?;
    ensure_active::<Locations, _>(&txn, deleted.location_id, "Location").await?;
    ensure_unique_triple(
        &txn,
        deleted.product_batch_id,
        deleted.product_id,
        deleted.location_id,
        Some(id),
    )
    .await?;
    if !repository::restore::<ProductStocks, _>(&txn, id, actor).await? {
        return Err(AppError::not_found("Deleted product stock"));
    }
    let restored = ensure_active::<ProductStocks, _>(&txn, id, SUBJECT).await?;
    tracker::record_restore(
        &txn,
        &restored,
        Movement::new(Operation::Plus, restored.quantity, restored.quantity),
        actor,
    )
    .await?;
    let detail = stock_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, "product stock restored");
    Ok(ApiResponse::success(
        "Product stock restored",
        detail,
        Some(Meta::empty()),
    ))
}

/// Compares the stored quantity with the level implied by the stock's tracks.
pub async fn reconcile_stock(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<StockReconciliation>> {
    let stock = ensure_active::<ProductStocks, _>(&state.orm, id, SUBJECT).await?;
    let tracks = active_tracks_for_stock(id);
    let track_count = tracks.clone().count(&state.orm).await?;
    let tracked_quantity: f64 = tracks
        .all(&state.orm)
        .await?
        .iter()
        .map(|track| track.operation.sign() * track.quantity)
        .sum();

    let difference = stock.quantity - tracked_quantity;
    let data = StockReconciliation {
        product_stock_id: id,
        quantity: stock.quantity,
        tracked_quantity,
        difference,
        consistent: difference.abs() < RECONCILE_EPSILON,
        track_count,
    };
    if !data.consistent {
        tracing::warn!(id, difference, "product stock does not match its track history");
    }
    Ok(ApiResponse::success(
        "Product stock reconciliation",
        data,
        Some(Meta::empty()),
    ))
}

fn active_tracks_for_stock(stock_id: i32) -> Select<ProductStockTracks> {
    repository::find_active::<ProductStockTracks>()
        .filter(product_stock_tracks::Column::ProductStockId.eq(stock_id))
        .order_by_asc(product_stock_tracks::Column::Id)
}

/// Batch, product and location must exist, and the batch must belong to the product.
async fn check_references<C: ConnectionTrait>(
    conn: &C,
    batch_id: i32,
    product_id: i32,
    location_id: i32,
) -> AppResult<()> {
    ensure_active::<Products, _>(conn, product_id, "Product").await?;
    ensure_active::<Locations, _>(conn, location_id, "Location").await?;
    let batch = ensure_active::<ProductBatches, _>(conn, batch_id, "Product batch").await?;
    if batch.product_id != product_id {
        return Err(AppError::BadRequest(
            "product batch does not belong to the product".into(),
        ));
    }
    Ok(())
}

async fn ensure_unique_triple<C: ConnectionTrait>(
    conn: &C,
    batch_id: i32,
    product_id: i32,
    location_id: i32,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    let mut finder = repository::find_active::<ProductStocks>()
        .filter(product_stocks::Column::ProductBatchId.eq(batch_id))
        .filter(product_stocks::Column::ProductId.eq(product_id))
        .filter(product_stocks::Column::LocationId.eq(location_id));
    if let Some(id) = exclude_id {
        finder = finder.filter(product_stocks::Column::Id.ne(id));
    }
    if finder.count(conn).await? > 0 {
        return Err(AppError::Conflict(
            "stock already recorded for this batch, product and location".into(),
        ));
    }
    Ok(())
}

pub(crate) async fn stock_detail<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> AppResult<ProductStockDetail> {
    details::stock_details()
        .filter(product_stocks::Column::Id.eq(id))
        .filter(product_stocks::Column::DeletedAt.is_null())
        .into_model::<ProductStockDetail>()
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))
}
