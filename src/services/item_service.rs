use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
    sea_query::{Expr, Func, SimpleExpr},
};
use sea_orm::ActiveValue::Set;

use crate::{
    dto::{
        item::{
            CreateProductItemRequest, ProductItemDetail, ProductItemList, ProductItemSummary,
            ProductItemSummaryList, UpdateProductItemRequest,
        },
        stock::StockMovementRequest,
    },
    entity::{
        ProductBatches, ProductItems, ProductStocks, Products, product_items, product_stocks,
        products, track_kind::Operation,
    },
    error::{AppError, AppResult},
    ledger::{Movement, families::ItemChanges, tracker},
    middleware::auth::AuthUser,
    repository::{self, details, paginate},
    response::{ApiResponse, Deleted, Meta},
    routes::params::Pagination,
    services::{clean_text, ensure_active, require_id, require_non_negative},
    state::AppState,
};

const SUBJECT: &str = "Product item";

pub async fn list_items(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductItemList>> {
    let finder = details::item_details()
        .filter(product_items::Column::DeletedAt.is_null())
        .order_by_desc(product_items::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product items",
        ProductItemList { items },
        Some(meta),
    ))
}

pub async fn list_deleted_items(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductItemList>> {
    let finder = details::item_details()
        .filter(product_items::Column::DeletedAt.is_not_null())
        .order_by_desc(product_items::Column::DeletedAt);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Deleted product items",
        ProductItemList { items },
        Some(meta),
    ))
}

pub async fn list_items_by_stock(
    state: &AppState,
    stock_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductItemList>> {
    ensure_active::<ProductStocks, _>(&state.orm, stock_id, "Product stock").await?;
    let finder = details::item_details()
        .filter(product_items::Column::DeletedAt.is_null())
        .filter(product_items::Column::ProductStockId.eq(stock_id))
        .order_by_desc(product_items::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product items",
        ProductItemList { items },
        Some(meta),
    ))
}

pub async fn list_items_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductItemList>> {
    ensure_active::<Products, _>(&state.orm, product_id, "Product").await?;
    let finder = details::item_details()
        .filter(product_items::Column::DeletedAt.is_null())
        .filter(product_items::Column::ProductId.eq(product_id))
        .order_by_desc(product_items::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product items",
        ProductItemList { items },
        Some(meta),
    ))
}

pub async fn get_item(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductItemDetail>> {
    let detail = item_detail(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Product item found",
        detail,
        Some(Meta::empty()),
    ))
}

/// Totals of active items grouped by product.
pub async fn summary_by_product(
    state: &AppState,
) -> AppResult<ApiResponse<ProductItemSummaryList>> {
    let total_in: SimpleExpr =
        Func::sum(Expr::col((ProductItems, product_items::Column::StockIn))).into();
    let total_out: SimpleExpr =
        Func::sum(Expr::col((ProductItems, product_items::Column::StockOut))).into();
    let total_quantity: SimpleExpr =
        Func::sum(Expr::col((ProductItems, product_items::Column::Quantity))).into();

    let items = ProductItems::find()
        .select_only()
        .column(product_items::Column::ProductId)
        .column_as(products::Column::Name, "product_name")
        .column_as(total_in, "total_stock_in")
        .column_as(total_out, "total_stock_out")
        .column_as(total_quantity, "total_quantity")
        .join(JoinType::LeftJoin, product_items::Relation::Product.def())
        .filter(product_items::Column::DeletedAt.is_null())
        .group_by(product_items::Column::ProductId)
        .group_by(products::Column::Name)
        .order_by_asc(product_items::Column::ProductId)
        .into_model::<ProductItemSummary>()
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Product item summary",
        ProductItemSummaryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductItemRequest,
) -> AppResult<ApiResponse<ProductItemDetail>> {
    let actor = user.actor()?;
    require_id(payload.product_stock_id, "product_stock_id")?;
    require_non_negative(payload.stock_in, "stock_in")?;
    require_non_negative(payload.stock_out, "stock_out")?;
    ensure_single_direction(payload.stock_in, payload.stock_out)?;
    let quantity = derive_quantity(payload.stock_in, payload.stock_out, payload.quantity);
    if quantity == 0.0 {
        return Err(AppError::BadRequest(
            "one of stock_in, stock_out or quantity must be non-zero".into(),
        ));
    }
    let operation = payload
        .operation
        .unwrap_or_else(|| infer_operation(payload.stock_in, payload.stock_out, quantity));
    if operation.is_ledger_adjustment() {
        return Err(AppError::BadRequest(
            "operation must be In or Out for product items".into(),
        ));
    }

    let txn = state.orm.begin().await?;
    let stock = ensure_active::<ProductStocks, _>(&txn, payload.product_stock_id, "Product stock")
        .await?;
    if payload
        .product_batch_id
        .is_some_and(|batch_id| batch_id != stock.product_batch_id)
    {
        return Err(AppError::BadRequest(
            "product_batch_id does not match the product stock".into(),
        ));
    }
    if payload
        .product_id
        .is_some_and(|product_id| product_id != stock.product_id)
    {
        return Err(AppError::BadRequest(
            "product_id does not match the product stock".into(),
        ));
    }

    let (before, after) = apply_to_stock(&txn, stock.id, quantity, actor).await?;

    let item = product_items::ActiveModel {
        product_stock_id: Set(stock.id),
        product_batch_id: Set(stock.product_batch_id),
        product_id: Set(stock.product_id),
        stock_in: Set(payload.stock_in),
        stock_out: Set(payload.stock_out),
        quantity: Set(Some(quantity)),
        description: Set(clean_text(payload.description)),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let unit_price = batch_unit_price(&txn, item.product_batch_id).await?;
    tracker::record_create(
        &txn,
        &item,
        Movement::new(operation, quantity, after.quantity).priced(unit_price),
        actor,
    )
    .await?;
    tracker::record_movement(
        &txn,
        &after,
        Movement::adjustment(before.quantity, after.quantity),
        movement_note(operation, item.id, quantity),
        actor,
    )
    .await?;
    let detail = item_detail(&txn, item.id).await?;
    txn.commit().await?;

    tracing::info!(
        id = item.id,
        product_stock_id = stock.id,
        actor,
        quantity,
        operation = %operation,
        "product item created"
    );
    Ok(ApiResponse::created("Product item created", detail))
}

/// Records one inbound or outbound movement against a stock.
pub async fn process_stock_movement(
    state: &AppState,
    user: &AuthUser,
    stock_id: i32,
    payload: StockMovementRequest,
) -> AppResult<ApiResponse<ProductItemDetail>> {
    let inbound = payload.stock_in.is_some_and(|v| v > 0.0);
    let outbound = payload.stock_out.is_some_and(|v| v > 0.0);
    if inbound == outbound {
        return Err(AppError::BadRequest(
            "exactly one of stock_in or stock_out must be positive".into(),
        ));
    }
    let request = CreateProductItemRequest {
        product_stock_id: stock_id,
        stock_in: payload.stock_in.filter(|_| inbound),
        stock_out: payload.stock_out.filter(|_| outbound),
        description: payload.description,
        ..Default::default()
    };
    create_item(state, user, request).await
}

pub async fn update_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateProductItemRequest,
) -> AppResult<ApiResponse<ProductItemDetail>> {
    let actor = user.actor()?;
    require_non_negative(payload.stock_in, "stock_in")?;
    require_non_negative(payload.stock_out, "stock_out")?;

    let txn = state.orm.begin().await?;
    let old = repository::lock_active_by_id::<ProductItems, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))?;

    let stock_in = payload.stock_in.or(old.stock_in);
    let stock_out = payload.stock_out.or(old.stock_out);
    ensure_single_direction(stock_in, stock_out)?;
    let quantity = derive_quantity(stock_in, stock_out, payload.quantity.or(old.quantity));
    let delta = quantity - old.signed_quantity();

    let changes = ItemChanges {
        stock_in: payload.stock_in,
        stock_out: payload.stock_out,
        quantity: Some(quantity),
        description: payload.description.clone(),
    };

    let level = if delta != 0.0 {
        let (before, after) = apply_to_stock(&txn, old.product_stock_id, delta, actor).await?;
        tracker::record_movement(
            &txn,
            &after,
            Movement::adjustment(before.quantity, after.quantity),
            format!("Adjusted by product item {id}: {delta:+.2}"),
            actor,
        )
        .await?;
        after.quantity
    } else {
        ensure_active::<ProductStocks, _>(&txn, old.product_stock_id, "Product stock")
            .await?
            .quantity
    };

    let mut active: product_items::ActiveModel = old.clone().into();
    active.stock_in = Set(stock_in);
    active.stock_out = Set(stock_out);
    active.quantity = Set(Some(quantity));
    if let Some(description) = &payload.description {
        active.description = Set(clean_text(Some(description.clone())));
    }
    active.user_updt = Set(Some(actor));
    let updated = active.update(&txn).await?;

    let unit_price = batch_unit_price(&txn, updated.product_batch_id).await?;
    tracker::record_update(
        &txn,
        &changes,
        &old,
        &updated,
        Movement::new(Operation::movement_for(delta), delta, level).priced(unit_price),
        actor,
    )
    .await?;
    let detail = item_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, delta, "product item updated");
    Ok(ApiResponse::success(
        "Product item updated",
        detail,
        Some(Meta::empty()),
    ))
}

/// Soft-deletes the item and reverses its quantity on the parent stock.
pub async fn delete_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let item = repository::lock_active_by_id::<ProductItems, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))?;
    let quantity = item.signed_quantity();
    let (before, after) = apply_to_stock(&txn, item.product_stock_id, -quantity, actor).await?;

    let unit_price = batch_unit_price(&txn, item.product_batch_id).await?;
    tracker::record_delete(
        &txn,
        &item,
        Movement::new(Operation::movement_for(-quantity), quantity, after.quantity)
            .priced(unit_price),
        actor,
    )
    .await?;
    tracker::record_movement(
        &txn,
        &after,
        Movement::adjustment(before.quantity, after.quantity),
        format!("Reversed product item {id}"),
        actor,
    )
    .await?;
    if !repository::soft_delete::<ProductItems, _>(&txn, id, actor).await? {
        return Err(AppError::not_found(SUBJECT));
    }
    txn.commit().await?;

    tracing::info!(id, actor, "product item deleted");
    Ok(ApiResponse::success(
        "Product item deleted",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

/// Restores the item and re-applies its quantity to the parent stock.
pub async fn restore_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<ProductItemDetail>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let deleted = repository::find_deleted_by_id::<ProductItems, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Deleted product item"))?;
    let quantity = deleted.signed_quantity();
    let (before, after) =
        apply_to_stock(&txn, deleted.product_stock_id, quantity, actor).await?;
    if !repository::restore::<ProductItems, _>(&txn, id, actor).await? {
        return Err(AppError::not_found("Deleted product item"));
    }
    let restored = ensure_active::<ProductItems, _>(&txn, id, SUBJECT).await?;

    let unit_price = batch_unit_price(&txn, restored.product_batch_id).await?;
    tracker::record_restore(
        &txn,
        &restored,
        Movement::new(Operation::movement_for(quantity), quantity, after.quantity)
            .priced(unit_price),
        actor,
    )
    .await?;
    tracker::record_movement(
        &txn,
        &after,
        Movement::adjustment(before.quantity, after.quantity),
        format!("Re-applied product item {id}"),
        actor,
    )
    .await?;
    let detail = item_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, "product item restored");
    Ok(ApiResponse::success(
        "Product item restored",
        detail,
        Some(Meta::empty()),
    ))
}

/// Applies a signed delta to a stock under a row lock. Returns the stock before and after.
async fn apply_to_stock<C: ConnectionTrait>(
    conn: &C,
    stock_id: i32,
    delta: f64,
    actor: i32,
) -> AppResult<(product_stocks::Model, product_stocks::Model)> {
    let before = repository::lock_active_by_id::<ProductStocks, _>(conn, stock_id)
        .await?
        .ok_or_else(|| AppError::not_found("Product stock"))?;

    let quantity = before.quantity + delta;
    if quantity < 0.0 {
        return Err(AppError::BadRequest(format!(
            "insufficient stock: available {:.2}, requested {:.2}",
            before.quantity,
            delta.abs()
        )));
    }

    let mut active: product_stocks::ActiveModel = before.clone().into();
    active.quantity = Set(quantity);
    active.version = Set(before.version + 1);
    active.user_updt = Set(Some(actor));
    let after = active.update(conn).await?;
    Ok((before, after))
}

async fn batch_unit_price<C: ConnectionTrait>(conn: &C, batch_id: i32) -> AppResult<Option<f64>> {
    Ok(ProductBatches::find_by_id(batch_id)
        .one(conn)
        .await?
        .and_then(|batch| batch.unit_price))
}

fn ensure_single_direction(stock_in: Option<f64>, stock_out: Option<f64>) -> AppResult<()> {
    if stock_in.unwrap_or(0.0) > 0.0 && stock_out.unwrap_or(0.0) > 0.0 {
        return Err(AppError::BadRequest(
            "stock_in and stock_out cannot both be positive".into(),
        ));
    }
    Ok(())
}

/// `stock_in` when inbound, `-stock_out` when outbound, the explicit value otherwise.
fn derive_quantity(stock_in: Option<f64>, stock_out: Option<f64>, explicit: Option<f64>) -> f64 {
    match (stock_in.filter(|v| *v > 0.0), stock_out.filter(|v| *v > 0.0)) {
        (Some(inbound), _) => inbound,
        (None, Some(outbound)) => -outbound,
        (None, None) => explicit.unwrap_or(0.0),
    }
}

fn infer_operation(stock_in: Option<f64>, stock_out: Option<f64>, quantity: f64) -> Operation {
    if stock_out.is_some_and(|v| v > 0.0) {
        Operation::Out
    } else if stock_in.is_some_and(|v| v > 0.0) {
        Operation::In
    } else {
        Operation::movement_for(quantity)
    }
}

fn movement_note(operation: Operation, item_id: i32, quantity: f64) -> String {
    let direction = match operation {
        Operation::Out | Operation::Minus => "Stock out",
        Operation::In | Operation::Plus => "Stock in",
    };
    format!("{direction} via product item {item_id}: {:.2}", quantity.abs())
}

async fn item_detail<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<ProductItemDetail> {
    details::item_details()
        .filter(product_items::Column::Id.eq(id))
        .filter(product_items::Column::DeletedAt.is_null())
        .into_model::<ProductItemDetail>()
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_follows_direction() {
        assert_eq!(derive_quantity(Some(50.0), None, None), 50.0);
        assert_eq!(derive_quantity(None, Some(20.0), None), -20.0);
        assert_eq!(derive_quantity(Some(0.0), Some(0.0), Some(7.5)), 7.5);
        assert_eq!(derive_quantity(None, None, None), 0.0);
        assert_eq!(derive_quantity(Some(50.0), None, Some(10.0)), 50.0);
    }

    #[test]
    fn both_directions_positive_is_rejected() {
        assert!(ensure_single_direction(Some(50.0), Some(20.0)).is_err());
        assert!(ensure_single_direction(Some(50.0), Some(0.0)).is_ok());
    }

    #[test]
    fn operation_is_inferred_from_stock_out() {
        assert_eq!(infer_operation(None, Some(1.0), -1.0), Operation::Out);
        assert_eq!(infer_operation(Some(1.0), None, 1.0), Operation::In);
        assert_eq!(infer_operation(None, None, -3.0), Operation::Out);
    }
}
