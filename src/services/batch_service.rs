use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use sea_orm::ActiveValue::Set;

use crate::{
    dto::batch::{
        CreateProductBatchRequest, ProductBatchDetail, ProductBatchList, UpdateProductBatchRequest,
    },
    entity::{ProductBatches, Products, product_batches},
    error::{AppError, AppResult},
    ledger::{Movement, families::parse_date, tracker},
    middleware::auth::AuthUser,
    repository::{self, details, paginate},
    response::{ApiResponse, Deleted, Meta},
    routes::params::Pagination,
    services::{clean_text, ensure_active, require_id, require_non_negative},
    state::AppState,
};

const SUBJECT: &str = "Product batch";

pub async fn list_batches(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductBatchList>> {
    let finder = details::batch_details()
        .filter(product_batches::Column::DeletedAt.is_null())
        .order_by_desc(product_batches::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product batches",
        ProductBatchList { items },
        Some(meta),
    ))
}

pub async fn list_deleted_batches(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductBatchList>> {
    let finder = details::batch_details()
        .filter(product_batches::Column::DeletedAt.is_not_null())
        .order_by_desc(product_batches::Column::DeletedAt);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Deleted product batches",
        ProductBatchList { items },
        Some(meta),
    ))
}

pub async fn list_batches_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductBatchList>> {
    ensure_active::<Products, _>(&state.orm, product_id, "Product").await?;
    let finder = details::batch_details()
        .filter(product_batches::Column::DeletedAt.is_null())
        .filter(product_batches::Column::ProductId.eq(product_id))
        .order_by_asc(product_batches::Column::ExpDate);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product batches",
        ProductBatchList { items },
        Some(meta),
    ))
}

pub async fn get_batch(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductBatchDetail>> {
    let detail = batch_detail(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Product batch found",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn create_batch(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductBatchRequest,
) -> AppResult<ApiResponse<ProductBatchDetail>> {
    let actor = user.actor()?;
    require_id(payload.product_id, "product_id")?;
    require_non_negative(payload.unit_price, "unit_price")?;
    let exp_date = parse_exp_date(&payload.exp_date)?;

    let txn = state.orm.begin().await?;
    ensure_active::<Products, _>(&txn, payload.product_id, "Product").await?;

    let batch = product_batches::ActiveModel {
        product_id: Set(payload.product_id),
        code_batch: Set(clean_text(payload.code_batch)),
        unit_price: Set(payload.unit_price),
        exp_date: Set(exp_date),
        description: Set(clean_text(payload.description)),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    tracker::record_create(&txn, &batch, Movement::none(0.0), actor).await?;
    let detail = batch_detail(&txn, batch.id).await?;
    txn.commit().await?;

    tracing::info!(id = batch.id, product_id = batch.product_id, actor, "product batch created");
    Ok(ApiResponse::created("Product batch created", detail))
}

pub async fn update_batch(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateProductBatchRequest,
) -> AppResult<ApiResponse<ProductBatchDetail>> {
    let actor = user.actor()?;
    if let Some(product_id) = payload.product_id {
        require_id(product_id, "product_id")?;
    }
    require_non_negative(payload.unit_price, "unit_price")?;
    let exp_date = payload
        .exp_date
        .as_deref()
        .map(parse_exp_date)
        .transpose()?;

    let txn = state.orm.begin().await?;
    let old = repository::lock_active_by_id::<ProductBatches, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))?;

    if let Some(product_id) = payload.product_id.filter(|pid| *pid != old.product_id) {
        ensure_active::<Products, _>(&txn, product_id, "Product").await?;
    }

    let mut active: product_batches::ActiveModel = old.clone().into();
    if let Some(product_id) = payload.product_id {
        active.product_id = Set(product_id);
    }
    if let Some(code) = &payload.code_batch {
        active.code_batch = Set(clean_text(Some(code.clone())));
    }
    if let Some(price) = payload.unit_price {
        active.unit_price = Set(Some(price));
    }
    if let Some(exp_date) = exp_date {
        active.exp_date = Set(exp_date);
    }
    if let Some(description) = &payload.description {
        active.description = Set(clean_text(Some(description.clone())));
    }
    active.user_updt = Set(Some(actor));
    let updated = active.update(&txn).await?;

    tracker::record_update(&txn, &payload, &old, &updated, Movement::none(0.0), actor).await?;
    let detail = batch_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, "product batch updated");
    Ok(ApiResponse::success(
        "Product batch updated",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn delete_batch(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let batch = ensure_active::<ProductBatches, _>(&txn, id, SUBJECT).await?;
    tracker::record_delete(&txn, &batch, Movement::none(0.0), actor).await?;
    if !repository::soft_delete::<ProductBatches, _>(&txn, id, actor).await? {
        return Err(AppError::not_found(SUBJECT));
    }
    txn.commit().await?;

    tracing::info!(id, actor, "product batch deleted");
    Ok(ApiResponse::success(
        "Product batch deleted",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

pub async fn restore_batch(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<ProductBatchDetail>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let deleted = repository::find_deleted_by_id::<ProductBatches, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Deleted product batch"))?;
    ensure_active::<Products, _>(&txn, deleted.product_id, "Product").await?;
    if !repository::restore::<ProductBatches, _>(&txn, id, actor).await? {
        return Err(AppError::not_found("Deleted product batch"));
    }
    let restored = ensure_active::<ProductBatches, _>(&txn, id, SUBJECT).await?;
    tracker::record_restore(&txn, &restored, Movement::none(0.0), actor).await?;
    let detail = batch_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, "product batch restored");
    Ok(ApiResponse::success(
        "Product batch restored",
        detail,
        Some(Meta::empty()),
    ))
}

async fn batch_detail<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<ProductBatchDetail> {
    details::batch_details()
        .filter(product_batches::Column::Id.eq(id))
        .filter(product_batches::Column::DeletedAt.is_null())
        .into_model::<ProductBatchDetail>()
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))
}

fn parse_exp_date(raw: &str) -> AppResult<chrono::NaiveDate> {
    parse_date(raw)
        .ok_or_else(|| AppError::BadRequest("exp_date must be formatted as YYYY-MM-DD".into()))
}
