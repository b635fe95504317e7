use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use sea_orm::ActiveValue::Set;

use crate::{
    dto::unit::{
        CreateProductUnitRequest, ProductUnitDetail, ProductUnitList, UpdateProductUnitRequest,
    },
    entity::{
        Locations, ProductBatches, ProductUnits, Products, product_units, track_kind::Operation,
    },
    error::{AppError, AppResult},
    ledger::{Movement, tracker},
    middleware::auth::AuthUser,
    repository::{self, details, name_taken, paginate},
    response::{ApiResponse, Deleted, Meta},
    routes::params::Pagination,
    services::{clean_text, ensure_active, require_id, require_non_negative},
    state::AppState,
};

const SUBJECT: &str = "Product unit";

pub async fn list_units(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductUnitList>> {
    let finder = details::unit_details()
        .filter(product_units::Column::DeletedAt.is_null())
        .order_by_desc(product_units::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product units",
        ProductUnitList { items },
        Some(meta),
    ))
}

pub async fn list_deleted_units(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductUnitList>> {
    let finder = details::unit_details()
        .filter(product_units::Column::DeletedAt.is_not_null())
        .order_by_desc(product_units::Column::DeletedAt);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Deleted product units",
        ProductUnitList { items },
        Some(meta),
    ))
}

pub async fn list_units_by_product(
    state: &AppState,
    product_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductUnitList>> {
    ensure_active::<Products, _>(&state.orm, product_id, "Product").await?;
    let finder = details::unit_details()
        .filter(product_units::Column::DeletedAt.is_null())
        .filter(product_units::Column::ProductId.eq(product_id))
        .order_by_asc(product_units::Column::Id);
    let (items, meta) = paginate(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Product units",
        ProductUnitList { items },
        Some(meta),
    ))
}

pub async fn get_unit(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductUnitDetail>> {
    let detail = unit_detail(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Product unit found",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn get_unit_by_barcode(
    state: &AppState,
    barcode: &str,
) -> AppResult<ApiResponse<ProductUnitDetail>> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err(AppError::BadRequest("barcode is required".into()));
    }
    let detail = details::unit_details()
        .filter(product_units::Column::DeletedAt.is_null())
        .filter(product_units::Column::Barcode.eq(barcode))
        .order_by_asc(product_units::Column::Id)
        .into_model::<ProductUnitDetail>()
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))?;
    Ok(ApiResponse::success(
        "Product unit found",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn create_unit(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductUnitRequest,
) -> AppResult<ApiResponse<ProductUnitDetail>> {
    let actor = user.actor()?;
    require_id(payload.product_id, "product_id")?;
    require_id(payload.location_id, "location_id")?;
    require_amounts(payload.quantity, payload.unit_price, payload.unit_price_retail)?;
    let name = clean_text(payload.name);
    let barcode = clean_text(payload.barcode);

    let txn = state.orm.begin().await?;
    ensure_active::<Products, _>(&txn, payload.product_id, "Product").await?;
    ensure_active::<Locations, _>(&txn, payload.location_id, "Location").await?;
    if let Some(batch_id) = payload.product_batch_id {
        check_batch(&txn, batch_id, payload.product_id).await?;
    }
    let target = UnitKey {
        product_id: payload.product_id,
        location_id: payload.location_id,
        name: name.as_deref(),
    };
    ensure_name_free(&txn, &target, None).await?;
    if let Some(barcode) = barcode.as_deref() {
        resolve_barcode(&txn, barcode, &target, None).await?;
    }

    let unit = product_units::ActiveModel {
        product_id: Set(payload.product_id),
        location_id: Set(payload.location_id),
        product_batch_id: Set(payload.product_batch_id),
        name: Set(name),
        quantity: Set(payload.quantity),
        unit_price: Set(payload.unit_price),
        unit_price_retail: Set(payload.unit_price_retail),
        barcode: Set(barcode),
        description: Set(clean_text(payload.description)),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    tracker::record_create(
        &txn,
        &unit,
        Movement::new(Operation::Plus, unit.quantity.unwrap_or(0.0), 0.0),
        actor,
    )
    .await?;
    let detail = unit_detail(&txn, unit.id).await?;
    txn.commit().await?;

    tracing::info!(id = unit.id, product_id = unit.product_id, actor, "product unit created");
    Ok(ApiResponse::created("Product unit created", detail))
}

pub async fn update_unit(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateProductUnitRequest,
) -> AppResult<ApiResponse<ProductUnitDetail>> {
    let actor = user.actor()?;
    if let Some(product_id) = payload.product_id {
        require_id(product_id, "product_id")?;
    }
    if let Some(location_id) = payload.location_id {
        require_id(location_id, "location_id")?;
    }
    require_amounts(payload.quantity, payload.unit_price, payload.unit_price_retail)?;

    let txn = state.orm.begin().await?;
    let old = repository::lock_active_by_id::<ProductUnits, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))?;

    let product_id = payload.product_id.unwrap_or(old.product_id);
    let location_id = payload.location_id.unwrap_or(old.location_id);
    let batch_id = payload.product_batch_id.or(old.product_batch_id);
    let name = match &payload.name {
        Some(name) => clean_text(Some(name.clone())),
        None => old.name.clone(),
    };
    let barcode = match &payload.barcode {
        Some(barcode) => clean_text(Some(barcode.clone())),
        None => old.barcode.clone(),
    };

    if product_id != old.product_id {
        ensure_active::<Products, _>(&txn, product_id, "Product").await?;
    }
    if location_id != old.location_id {
        ensure_active::<Locations, _>(&txn, location_id, "Location").await?;
    }
    if let Some(batch_id) = batch_id.filter(|_| {
        payload.product_batch_id.is_some() || product_id != old.product_id
    }) {
        check_batch(&txn, batch_id, product_id).await?;
    }

    let target = UnitKey {
        product_id,
        location_id,
        name: name.as_deref(),
    };
    let key_changed = product_id != old.product_id
        || location_id != old.location_id
        || !same_name(name.as_deref(), old.name.as_deref());
    if key_changed {
        ensure_name_free(&txn, &target, Some(id)).await?;
    }
    if let Some(code) = barcode.as_deref().filter(|_| key_changed || barcode != old.barcode) {
        resolve_barcode(&txn, code, &target, Some(id)).await?;
    }

    let mut active: product_units::ActiveModel = old.clone().into();
    active.product_id = Set(product_id);
    active.location_id = Set(location_id);
    active.product_batch_id = Set(batch_id);
    active.name = Set(name);
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(Some(quantity));
    }
    if let Some(price) = payload.unit_price {
        active.unit_price = Set(Some(price));
    }
    if let Some(price) = payload.unit_price_retail {
        active.unit_price_retail = Set(Some(price));
    }
    active.barcode = Set(barcode);
    if let Some(description) = &payload.description {
        active.description = Set(clean_text(Some(description.clone())));
    }
    active.user_updt = Set(Some(actor));
    let updated = active.update(&txn).await?;

    let delta = updated.quantity.unwrap_or(0.0) - old.quantity.unwrap_or(0.0);
    tracker::record_update(
        &txn,
        &payload,
        &old,
        &updated,
        Movement::new(Operation::adjustment_for(delta), delta, 0.0),
        actor,
    )
    .await?;
    let detail = unit_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, "product unit updated");
    Ok(ApiResponse::success(
        "Product unit updated",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn delete_unit(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let unit = ensure_active::<ProductUnits, _>(&txn, id, SUBJECT).await?;
    tracker::record_delete(
        &txn,
        &unit,
        Movement::new(Operation::Minus, unit.quantity.unwrap_or(0.0), 0.0),
        actor,
    )
    .await?;
    if !repository::soft_delete::<ProductUnits, _>(&txn, id, actor).await? {
        return Err(AppError::not_found(SUBJECT));
    }
    txn.commit().await?;

    tracing::info!(id, actor, "product unit deleted");
    Ok(ApiResponse::success(
        "Product unit deleted",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

pub async fn restore_unit(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<ProductUnitDetail>> {
    let actor = user.actor()?;

    let txn = state.orm.begin().await?;
    let deleted = repository::find_deleted_by_id::<ProductUnits, _>(&txn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Deleted product unit"))?;
    ensure_active::<Products, _>(&txn, deleted.product_id, "Product").await?;
    ensure_active::<Locations, _>(&txn, deleted.location_id, "Location").await?;
    if let Some(batch_id) = deleted.product_batch_id {
        ensure_active::<ProductBatches, _>(&txn, batch_id, "Product batch").await?;
    }
    if let Some(barcode) = deleted.barcode.as_deref() {
        let target = UnitKey {
            product_id: deleted.product_id,
            location_id: deleted.location_id,
            name: deleted.name.as_deref(),
        };
        resolve_barcode(&txn, barcode, &target, Some(id)).await?;
    }
    if !repository::restore::<ProductUnits, _>(&txn, id, actor).await? {
        return Err(AppError::not_found("Deleted product unit"));
    }
    let restored = ensure_active::<ProductUnits, _>(&txn, id, SUBJECT).await?;
    tracker::record_restore(
        &txn,
        &restored,
        Movement::new(Operation::Plus, restored.quantity.unwrap_or(0.0), 0.0),
        actor,
    )
    .await?;
    let detail = unit_detail(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(id, actor, "product unit restored");
    Ok(ApiResponse::success(
        "Product unit restored",
        detail,
        Some(Meta::empty()),
    ))
}

/// The (product, location, name) a unit is identified by.
struct UnitKey<'a> {
    product_id: i32,
    location_id: i32,
    name: Option<&'a str>,
}

fn same_name(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    }
}

fn require_amounts(
    quantity: Option<f64>,
    unit_price: Option<f64>,
    unit_price_retail: Option<f64>,
) -> AppResult<()> {
    require_non_negative(quantity, "quantity")?;
    require_non_negative(unit_price, "unit_price")?;
    require_non_negative(unit_price_retail, "unit_price_retail")
}

async fn check_batch<C: ConnectionTrait>(conn: &C, batch_id: i32, product_id: i32) -> AppResult<()> {
    require_id(batch_id, "product_batch_id")?;
    let batch = ensure_active::<ProductBatches, _>(conn, batch_id, "Product batch").await?;
    if batch.product_id != product_id {
        return Err(AppError::BadRequest(
            "product batch does not belong to the product".into(),
        ));
    }
    Ok(())
}

async fn ensure_name_free<C: ConnectionTrait>(
    conn: &C,
    key: &UnitKey<'_>,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    let Some(name) = key.name else {
        return Ok(());
    };
    let scope = Condition::all()
        .add(product_units::Column::ProductId.eq(key.product_id))
        .add(product_units::Column::LocationId.eq(key.location_id));
    if name_taken::<ProductUnits, _>(conn, product_units::Column::Name, name, scope, exclude_id)
        .await?
    {
        return Err(AppError::Conflict(format!(
            "product unit '{name}' already exists for this product and location"
        )));
    }
    Ok(())
}

/// A barcode may repeat across variants of one product, never across products.
async fn resolve_barcode<C: ConnectionTrait>(
    conn: &C,
    barcode: &str,
    key: &UnitKey<'_>,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    let mut finder = repository::find_active::<ProductUnits>()
        .filter(product_units::Column::Barcode.eq(barcode));
    if let Some(id) = exclude_id {
        finder = finder.filter(product_units::Column::Id.ne(id));
    }
    let holders = finder.all(conn).await?;

    for holder in holders {
        if holder.product_id != key.product_id {
            return Err(AppError::Conflict(
                "barcode belongs to another product".into(),
            ));
        }
        if holder.location_id == key.location_id
            && same_name(holder.name.as_deref(), key.name)
        {
            return Err(AppError::Conflict("duplicate unit".into()));
        }
    }
    Ok(())
}

async fn unit_detail<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<ProductUnitDetail> {
    details::unit_details()
        .filter(product_units::Column::Id.eq(id))
        .filter(product_units::Column::DeletedAt.is_null())
        .into_model::<ProductUnitDetail>()
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found(SUBJECT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_names_compare_case_insensitively() {
        assert!(same_name(Some("Box"), Some("BOX")));
        assert!(same_name(None, None));
        assert!(!same_name(Some("Box"), None));
        assert!(!same_name(Some("Box"), Some("Pack")));
    }
}
