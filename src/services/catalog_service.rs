//! Master data the ledger points at. These rows carry audit stamps but no history.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, QueryFilter, QueryOrder,
};
use sea_orm::ActiveValue::Set;

use crate::{
    dto::catalog::{
        BrandList, CategoryList, CreateBrandRequest, CreateCategoryRequest, CreateLocationRequest,
        CreateProductRequest, LocationList, ProductList, UpdateBrandRequest,
        UpdateCategoryRequest, UpdateLocationRequest, UpdateProductRequest,
    },
    entity::{Brands, Categories, Locations, Products, brands, categories, locations, products},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Brand, Category, Location, Product},
    repository::{self, Audited, name_taken, paginate},
    response::{ApiResponse, Deleted, Meta},
    routes::params::Pagination,
    services::{clean_text, ensure_active, require_id, require_name},
    state::AppState,
};

pub const LOCATION_KINDS: [&str; 2] = ["warehouse", "reseller"];

// Brands

pub async fn list_brands(state: &AppState, pagination: Pagination) -> AppResult<ApiResponse<BrandList>> {
    let finder = repository::find_active::<Brands>().order_by_asc(brands::Column::Name);
    let (rows, meta) = paginate::<_, brands::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Brand::from).collect();
    Ok(ApiResponse::success("Brands", BrandList { items }, Some(meta)))
}

pub async fn list_deleted_brands(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<BrandList>> {
    let finder = repository::find_deleted::<Brands>().order_by_desc(brands::Column::DeletedAt);
    let (rows, meta) = paginate::<_, brands::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Brand::from).collect();
    Ok(ApiResponse::success("Deleted brands", BrandList { items }, Some(meta)))
}

pub async fn get_brand(state: &AppState, id: i32) -> AppResult<ApiResponse<Brand>> {
    let brand = ensure_active::<Brands, _>(&state.orm, id, "Brand").await?;
    Ok(ApiResponse::success("Brand found", brand.into(), Some(Meta::empty())))
}

pub async fn create_brand(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBrandRequest,
) -> AppResult<ApiResponse<Brand>> {
    let actor = user.actor()?;
    let name = require_name(&payload.name, "name")?;
    ensure_brand_name_free(&state.orm, &name, None).await?;

    let brand = brands::ActiveModel {
        name: Set(name),
        description: Set(clean_text(payload.description)),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(id = brand.id, actor, "brand created");
    Ok(ApiResponse::created("Brand created", brand.into()))
}

pub async fn update_brand(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateBrandRequest,
) -> AppResult<ApiResponse<Brand>> {
    let actor = user.actor()?;
    let old = ensure_active::<Brands, _>(&state.orm, id, "Brand").await?;

    let mut active: brands::ActiveModel = old.clone().into();
    if let Some(name) = &payload.name {
        let name = require_name(name, "name")?;
        if !name.eq_ignore_ascii_case(&old.name) {
            ensure_brand_name_free(&state.orm, &name, Some(id)).await?;
        }
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(clean_text(Some(description)));
    }
    active.user_updt = Set(Some(actor));
    let brand = active.update(&state.orm).await?;

    tracing::info!(id, actor, "brand updated");
    Ok(ApiResponse::success("Brand updated", brand.into(), Some(Meta::empty())))
}

pub async fn delete_brand(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    soft_delete_row::<Brands>(state, user, id, "Brand").await
}

pub async fn restore_brand(state: &AppState, user: &AuthUser, id: i32) -> AppResult<ApiResponse<Brand>> {
    let actor = user.actor()?;
    let deleted = repository::find_deleted_by_id::<Brands, _>(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Deleted brand"))?;
    let restored = restore_row::<Brands>(state, actor, deleted.id, "brand").await?;
    Ok(ApiResponse::success("Brand restored", restored.into(), Some(Meta::empty())))
}

async fn ensure_brand_name_free<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    if name_taken::<Brands, _>(conn, brands::Column::Name, name, Condition::all(), exclude_id).await? {
        return Err(AppError::Conflict(format!("brand '{name}' already exists")));
    }
    Ok(())
}

// Categories

pub async fn list_categories(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CategoryList>> {
    let finder = repository::find_active::<Categories>().order_by_asc(categories::Column::Name);
    let (rows, meta) = paginate::<_, categories::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Category::from).collect();
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn list_deleted_categories(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CategoryList>> {
    let finder =
        repository::find_deleted::<Categories>().order_by_desc(categories::Column::DeletedAt);
    let (rows, meta) = paginate::<_, categories::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Category::from).collect();
    Ok(ApiResponse::success("Deleted categories", CategoryList { items }, Some(meta)))
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Category>> {
    let category = ensure_active::<Categories, _>(&state.orm, id, "Category").await?;
    Ok(ApiResponse::success("Category found", category.into(), Some(Meta::empty())))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let actor = user.actor()?;
    require_id(payload.brand_id, "brand_id")?;
    let name = require_name(&payload.name, "name")?;
    ensure_active::<Brands, _>(&state.orm, payload.brand_id, "Brand").await?;
    ensure_category_name_free(&state.orm, payload.brand_id, &name, None).await?;

    let category = categories::ActiveModel {
        brand_id: Set(payload.brand_id),
        name: Set(name),
        description: Set(clean_text(payload.description)),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(id = category.id, brand_id = category.brand_id, actor, "category created");
    Ok(ApiResponse::created("Category created", category.into()))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let actor = user.actor()?;
    let old = ensure_active::<Categories, _>(&state.orm, id, "Category").await?;

    let brand_id = payload.brand_id.unwrap_or(old.brand_id);
    if brand_id != old.brand_id {
        require_id(brand_id, "brand_id")?;
        ensure_active::<Brands, _>(&state.orm, brand_id, "Brand").await?;
    }
    let name = match &payload.name {
        Some(name) => require_name(name, "name")?,
        None => old.name.clone(),
    };
    if brand_id != old.brand_id || !name.eq_ignore_ascii_case(&old.name) {
        ensure_category_name_free(&state.orm, brand_id, &name, Some(id)).await?;
    }

    let mut active: categories::ActiveModel = old.into();
    active.brand_id = Set(brand_id);
    active.name = Set(name);
    if let Some(description) = payload.description {
        active.description = Set(clean_text(Some(description)));
    }
    active.user_updt = Set(Some(actor));
    let category = active.update(&state.orm).await?;

    tracing::info!(id, actor, "category updated");
    Ok(ApiResponse::success("Category updated", category.into(), Some(Meta::empty())))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    soft_delete_row::<Categories>(state, user, id, "Category").await
}

pub async fn restore_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Category>> {
    let actor = user.actor()?;
    let deleted = repository::find_deleted_by_id::<Categories, _>(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Deleted category"))?;
    ensure_active::<Brands, _>(&state.orm, deleted.brand_id, "Brand").await?;
    let restored = restore_row::<Categories>(state, actor, deleted.id, "category").await?;
    Ok(ApiResponse::success("Category restored", restored.into(), Some(Meta::empty())))
}

async fn ensure_category_name_free<C: ConnectionTrait>(
    conn: &C,
    brand_id: i32,
    name: &str,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    let scope = Condition::all().add(categories::Column::BrandId.eq(brand_id));
    if name_taken::<Categories, _>(conn, categories::Column::Name, name, scope, exclude_id).await? {
        return Err(AppError::Conflict(format!(
            "category '{name}' already exists for this brand"
        )));
    }
    Ok(())
}

// Products

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let finder = repository::find_active::<Products>().order_by_asc(products::Column::Name);
    let (rows, meta) = paginate::<_, products::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Product::from).collect();
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn list_deleted_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let finder = repository::find_deleted::<Products>().order_by_desc(products::Column::DeletedAt);
    let (rows, meta) = paginate::<_, products::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Product::from).collect();
    Ok(ApiResponse::success("Deleted products", ProductList { items }, Some(meta)))
}

pub async fn list_products_by_category(
    state: &AppState,
    category_id: i32,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_active::<Categories, _>(&state.orm, category_id, "Category").await?;
    let finder = repository::find_active::<Products>()
        .filter(products::Column::CategoryId.eq(category_id))
        .order_by_asc(products::Column::Name);
    let (rows, meta) = paginate::<_, products::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Product::from).collect();
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = ensure_active::<Products, _>(&state.orm, id, "Product").await?;
    Ok(ApiResponse::success("Product found", product.into(), Some(Meta::empty())))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let actor = user.actor()?;
    require_id(payload.category_id, "category_id")?;
    let name = require_name(&payload.name, "name")?;
    ensure_active::<Categories, _>(&state.orm, payload.category_id, "Category").await?;
    ensure_product_name_free(&state.orm, payload.category_id, &name, None).await?;

    let product = products::ActiveModel {
        category_id: Set(payload.category_id),
        name: Set(name),
        description: Set(clean_text(payload.description)),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(id = product.id, category_id = product.category_id, actor, "product created");
    Ok(ApiResponse::created("Product created", product.into()))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let actor = user.actor()?;
    let old = ensure_active::<Products, _>(&state.orm, id, "Product").await?;

    let category_id = payload.category_id.unwrap_or(old.category_id);
    if category_id != old.category_id {
        require_id(category_id, "category_id")?;
        ensure_active::<Categories, _>(&state.orm, category_id, "Category").await?;
    }
    let name = match &payload.name {
        Some(name) => require_name(name, "name")?,
        None => old.name.clone(),
    };
    if category_id != old.category_id || !name.eq_ignore_ascii_case(&old.name) {
        ensure_product_name_free(&state.orm, category_id, &name, Some(id)).await?;
    }

    let mut active: products::ActiveModel = old.into();
    active.category_id = Set(category_id);
    active.name = Set(name);
    if let Some(description) = payload.description {
        active.description = Set(clean_text(Some(description)));
    }
    active.user_updt = Set(Some(actor));
    let product = active.update(&state.orm).await?;

    tracing::info!(id, actor, "product updated");
    Ok(ApiResponse::success("Product updated", product.into(), Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    soft_delete_row::<Products>(state, user, id, "Product").await
}

pub async fn restore_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Product>> {
    let actor = user.actor()?;
    let deleted = repository::find_deleted_by_id::<Products, _>(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Deleted product"))?;
    ensure_active::<Categories, _>(&state.orm, deleted.category_id, "Category").await?;
    let restored = restore_row::<Products>(state, actor, deleted.id, "product").await?;
    Ok(ApiResponse::success("Product restored", restored.into(), Some(Meta::empty())))
}

async fn ensure_product_name_free<C: ConnectionTrait>(
    conn: &C,
    category_id: i32,
    name: &str,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    let scope = Condition::all().add(products::Column::CategoryId.eq(category_id));
    if name_taken::<Products, _>(conn, products::Column::Name, name, scope, exclude_id).await? {
        return Err(AppError::Conflict(format!(
            "product '{name}' already exists in this category"
        )));
    }
    Ok(())
}

// Locations

pub async fn list_locations(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<LocationList>> {
    let finder = repository::find_active::<Locations>().order_by_asc(locations::Column::Name);
    let (rows, meta) = paginate::<_, locations::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Location::from).collect();
    Ok(ApiResponse::success("Locations", LocationList { items }, Some(meta)))
}

pub async fn list_deleted_locations(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<LocationList>> {
    let finder =
        repository::find_deleted::<Locations>().order_by_desc(locations::Column::DeletedAt);
    let (rows, meta) = paginate::<_, locations::Model, _>(&state.orm, finder, &pagination).await?;
    let items = rows.into_iter().map(Location::from).collect();
    Ok(ApiResponse::success("Deleted locations", LocationList { items }, Some(meta)))
}

pub async fn get_location(state: &AppState, id: i32) -> AppResult<ApiResponse<Location>> {
    let location = ensure_active::<Locations, _>(&state.orm, id, "Location").await?;
    Ok(ApiResponse::success("Location found", location.into(), Some(Meta::empty())))
}

pub async fn create_location(
    state: &AppState,
    user: &AuthUser,
    payload: CreateLocationRequest,
) -> AppResult<ApiResponse<Location>> {
    let actor = user.actor()?;
    let name = require_name(&payload.name, "name")?;
    let kind = parse_location_kind(&payload.kind)?;
    ensure_location_name_free(&state.orm, &name, None).await?;

    let location = locations::ActiveModel {
        name: Set(name),
        address: Set(clean_text(payload.address)),
        phone_number: Set(clean_text(payload.phone_number)),
        kind: Set(kind),
        user_ins: Set(Some(actor)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(id = location.id, kind = %location.kind, actor, "location created");
    Ok(ApiResponse::created("Location created", location.into()))
}

pub async fn update_location(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateLocationRequest,
) -> AppResult<ApiResponse<Location>> {
    let actor = user.actor()?;
    let old = ensure_active::<Locations, _>(&state.orm, id, "Location").await?;

    let mut active: locations::ActiveModel = old.clone().into();
    if let Some(name) = &payload.name {
        let name = require_name(name, "name")?;
        if !name.eq_ignore_ascii_case(&old.name) {
            ensure_location_name_free(&state.orm, &name, Some(id)).await?;
        }
        active.name = Set(name);
    }
    if let Some(kind) = &payload.kind {
        active.kind = Set(parse_location_kind(kind)?);
    }
    if let Some(address) = payload.address {
        active.address = Set(clean_text(Some(address)));
    }
    if let Some(phone_number) = payload.phone_number {
        active.phone_number = Set(clean_text(Some(phone_number)));
    }
    active.user_updt = Set(Some(actor));
    let location = active.update(&state.orm).await?;

    tracing::info!(id, actor, "location updated");
    Ok(ApiResponse::success("Location updated", location.into(), Some(Meta::empty())))
}

pub async fn delete_location(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    soft_delete_row::<Locations>(state, user, id, "Location").await
}

pub async fn restore_location(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Location>> {
    let actor = user.actor()?;
    let restored = restore_row::<Locations>(state, actor, id, "location").await?;
    Ok(ApiResponse::success("Location restored", restored.into(), Some(Meta::empty())))
}

async fn ensure_location_name_free<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    exclude_id: Option<i32>,
) -> AppResult<()> {
    if name_taken::<Locations, _>(conn, locations::Column::Name, name, Condition::all(), exclude_id)
        .await?
    {
        return Err(AppError::Conflict(format!("location '{name}' already exists")));
    }
    Ok(())
}

pub(crate) fn parse_location_kind(raw: &str) -> AppResult<String> {
    let kind = raw.trim().to_lowercase();
    if LOCATION_KINDS.contains(&kind.as_str()) {
        Ok(kind)
    } else {
        Err(AppError::BadRequest(format!(
            "kind must be one of: {}",
            LOCATION_KINDS.join(", ")
        )))
    }
}

// Shared soft-delete protocol

async fn soft_delete_row<E>(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    label: &str,
) -> AppResult<ApiResponse<Deleted>>
where
    E: Audited,
{
    let actor = user.actor()?;
    if !repository::soft_delete::<E, _>(&state.orm, id, actor).await? {
        return Err(AppError::not_found(label));
    }
    tracing::info!(id, actor, entity = label, "soft deleted");
    Ok(ApiResponse::success(
        format!("{label} deleted"),
        Deleted { id },
        Some(Meta::empty()),
    ))
}

async fn restore_row<E>(state: &AppState, actor: i32, id: i32, label: &str) -> AppResult<E::Model>
where
    E: Audited,
{
    if !repository::restore::<E, _>(&state.orm, id, actor).await? {
        return Err(AppError::NotFound(format!("Deleted {label} not found")));
    }
    tracing::info!(id, actor, entity = label, "restored");
    repository::find_active_by_id::<E, _>(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{label} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_kind_is_normalized() {
        assert_eq!(parse_location_kind(" Warehouse ").unwrap(), "warehouse");
        assert_eq!(parse_location_kind("reseller").unwrap(), "reseller");
        assert!(parse_location_kind("shop").is_err());
    }
}
