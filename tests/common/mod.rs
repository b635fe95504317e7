#![allow(dead_code)]

use std::time::Duration;

use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use sea_orm_migration::MigratorTrait;
use warehouse_ledger_api::{
    config::AppConfig,
    dto::{
        batch::CreateProductBatchRequest,
        catalog::{CreateBrandRequest, CreateCategoryRequest, CreateLocationRequest, CreateProductRequest},
        stock::CreateProductStockRequest,
    },
    entity::users,
    middleware::auth::AuthUser,
    migration::Migrator,
    response::ApiResponse,
    services::{auth_service, batch_service, catalog_service, stock_service},
    state::AppState,
};

pub const JWT_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_ttl_hours: 1,
    }
}

/// Fresh in-memory database with every migration applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    let orm = Database::connect(opt).await?;
    Migrator::up(&orm, None).await?;
    Ok(AppState::new(orm, test_config()))
}

pub async fn create_user(state: &AppState, email: &str, role: &str) -> anyhow::Result<AuthUser> {
    let user = users::ActiveModel {
        email: Set(email.into()),
        password_hash: Set("not-a-real-hash".into()),
        role: Set(role.into()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn admin(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, "admin@example.com", auth_service::ROLE_ADMIN).await
}

pub fn data<T>(resp: ApiResponse<T>) -> T {
    resp.data.expect("response carries data")
}

/// Ids of one product with a batch and a stock at a warehouse.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub category_id: i32,
    pub product_id: i32,
    pub location_id: i32,
    pub batch_id: i32,
    pub stock_id: i32,
}

pub async fn seed_product(
    state: &AppState,
    user: &AuthUser,
    category_id: i32,
    name: &str,
) -> anyhow::Result<i32> {
    let product = data(
        catalog_service::create_product(
            state,
            user,
            CreateProductRequest {
                category_id,
                name: name.into(),
                description: None,
            },
        )
        .await?,
    );
    Ok(product.id)
}

pub async fn seed_stock(
    state: &AppState,
    user: &AuthUser,
    quantity: f64,
) -> anyhow::Result<Fixture> {
    let brand = data(
        catalog_service::create_brand(
            state,
            user,
            CreateBrandRequest {
                name: "Acme".into(),
                description: None,
            },
        )
        .await?,
    );
    let category = data(
        catalog_service::create_category(
            state,
            user,
            CreateCategoryRequest {
                brand_id: brand.id,
                name: "Snacks".into(),
                description: None,
            },
        )
        .await?,
    );
    let product_id = seed_product(state, user, category.id, "Chips").await?;
    let location = data(
        catalog_service::create_location(
            state,
            user,
            CreateLocationRequest {
                name: "Main Warehouse".into(),
                address: None,
                phone_number: None,
                kind: "warehouse".into(),
            },
        )
        .await?,
    );
    let batch = data(
        batch_service::create_batch(
            state,
            user,
            CreateProductBatchRequest {
                product_id,
                code_batch: Some("B-001".into()),
                unit_price: Some(100.0),
                exp_date: "2025-12-31".into(),
                description: None,
            },
        )
        .await?,
    );
    let stock = data(
        stock_service::create_stock(
            state,
            user,
            CreateProductStockRequest {
                product_batch_id: batch.id,
                product_id,
                location_id: location.id,
                quantity: Some(quantity),
            },
        )
        .await?,
    );
    Ok(Fixture {
        category_id: category.id,
        product_id,
        location_id: location.id,
        batch_id: batch.id,
        stock_id: stock.id,
    })
}
