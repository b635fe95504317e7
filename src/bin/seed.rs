use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use warehouse_ledger_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        batch::CreateProductBatchRequest,
        catalog::{CreateBrandRequest, CreateCategoryRequest, CreateLocationRequest, CreateProductRequest},
        stock::{CreateProductStockRequest, StockMovementRequest},
        unit::CreateProductUnitRequest,
    },
    entity::{Brands, Users, users},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::{
        auth_service::ROLE_ADMIN, batch_service, catalog_service, item_service, stock_service,
        unit_service,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let state = AppState::new(orm, config);

    let admin_id = ensure_admin(&state, "admin@example.com", "admin12345").await?;
    let admin = AuthUser {
        user_id: admin_id,
        role: ROLE_ADMIN.to_string(),
    };

    if Brands::find().count(&state.orm).await? > 0 {
        println!("Catalog already seeded, skipping");
        return Ok(());
    }
    seed_catalog(&state, &admin).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(state: &AppState, email: &str, password: &str) -> anyhow::Result<i32> {
    if let Some(existing) = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(&state.orm)
        .await?
    {
        return Ok(existing.id);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let user = users::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        role: Set(ROLE_ADMIN.to_string()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    println!("Ensured user {email} (role={ROLE_ADMIN})");
    Ok(user.id)
}

fn data<T>(resp: ApiResponse<T>) -> anyhow::Result<T> {
    resp.data
        .ok_or_else(|| anyhow::anyhow!("{} returned no data", resp.message))
}

async fn seed_catalog(state: &AppState, admin: &AuthUser) -> anyhow::Result<()> {
    let brand = data(
        catalog_service::create_brand(
            state,
            admin,
            CreateBrandRequest {
                name: "Ferris Foods".into(),
                description: Some("House brand".into()),
            },
        )
        .await?,
    )?;
    let category = data(
        catalog_service::create_category(
            state,
            admin,
            CreateCategoryRequest {
                brand_id: brand.id,
                name: "Beverages".into(),
                description: None,
            },
        )
        .await?,
    )?;
    let warehouse = data(
        catalog_service::create_location(
            state,
            admin,
            CreateLocationRequest {
                name: "Central Warehouse".into(),
                address: Some("Jl. Gudang 1".into()),
                phone_number: None,
                kind: "warehouse".into(),
            },
        )
        .await?,
    )?;

    let products = [
        ("Crab Cola 330ml", 4500.0, "2027-06-30", 240.0, "8990000000011"),
        ("Async Tea 500ml", 6000.0, "2027-03-31", 120.0, "8990000000028"),
    ];

    for (name, unit_price, exp_date, opening, barcode) in products {
        let product = data(
            catalog_service::create_product(
                state,
                admin,
                CreateProductRequest {
                    category_id: category.id,
                    name: name.into(),
                    description: None,
                },
            )
            .await?,
        )?;
        let batch = data(
            batch_service::create_batch(
                state,
                admin,
                CreateProductBatchRequest {
                    product_id: product.id,
                    code_batch: None,
                    unit_price: Some(unit_price),
                    exp_date: exp_date.into(),
                    description: Some("Seed batch".into()),
                },
            )
            .await?,
        )?;
        let stock = data(
            stock_service::create_stock(
                state,
                admin,
                CreateProductStockRequest {
                    product_batch_id: batch.id,
                    product_id: product.id,
                    location_id: warehouse.id,
                    quantity: None,
                },
            )
            .await?,
        )?;
        item_service::process_stock_movement(
            state,
            admin,
            stock.id,
            StockMovementRequest {
                stock_in: Some(opening),
                stock_out: None,
                description: Some("Opening balance".into()),
            },
        )
        .await?;
        unit_service::create_unit(
            state,
            admin,
            CreateProductUnitRequest {
                product_id: product.id,
                location_id: warehouse.id,
                product_batch_id: Some(batch.id),
                name: Some("Pcs".into()),
                quantity: Some(1.0),
                unit_price: Some(unit_price),
                unit_price_retail: Some(unit_price * 1.2),
                barcode: Some(barcode.into()),
                description: None,
            },
        )
        .await?;
        println!("Seeded {name} with {opening} on hand");
    }

    Ok(())
}
