use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod batches;
pub mod brands;
pub mod categories;
pub mod doc;
pub mod health;
pub mod items;
pub mod locations;
pub mod params;
pub mod products;
pub mod stocks;
pub mod tracks;
pub mod units;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/brands", brands::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/locations", locations::router())
        .nest("/product-batches", batches::router())
        .nest("/product-stocks", stocks::router())
        .nest("/product-items", items::router())
        .nest("/product-units", units::router())
        .nest("/product-batch-tracks", tracks::batch_router())
        .nest("/product-stock-tracks", tracks::stock_router())
        .nest("/product-item-tracks", tracks::item_router())
        .nest("/product-unit-tracks", tracks::unit_router())
}
