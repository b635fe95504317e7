use chrono::{DateTime, FixedOffset};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductStockRequest {
    pub product_batch_id: i32,
    pub product_id: i32,
    pub location_id: i32,
    pub quantity: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductStockRequest {
    pub product_batch_id: Option<i32>,
    pub product_id: Option<i32>,
    pub location_id: Option<i32>,
    pub quantity: Option<f64>,
    /// Expected current version; the update fails with 409 when it differs.
    pub version: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StockMovementRequest {
    pub stock_in: Option<f64>,
    pub stock_out: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ProductStockDetail {
    pub id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    pub location_id: i32,
    pub quantity: f64,
    pub version: i32,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub deleted_at: Option<DateTime<FixedOffset>>,
    pub batch_code: Option<String>,
    pub product_name: Option<String>,
    pub location_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductStockList {
    pub items: Vec<ProductStockDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockReconciliation {
    pub product_stock_id: i32,
    pub quantity: f64,
    /// Level implied by the stock's track history.
    pub tracked_quantity: f64,
    pub difference: f64,
    pub consistent: bool,
    pub track_count: u64,
}
