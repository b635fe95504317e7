use chrono::{DateTime, FixedOffset};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::track_kind::Operation;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductItemRequest {
    pub product_stock_id: i32,
    /// Must match the stock's batch when given.
    pub product_batch_id: Option<i32>,
    /// Must match the stock's product when given.
    pub product_id: Option<i32>,
    pub stock_in: Option<f64>,
    pub stock_out: Option<f64>,
    pub quantity: Option<f64>,
    pub description: Option<String>,
    /// Overrides the inferred `In`/`Out` on the item track.
    pub operation: Option<Operation>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductItemRequest {
    pub stock_in: Option<f64>,
    pub stock_out: Option<f64>,
    pub quantity: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ProductItemDetail {
    pub id: i32,
    pub product_stock_id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    pub stock_in: Option<f64>,
    pub stock_out: Option<f64>,
    pub quantity: Option<f64>,
    pub description: Option<String>,
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
pub struct ProductItemList {
    pub items: Vec<ProductItemDetail>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ProductItemSummary {
    pub product_id: i32,
    pub product_name: Option<String>,
    pub total_stock_in: Option<f64>,
    pub total_stock_out: Option<f64>,
    pub total_quantity: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductItemSummaryList {
    pub items: Vec<ProductItemSummary>,
}
