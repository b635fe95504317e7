use chrono::{DateTime, FixedOffset};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductUnitRequest {
    pub product_id: i32,
    pub location_id: i32,
    pub product_batch_id: Option<i32>,
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub unit_price_retail: Option<f64>,
    pub barcode: Option<String>,
    pub description: Option<String>,
}

/// Absent fields are left unchanged; an empty string clears a text field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductUnitRequest {
    pub product_id: Option<i32>,
    pub location_id: Option<i32>,
    pub product_batch_id: Option<i32>,
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub unit_price_retail: Option<f64>,
    pub barcode: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ProductUnitDetail {
    pub id: i32,
    pub product_id: i32,
    pub location_id: i32,
    pub product_batch_id: Option<i32>,
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub unit_price_retail: Option<f64>,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub deleted_at: Option<DateTime<FixedOffset>>,
    pub product_name: Option<String>,
    pub location_name: Option<String>,
    pub batch_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductUnitList {
    pub items: Vec<ProductUnitDetail>,
}
