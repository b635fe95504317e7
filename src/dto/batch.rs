use chrono::{DateTime, FixedOffset, NaiveDate};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductBatchRequest {
    pub product_id: i32,
    pub code_batch: Option<String>,
    pub unit_price: Option<f64>,
    /// `YYYY-MM-DD`.
    pub exp_date: String,
    pub description: Option<String>,
}

/// Absent fields are left unchanged; an empty string clears a text field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductBatchRequest {
    pub product_id: Option<i32>,
    pub code_batch: Option<String>,
    pub unit_price: Option<f64>,
    pub exp_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ProductBatchDetail {
    pub id: i32,
    pub product_id: i32,
    pub code_batch: Option<String>,
    pub unit_price: Option<f64>,
    pub exp_date: NaiveDate,
    pub description: Option<String>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub deleted_at: Option<DateTime<FixedOffset>>,
    pub product_name: Option<String>,
    pub category_name: Option<String>,
    pub brand_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductBatchList {
    pub items: Vec<ProductBatchDetail>,
}
