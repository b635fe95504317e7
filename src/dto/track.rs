use chrono::{DateTime, FixedOffset};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::track_kind::{Operation, TrackAction};

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct BatchTrackDetail {
    pub id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    pub action: TrackAction,
    pub operation: Operation,
    pub quantity: f64,
    pub stock: f64,
    pub description: String,
    pub date: DateTime<FixedOffset>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub product_name: Option<String>,
    pub batch_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct StockTrackDetail {
    pub id: i32,
    pub product_stock_id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    pub action: TrackAction,
    pub operation: Operation,
    pub quantity: f64,
    pub stock: f64,
    pub description: String,
    pub date: DateTime<FixedOffset>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub product_name: Option<String>,
    pub batch_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ItemTrackDetail {
    pub id: i32,
    pub product_item_id: i32,
    pub product_stock_id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    pub action: TrackAction,
    pub operation: Operation,
    pub quantity: f64,
    pub stock: f64,
    pub unit_price: Option<f64>,
    pub description: String,
    pub date: DateTime<FixedOffset>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub product_name: Option<String>,
    pub batch_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct UnitTrackDetail {
    pub id: i32,
    pub product_unit_id: i32,
    pub product_id: i32,
    pub action: TrackAction,
    pub operation: Operation,
    pub quantity: f64,
    pub stock: f64,
    pub description: String,
    pub date: DateTime<FixedOffset>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub product_name: Option<String>,
    pub unit_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchTrackList {
    pub items: Vec<BatchTrackDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockTrackList {
    pub items: Vec<StockTrackDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemTrackList {
    pub items: Vec<ItemTrackDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnitTrackList {
    pub items: Vec<UnitTrackDetail>,
}

/// Admin correction of a movement track.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTrackRequest {
    pub quantity: Option<f64>,
    pub operation: Option<Operation>,
    pub stock: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// `YYYY-MM-DD`, inclusive.
    pub start_date: String,
    /// `YYYY-MM-DD`, inclusive.
    pub end_date: String,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OperationQuery {
    /// `Plus`, `Minus`, `In` or `Out`.
    pub operation: String,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ItemValueReport {
    pub product_id: i32,
    pub product_name: Option<String>,
    pub total_value: Option<f64>,
    pub transactions: i64,
    pub average_unit_price: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemValueReportList {
    pub items: Vec<ItemValueReport>,
}
