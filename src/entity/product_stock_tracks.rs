use sea_orm::entity::prelude::*;

use super::track_kind::{Operation, TrackAction};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_stock_tracks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub product_stock_id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    pub action: TrackAction,
    pub operation: Operation,
    #[sea_orm(column_type = "Double")]
    pub quantity: f64,
    #[sea_orm(column_type = "Double")]
    pub stock: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub date: DateTimeWithTimeZone,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_stocks::Entity",
        from = "Column::ProductStockId",
        to = "super::product_stocks::Column::Id",
        on_delete = "Restrict"
    )]
    ProductStock,
    #[sea_orm(
        belongs_to = "super::product_batches::Entity",
        from = "Column::ProductBatchId",
        to = "super::product_batches::Column::Id",
        on_delete = "Restrict"
    )]
    ProductBatch,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Restrict"
    )]
    Product,
}

impl Related<super::product_stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductStock.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

stamp_timestamps!();
