use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_stock_id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub stock_in: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub stock_out: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub quantity: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Signed quantity this item contributes to its stock.
    pub fn signed_quantity(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }
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
    #[sea_orm(has_many = "super::product_item_tracks::Entity")]
    Tracks,
}

impl Related<super::product_stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductStock.def()
    }
}

impl Related<super::product_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductBatch.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::product_item_tracks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tracks.def()
    }
}

stamp_timestamps!();
