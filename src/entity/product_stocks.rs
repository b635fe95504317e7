use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_stocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_batch_id: i32,
    pub product_id: i32,
    pub location_id: i32,
    #[sea_orm(column_type = "Double")]
    pub quantity: f64,
    /// Bumped on every quantity-affecting write.
    pub version: i32,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_delete = "Restrict"
    )]
    Location,
    #[sea_orm(has_many = "super::product_items::Entity")]
    ProductItems,
    #[sea_orm(has_many = "super::product_stock_tracks::Entity")]
    Tracks,
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

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::product_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductItems.def()
    }
}

impl Related<super::product_stock_tracks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tracks.def()
    }
}

stamp_timestamps!();
