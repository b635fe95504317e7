use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub code_batch: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub unit_price: Option<f64>,
    pub exp_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub user_ins: Option<i32>,
    pub user_updt: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Restrict"
    )]
    Product,
    #[sea_orm(has_many = "super::product_stocks::Entity")]
    ProductStocks,
    #[sea_orm(has_many = "super::product_batch_tracks::Entity")]
    Tracks,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::product_stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductStocks.def()
    }
}

impl Related<super::product_batch_tracks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tracks.def()
    }
}

stamp_timestamps!();
