use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    pub name: String,
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
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::product_batches::Entity")]
    ProductBatches,
    #[sea_orm(has_many = "super::product_stocks::Entity")]
    ProductStocks,
    #[sea_orm(has_many = "super::product_units::Entity")]
    ProductUnits,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductBatches.def()
    }
}

impl Related<super::product_stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductStocks.def()
    }
}

impl Related<super::product_units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductUnits.def()
    }
}

stamp_timestamps!();
