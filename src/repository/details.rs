//! Joined read models: a ledger or track row plus the names of what it points at.

use sea_orm::{EntityTrait, JoinType, QuerySelect, RelationTrait, Select};

use crate::entity::{
    ProductBatchTracks, ProductBatches, ProductItemTracks, ProductItems, ProductStockTracks,
    ProductStocks, ProductUnitTracks, ProductUnits, brands, categories, locations,
    product_batch_tracks, product_batches, product_item_tracks, product_items,
    product_stock_tracks, product_stocks, product_unit_tracks, product_units, products,
};

pub fn batch_details() -> Select<ProductBatches> {
    ProductBatches::find()
        .column_as(products::Column::Name, "product_name")
        .column_as(categories::Column::Name, "category_name")
        .column_as(brands::Column::Name, "brand_name")
        .join(JoinType::LeftJoin, product_batches::Relation::Product.def())
        .join(JoinType::LeftJoin, products::Relation::Category.def())
        .join(JoinType::LeftJoin, categories::Relation::Brand.def())
}

pub fn stock_details() -> Select<ProductStocks> {
    ProductStocks::find()
        .column_as(product_batches::Column::CodeBatch, "batch_code")
        .column_as(products::Column::Name, "product_name")
        .column_as(locations::Column::Name, "location_name")
        .join(JoinType::LeftJoin, product_stocks::Relation::ProductBatch.def())
        .join(JoinType::LeftJoin, product_stocks::Relation::Product.def())
        .join(JoinType::LeftJoin, product_stocks::Relation::Location.def())
}

pub fn item_details() -> Select<ProductItems> {
    ProductItems::find()
        .column_as(product_batches::Column::CodeBatch, "batch_code")
        .column_as(products::Column::Name, "product_name")
        .column_as(locations::Column::Name, "location_name")
        .join(JoinType::LeftJoin, product_items::Relation::ProductBatch.def())
        .join(JoinType::LeftJoin, product_items::Relation::Product.def())
        .join(JoinType::LeftJoin, product_items::Relation::ProductStock.def())
        .join(JoinType::LeftJoin, product_stocks::Relation::Location.def())
}

pub fn unit_details() -> Select<ProductUnits> {
    ProductUnits::find()
        .column_as(products::Column::Name, "product_name")
        .column_as(locations::Column::Name, "location_name")
        .column_as(product_batches::Column::CodeBatch, "batch_code")
        .join(JoinType::LeftJoin, product_units::Relation::Product.def())
        .join(JoinType::LeftJoin, product_units::Relation::Location.def())
        .join(JoinType::LeftJoin, product_units::Relation::ProductBatch.def())
}

pub fn batch_track_details() -> Select<ProductBatchTracks> {
    ProductBatchTracks::find()
        .column_as(products::Column::Name, "product_name")
        .column_as(product_batches::Column::CodeBatch, "batch_code")
        .join(JoinType::LeftJoin, product_batch_tracks::Relation::Product.def())
        .join(JoinType::LeftJoin, product_batch_tracks::Relation::ProductBatch.def())
}

pub fn stock_track_details() -> Select<ProductStockTracks> {
    ProductStockTracks::find()
        .column_as(products::Column::Name, "product_name")
        .column_as(product_batches::Column::CodeBatch, "batch_code")
        .join(JoinType::LeftJoin, product_stock_tracks::Relation::Product.def())
        .join(JoinType::LeftJoin, product_stock_tracks::Relation::ProductBatch.def())
}

pub fn item_track_details() -> Select<ProductItemTracks> {
    ProductItemTracks::find()
        .column_as(products::Column::Name, "product_name")
        .column_as(product_batches::Column::CodeBatch, "batch_code")
        .join(JoinType::LeftJoin, product_item_tracks::Relation::Product.def())
        .join(JoinType::LeftJoin, product_item_tracks::Relation::ProductBatch.def())
}

pub fn unit_track_details() -> Select<ProductUnitTracks> {
    ProductUnitTracks::find()
        .column_as(products::Column::Name, "product_name")
        .column_as(product_units::Column::Name, "unit_name")
        .join(JoinType::LeftJoin, product_unit_tracks::Relation::Product.def())
        .join(JoinType::LeftJoin, product_unit_tracks::Relation::ProductUnit.def())
}
