use sea_orm_migration::prelude::*;

use super::{create_entity_table, drop_entity_table};
use crate::entity::{
    ProductBatchTracks, ProductItemTracks, ProductStockTracks, ProductUnitTracks,
    product_item_tracks, product_stock_tracks,
};

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250101_000003_create_track_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_entity_table(manager, ProductBatchTracks).await?;
        create_entity_table(manager, ProductStockTracks).await?;
        create_entity_table(manager, ProductItemTracks).await?;
        create_entity_table(manager, ProductUnitTracks).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_stock_tracks_date")
                    .table(ProductStockTracks)
                    .col(product_stock_tracks::Column::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_item_tracks_date")
                    .table(ProductItemTracks)
                    .col(product_item_tracks::Column::Date)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity_table(manager, ProductUnitTracks).await?;
        drop_entity_table(manager, ProductItemTracks).await?;
        drop_entity_table(manager, ProductStockTracks).await?;
        drop_entity_table(manager, ProductBatchTracks).await?;
        Ok(())
    }
}
