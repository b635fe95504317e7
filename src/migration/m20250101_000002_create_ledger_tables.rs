use sea_orm_migration::prelude::*;

use super::{create_entity_table, drop_entity_table};
use crate::entity::{ProductBatches, ProductItems, ProductStocks, ProductUnits, product_stocks};

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250101_000002_create_ledger_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_entity_table(manager, ProductBatches).await?;
        create_entity_table(manager, ProductStocks).await?;
        create_entity_table(manager, ProductItems).await?;
        create_entity_table(manager, ProductUnits).await?;

        // Lookup path for the (batch, product, location) uniqueness check.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_stocks_triple")
                    .table(ProductStocks)
                    .col(product_stocks::Column::ProductBatchId)
                    .col(product_stocks::Column::ProductId)
                    .col(product_stocks::Column::LocationId)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity_table(manager, ProductUnits).await?;
        drop_entity_table(manager, ProductItems).await?;
        drop_entity_table(manager, ProductStocks).await?;
        drop_entity_table(manager, ProductBatches).await?;
        Ok(())
    }
}
