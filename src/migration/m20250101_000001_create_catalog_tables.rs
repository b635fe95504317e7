use sea_orm_migration::prelude::*;

use super::{create_entity_table, drop_entity_table};
use crate::entity::{Brands, Categories, Locations, Products, Users};

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250101_000001_create_catalog_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_entity_table(manager, Users).await?;
        create_entity_table(manager, Brands).await?;
        create_entity_table(manager, Categories).await?;
        create_entity_table(manager, Products).await?;
        create_entity_table(manager, Locations).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity_table(manager, Locations).await?;
        drop_entity_table(manager, Products).await?;
        drop_entity_table(manager, Categories).await?;
        drop_entity_table(manager, Brands).await?;
        drop_entity_table(manager, Users).await?;
        Ok(())
    }
}
