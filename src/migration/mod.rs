use sea_orm_migration::prelude::*;

mod m20250101_000001_create_catalog_tables;
mod m20250101_000002_create_ledger_tables;
mod m20250101_000003_create_track_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_catalog_tables::Migration),
            Box::new(m20250101_000002_create_ledger_tables::Migration),
            Box::new(m20250101_000003_create_track_tables::Migration),
        ]
    }
}

/// Create a table (and the indexes declared on it) straight from its entity definition.
pub(crate) async fn create_entity_table<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let schema = sea_orm::Schema::new(manager.get_database_backend());
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await?;
    for mut index in schema.create_index_from_entity(entity) {
        manager.create_index(index.if_not_exists().to_owned()).await?;
    }
    Ok(())
}

pub(crate) async fn drop_entity_table<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}
