/// Stamps `created_at` on insert and `updated_at` on every save.
macro_rules! stamp_timestamps {
    () => {
        #[async_trait::async_trait]
        impl ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
            where
                C: ConnectionTrait,
            {
                let now: DateTimeWithTimeZone = chrono::Utc::now().into();
                if insert && self.created_at.is_not_set() {
                    self.created_at = sea_orm::ActiveValue::Set(now);
                }
                self.updated_at = sea_orm::ActiveValue::Set(now);
                Ok(self)
            }
        }
    };
}

pub mod brands;
pub mod categories;
pub mod locations;
pub mod product_batch_tracks;
pub mod product_batches;
pub mod product_item_tracks;
pub mod product_items;
pub mod product_stock_tracks;
pub mod product_stocks;
pub mod product_unit_tracks;
pub mod product_units;
pub mod products;
pub mod track_kind;
pub mod users;

pub use brands::Entity as Brands;
pub use categories::Entity as Categories;
pub use locations::Entity as Locations;
pub use product_batch_tracks::Entity as ProductBatchTracks;
pub use product_batches::Entity as ProductBatches;
pub use product_item_tracks::Entity as ProductItemTracks;
pub use product_items::Entity as ProductItems;
pub use product_stock_tracks::Entity as ProductStockTracks;
pub use product_stocks::Entity as ProductStocks;
pub use product_unit_tracks::Entity as ProductUnitTracks;
pub use product_units::Entity as ProductUnits;
pub use products::Entity as Products;
pub use users::Entity as Users;
