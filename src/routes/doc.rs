use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, UserList},
        batch::{
            CreateProductBatchRequest, ProductBatchDetail, ProductBatchList,
            UpdateProductBatchRequest,
        },
        catalog::{
            BrandList, CategoryList, CreateBrandRequest, CreateCategoryRequest,
            CreateLocationRequest, CreateProductRequest, LocationList, ProductList,
            UpdateBrandRequest, UpdateCategoryRequest, UpdateLocationRequest, UpdateProductRequest,
        },
        item::{
            CreateProductItemRequest, ProductItemDetail, ProductItemList, ProductItemSummary,
            ProductItemSummaryList, UpdateProductItemRequest,
        },
        stock::{
            CreateProductStockRequest, ProductStockDetail, ProductStockList, StockMovementRequest,
            StockReconciliation, UpdateProductStockRequest,
        },
        track::{
            BatchTrackDetail, BatchTrackList, ItemTrackDetail, ItemTrackList, ItemValueReport,
            ItemValueReportList, StockTrackDetail, StockTrackList, UnitTrackDetail, UnitTrackList,
            UpdateTrackRequest,
        },
        unit::{
            CreateProductUnitRequest, ProductUnitDetail, ProductUnitList, UpdateProductUnitRequest,
        },
    },
    entity::track_kind::{Operation, TrackAction},
    models::{Brand, Category, Location, Product, User},
    response::{ApiResponse, Deleted, Meta},
    routes::{
        auth, batches, brands, categories, health, items, locations, params, products, stocks,
        tracks, units, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        users::list_users,
        users::list_deleted_users,
        users::get_user,
        users::delete_user,
        users::restore_user,
        brands::list_brands,
        brands::list_deleted_brands,
        brands::get_brand,
        brands::create_brand,
        brands::update_brand,
        brands::delete_brand,
        brands::restore_brand,
        categories::list_categories,
        categories::list_deleted_categories,
        categories::get_category,
        categories::list_category_products,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        categories::restore_category,
        products::list_products,
        products::list_deleted_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::restore_product,
        products::list_product_batches,
        products::list_product_stocks,
        products::list_product_units,
        products::list_product_items,
        locations::list_locations,
        locations::list_deleted_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        locations::restore_location,
        locations::list_location_stocks,
        batches::list_batches,
        batches::list_deleted_batches,
        batches::get_batch,
        batches::create_batch,
        batches::update_batch,
        batches::delete_batch,
        batches::restore_batch,
        stocks::list_stocks,
        stocks::list_deleted_stocks,
        stocks::get_stock,
        stocks::create_stock,
        stocks::update_stock,
        stocks::delete_stock,
        stocks::restore_stock,
        stocks::record_movement,
        stocks::reconcile_stock,
        stocks::list_stock_items,
        items::list_items,
        items::list_deleted_items,
        items::summary_by_product,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::restore_item,
        units::list_units,
        units::list_deleted_units,
        units::get_unit_by_barcode,
        units::get_unit,
        units::create_unit,
        units::update_unit,
        units::delete_unit,
        units::restore_unit,
        tracks::list_batch_tracks,
        tracks::get_batch_track,
        tracks::list_batch_tracks_by_batch,
        tracks::list_batch_tracks_by_product,
        tracks::delete_batch_track,
        tracks::list_unit_tracks,
        tracks::get_unit_track,
        tracks::list_unit_tracks_by_unit,
        tracks::list_unit_tracks_by_product,
        tracks::delete_unit_track,
        tracks::list_stock_tracks,
        tracks::get_stock_track,
        tracks::list_stock_tracks_by_stock,
        tracks::list_stock_tracks_by_product,
        tracks::list_stock_tracks_by_date,
        tracks::update_stock_track,
        tracks::delete_stock_track,
        tracks::list_item_tracks,
        tracks::get_item_track,
        tracks::list_item_tracks_by_item,
        tracks::list_item_tracks_by_stock,
        tracks::list_item_tracks_by_product,
        tracks::list_item_tracks_by_date,
        tracks::list_item_tracks_by_operation,
        tracks::item_value_report,
        tracks::update_item_track,
        tracks::delete_item_track
    ),
    components(
        schemas(
            User,
            Brand,
            Category,
            Product,
            Location,
            TrackAction,
            Operation,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserList,
            CreateBrandRequest,
            UpdateBrandRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateProductRequest,
            UpdateProductRequest,
            CreateLocationRequest,
            UpdateLocationRequest,
            BrandList,
            CategoryList,
            ProductList,
            LocationList,
            CreateProductBatchRequest,
            UpdateProductBatchRequest,
            ProductBatchDetail,
            ProductBatchList,
            CreateProductStockRequest,
            UpdateProductStockRequest,
            StockMovementRequest,
            ProductStockDetail,
            ProductStockList,
            StockReconciliation,
            CreateProductItemRequest,
            UpdateProductItemRequest,
            ProductItemDetail,
            ProductItemList,
            ProductItemSummary,
            ProductItemSummaryList,
            CreateProductUnitRequest,
            UpdateProductUnitRequest,
            ProductUnitDetail,
            ProductUnitList,
            BatchTrackDetail,
            BatchTrackList,
            StockTrackDetail,
            StockTrackList,
            ItemTrackDetail,
            ItemTrackList,
            UnitTrackDetail,
            UnitTrackList,
            UpdateTrackRequest,
            ItemValueReport,
            ItemValueReportList,
            params::Pagination,
            Deleted,
            Meta,
            ApiResponse<Deleted>,
            ApiResponse<ProductStockDetail>,
            ApiResponse<ProductItemDetail>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Account administration endpoints"),
        (name = "Brands", description = "Brand endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Locations", description = "Warehouse and reseller location endpoints"),
        (name = "Product batches", description = "Batch ledger endpoints"),
        (name = "Product stocks", description = "Stock ledger endpoints"),
        (name = "Product items", description = "Stock movement endpoints"),
        (name = "Product units", description = "Sellable unit endpoints"),
        (name = "Tracks", description = "Audit track endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
