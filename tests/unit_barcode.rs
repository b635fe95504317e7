mod common;

use common::{admin, data, seed_product, seed_stock, setup_state};
use warehouse_ledger_api::{
    dto::{
        catalog::CreateBrandRequest,
        unit::{CreateProductUnitRequest, UpdateProductUnitRequest},
    },
    error::AppError,
    routes::params::Pagination,
    services::{catalog_service, track_service, unit_service},
};

fn unit(product_id: i32, location_id: i32, name: &str, barcode: &str) -> CreateProductUnitRequest {
    CreateProductUnitRequest {
        product_id,
        location_id,
        name: Some(name.into()),
        quantity: Some(1.0),
        unit_price: Some(1500.0),
        unit_price_retail: Some(2000.0),
        barcode: Some(barcode.into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn barcode_owned_by_another_product_conflicts() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;
    let other_product = seed_product(&state, &user, fx.category_id, "Crackers").await?;

    unit_service::create_unit(&state, &user, unit(fx.product_id, fx.location_id, "Pcs", "899001"))
        .await?;

    let err = unit_service::create_unit(
        &state,
        &user,
        unit(other_product, fx.location_id, "Box", "899001"),
    )
    .await
    .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, "barcode belongs to another product"),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn same_barcode_is_shared_across_names_of_one_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    unit_service::create_unit(&state, &user, unit(fx.product_id, fx.location_id, "Pcs", "899002"))
        .await?;
    let pack = data(
        unit_service::create_unit(
            &state,
            &user,
            unit(fx.product_id, fx.location_id, "Pack", "899002"),
        )
        .await?,
    );
    assert_eq!(pack.barcode.as_deref(), Some("899002"));

    let err = unit_service::create_unit(
        &state,
        &user,
        unit(fx.product_id, fx.location_id, "pack", "899003"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn lookup_by_barcode_ignores_deleted_units() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let created = data(
        unit_service::create_unit(
            &state,
            &user,
            unit(fx.product_id, fx.location_id, "Pcs", "899004"),
        )
        .await?,
    );
    let found = data(unit_service::get_unit_by_barcode(&state, " 899004 ").await?);
    assert_eq!(found.id, created.id);

    unit_service::delete_unit(&state, &user, created.id).await?;
    let err = unit_service::get_unit_by_barcode(&state, "899004")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    unit_service::restore_unit(&state, &user, created.id).await?;
    assert!(unit_service::get_unit_by_barcode(&state, "899004").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn unit_updates_are_tracked() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let created = data(
        unit_service::create_unit(
            &state,
            &user,
            unit(fx.product_id, fx.location_id, "Pcs", "899005"),
        )
        .await?,
    );
    unit_service::update_unit(
        &state,
        &user,
        created.id,
        UpdateProductUnitRequest {
            unit_price_retail: Some(2500.0),
            ..Default::default()
        },
    )
    .await?;

    let tracks = data(
        track_service::list_unit_tracks_by_unit(&state, created.id, Pagination::default())
            .await?,
    );
    assert_eq!(tracks.items.len(), 2);
    assert!(tracks.items[1].description.contains("2500.00"));
    assert!(!tracks.items[1].description.contains("barcode"));
    Ok(())
}

#[tokio::test]
async fn negative_unit_amounts_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let mut request = unit(fx.product_id, fx.location_id, "Pcs", "899006");
    request.unit_price = Some(-1.0);
    let err = unit_service::create_unit(&state, &user, request)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn unit_names_stay_reserved_after_delete() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let pcs = data(
        unit_service::create_unit(
            &state,
            &user,
            unit(fx.product_id, fx.location_id, "Pcs", "899010"),
        )
        .await?,
    );
    unit_service::delete_unit(&state, &user, pcs.id).await?;

    let err = unit_service::create_unit(
        &state,
        &user,
        unit(fx.product_id, fx.location_id, "PCS", "899011"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn catalog_names_are_unique_ignoring_case_and_deletion() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let err = seed_product(&state, &user, fx.category_id, "chips").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Conflict(_))
    ));

    let brand = data(
        catalog_service::create_brand(
            &state,
            &user,
            CreateBrandRequest {
                name: "Globex".into(),
                description: None,
            },
        )
        .await?,
    );
    catalog_service::delete_brand(&state, &user, brand.id).await?;
    let err = catalog_service::create_brand(
        &state,
        &user,
        CreateBrandRequest {
            name: " GLOBEX ".into(),
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}
