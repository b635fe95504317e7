mod common;

use common::{admin, data, seed_product, seed_stock, setup_state};
use warehouse_ledger_api::{
    dto::{
        batch::CreateProductBatchRequest,
        item::{CreateProductItemRequest, UpdateProductItemRequest},
        stock::{CreateProductStockRequest, StockMovementRequest, UpdateProductStockRequest},
    },
    entity::track_kind::{Operation, TrackAction},
    error::AppError,
    routes::params::Pagination,
    services::{batch_service, catalog_service, item_service, stock_service, track_service},
};

#[tokio::test]
async fn negative_stock_quantity_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let err = stock_service::update_stock(
        &state,
        &user,
        fx.stock_id,
        UpdateProductStockRequest {
            quantity: Some(-1.0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let stock = data(stock_service::get_stock(&state, fx.stock_id).await?);
    assert_eq!(stock.quantity, 10.0);
    Ok(())
}

#[tokio::test]
async fn stale_version_is_a_conflict() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let current = data(stock_service::get_stock(&state, fx.stock_id).await?);
    let updated = data(
        stock_service::update_stock(
            &state,
            &user,
            fx.stock_id,
            UpdateProductStockRequest {
                quantity: Some(12.0),
                version: Some(current.version),
                ..Default::default()
            },
        )
        .await?,
    );
    assert_eq!(updated.version, current.version + 1);

    let err = stock_service::update_stock(
        &state,
        &user,
        fx.stock_id,
        UpdateProductStockRequest {
            quantity: Some(15.0),
            version: Some(current.version),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn items_with_both_directions_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let err = item_service::create_item(
        &state,
        &user,
        CreateProductItemRequest {
            product_stock_id: fx.stock_id,
            stock_in: Some(50.0),
            stock_out: Some(20.0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn movements_adjust_stock_and_refuse_overdraw() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let inbound = data(
        item_service::process_stock_movement(
            &state,
            &user,
            fx.stock_id,
            StockMovementRequest {
                stock_in: Some(5.0),
                ..Default::default()
            },
        )
        .await?,
    );
    assert_eq!(inbound.quantity, Some(5.0));

    let err = item_service::process_stock_movement(
        &state,
        &user,
        fx.stock_id,
        StockMovementRequest {
            stock_out: Some(100.0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert!(msg.starts_with("insufficient stock")),
        other => panic!("unexpected error: {other:?}"),
    }

    item_service::process_stock_movement(
        &state,
        &user,
        fx.stock_id,
        StockMovementRequest {
            stock_out: Some(3.0),
            ..Default::default()
        },
    )
    .await?;

    let stock = data(stock_service::get_stock(&state, fx.stock_id).await?);
    assert_eq!(stock.quantity, 12.0);

    let tracks = data(
        track_service::list_item_tracks_by_stock(&state, fx.stock_id, Pagination::default())
            .await?,
    );
    let operations: Vec<Operation> = tracks.items.iter().map(|t| t.operation).collect();
    assert_eq!(operations, vec![Operation::In, Operation::Out]);
    assert_eq!(tracks.items[1].stock, 12.0);
    Ok(())
}

#[tokio::test]
async fn deleting_an_item_reverts_its_movement() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let item = data(
        item_service::create_item(
            &state,
            &user,
            CreateProductItemRequest {
                product_stock_id: fx.stock_id,
                stock_out: Some(4.0),
                ..Default::default()
            },
        )
        .await?,
    );
    assert_eq!(
        data(stock_service::get_stock(&state, fx.stock_id).await?).quantity,
        6.0
    );

    item_service::update_item(
        &state,
        &user,
        item.id,
        UpdateProductItemRequest {
            stock_out: Some(6.0),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(
        data(stock_service::get_stock(&state, fx.stock_id).await?).quantity,
        4.0
    );

    item_service::delete_item(&state, &user, item.id).await?;
    assert_eq!(
        data(stock_service::get_stock(&state, fx.stock_id).await?).quantity,
        10.0
    );
    Ok(())
}

#[tokio::test]
async fn reconciliation_matches_the_track_history() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    item_service::process_stock_movement(
        &state,
        &user,
        fx.stock_id,
        StockMovementRequest {
            stock_in: Some(7.5),
            ..Default::default()
        },
    )
    .await?;
    stock_service::update_stock(
        &state,
        &user,
        fx.stock_id,
        UpdateProductStockRequest {
            quantity: Some(15.0),
            ..Default::default()
        },
    )
    .await?;

    let report = data(stock_service::reconcile_stock(&state, fx.stock_id).await?);
    assert_eq!(report.quantity, 15.0);
    assert_eq!(report.tracked_quantity, 15.0);
    assert!(report.consistent);
    assert_eq!(report.track_count, 3);

    let tracks = data(
        track_service::list_stock_tracks_by_stock(&state, fx.stock_id, Pagination::default())
            .await?,
    );
    let actions: Vec<TrackAction> = tracks.items.iter().map(|t| t.action).collect();
    assert_eq!(
        actions,
        vec![TrackAction::Created, TrackAction::Moved, TrackAction::Updated]
    );
    Ok(())
}

#[tokio::test]
async fn second_stock_for_the_same_triple_conflicts() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let err = stock_service::create_stock(
        &state,
        &user,
        CreateProductStockRequest {
            product_batch_id: fx.batch_id,
            product_id: fx.product_id,
            location_id: fx.location_id,
            quantity: Some(1.0),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn stock_batch_must_belong_to_the_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;
    let crackers = seed_product(&state, &user, fx.category_id, "Crackers").await?;
    let crackers_batch = data(
        batch_service::create_batch(
            &state,
            &user,
            CreateProductBatchRequest {
                product_id: crackers,
                code_batch: Some("C-001".into()),
                unit_price: Some(50.0),
                exp_date: "2026-06-30".into(),
                description: None,
            },
        )
        .await?,
    );

    let err = stock_service::create_stock(
        &state,
        &user,
        CreateProductStockRequest {
            product_batch_id: crackers_batch.id,
            product_id: fx.product_id,
            location_id: fx.location_id,
            quantity: Some(1.0),
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "product batch does not belong to the product"),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn item_update_moves_stock_and_tracks_both_sides() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let item = data(
        item_service::create_item(
            &state,
            &user,
            CreateProductItemRequest {
                product_stock_id: fx.stock_id,
                stock_in: Some(5.0),
                ..Default::default()
            },
        )
        .await?,
    );
    item_service::update_item(
        &state,
        &user,
        item.id,
        UpdateProductItemRequest {
            stock_in: Some(8.0),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(
        data(stock_service::get_stock(&state, fx.stock_id).await?).quantity,
        18.0
    );

    let item_tracks = data(
        track_service::list_item_tracks_by_item(&state, item.id, Pagination::default()).await?,
    );
    let actions: Vec<TrackAction> = item_tracks.items.iter().map(|t| t.action).collect();
    assert_eq!(actions, vec![TrackAction::Created, TrackAction::Updated]);
    assert_eq!(item_tracks.items[1].operation, Operation::In);
    assert_eq!(item_tracks.items[1].quantity, 3.0);
    assert_eq!(item_tracks.items[1].stock, 18.0);

    let stock_tracks = data(
        track_service::list_stock_tracks_by_stock(&state, fx.stock_id, Pagination::default())
            .await?,
    );
    let actions: Vec<TrackAction> = stock_tracks.items.iter().map(|t| t.action).collect();
    assert_eq!(
        actions,
        vec![TrackAction::Created, TrackAction::Moved, TrackAction::Moved]
    );
    assert_eq!(stock_tracks.items[2].operation, Operation::Plus);
    assert_eq!(stock_tracks.items[2].quantity, 3.0);
    assert_eq!(stock_tracks.items[2].stock, 18.0);
    Ok(())
}

#[tokio::test]
async fn explicit_quantity_cannot_contradict_the_direction() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let item = data(
        item_service::create_item(
            &state,
            &user,
            CreateProductItemRequest {
                product_stock_id: fx.stock_id,
                stock_in: Some(50.0),
                ..Default::default()
            },
        )
        .await?,
    );
    let updated = data(
        item_service::update_item(
            &state,
            &user,
            item.id,
            UpdateProductItemRequest {
                quantity: Some(10.0),
                ..Default::default()
            },
        )
        .await?,
    );
    assert_eq!(updated.stock_in, Some(50.0));
    assert_eq!(updated.quantity, Some(50.0));
    assert_eq!(
        data(stock_service::get_stock(&state, fx.stock_id).await?).quantity,
        50.0
    );
    Ok(())
}

#[tokio::test]
async fn stock_restore_needs_an_active_location() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    stock_service::delete_stock(&state, &user, fx.stock_id).await?;
    catalog_service::delete_location(&state, &user, fx.location_id).await?;

    let err = stock_service::restore_stock(&state, &user, fx.stock_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(stock_service::get_stock(&state, fx.stock_id).await.is_err());
    Ok(())
}
