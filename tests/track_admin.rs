mod common;

use common::{admin, create_user, data, seed_stock, setup_state};
use warehouse_ledger_api::{
    dto::{stock::StockMovementRequest, track::UpdateTrackRequest},
    entity::track_kind::Operation,
    error::AppError,
    routes::params::Pagination,
    services::{auth_service::ROLE_STAFF, item_service, stock_service, track_service},
};

#[tokio::test]
async fn track_corrections_are_admin_only() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let staff = create_user(&state, "staff@example.com", ROLE_STAFF).await?;
    let fx = seed_stock(&state, &admin, 10.0).await?;

    let tracks = data(
        track_service::list_stock_tracks_by_stock(&state, fx.stock_id, Pagination::default())
            .await?,
    );
    let track_id = tracks.items[0].id;

    let err = track_service::delete_stock_track(&state, &staff, track_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = track_service::update_stock_track(
        &state,
        &admin,
        track_id,
        UpdateTrackRequest {
            operation: Some(Operation::In),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let corrected = data(
        track_service::update_stock_track(
            &state,
            &admin,
            track_id,
            UpdateTrackRequest {
                description: Some("Opening count".into()),
                ..Default::default()
            },
        )
        .await?,
    );
    assert_eq!(corrected.description, "Opening count");
    assert_eq!(corrected.user_updt, Some(admin.user_id));

    track_service::delete_stock_track(&state, &admin, track_id).await?;
    let err = track_service::get_stock_track(&state, track_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn track_counts_only_grow_under_normal_operation() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 10.0).await?;

    let count = || async {
        let list = track_service::list_stock_tracks_by_stock(
            &state,
            fx.stock_id,
            Pagination::new(1, 100),
        )
        .await?;
        Ok::<_, AppError>(data(list).items.len())
    };

    let mut last = count().await?;
    assert_eq!(last, 1);
    for qty in [2.0, 3.0] {
        item_service::process_stock_movement(
            &state,
            &user,
            fx.stock_id,
            StockMovementRequest {
                stock_in: Some(qty),
                ..Default::default()
            },
        )
        .await?;
        let now = count().await?;
        assert_eq!(now, last + 1);
        last = now;
    }

    stock_service::delete_stock(&state, &user, fx.stock_id).await?;
    stock_service::restore_stock(&state, &user, fx.stock_id).await?;
    assert_eq!(count().await?, last + 2);

    let report = data(stock_service::reconcile_stock(&state, fx.stock_id).await?);
    assert!(report.consistent);
    Ok(())
}

#[tokio::test]
async fn unknown_operation_filter_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let err = track_service::list_item_tracks_by_operation(&state, "Sideways", Pagination::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let none = data(
        track_service::list_item_tracks_by_operation(&state, "In", Pagination::default()).await?,
    );
    assert!(none.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn value_report_weights_quantity_by_batch_price() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    item_service::process_stock_movement(
        &state,
        &user,
        fx.stock_id,
        StockMovementRequest {
            stock_in: Some(4.0),
            ..Default::default()
        },
    )
    .await?;

    let report = data(track_service::item_value_report(&state).await?);
    let row = report
        .items
        .iter()
        .find(|r| r.product_id == fx.product_id)
        .expect("product row");
    assert_eq!(row.transactions, 1);
    assert_eq!(row.total_value, Some(400.0));
    Ok(())
}

#[tokio::test]
async fn deleting_an_item_cancels_its_value() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let item = data(
        item_service::process_stock_movement(
            &state,
            &user,
            fx.stock_id,
            StockMovementRequest {
                stock_in: Some(4.0),
                ..Default::default()
            },
        )
        .await?,
    );
    item_service::delete_item(&state, &user, item.id).await?;

    let report = data(track_service::item_value_report(&state).await?);
    let row = report
        .items
        .iter()
        .find(|r| r.product_id == fx.product_id)
        .expect("product row");
    assert_eq!(row.transactions, 2);
    assert_eq!(row.total_value, Some(0.0));
    Ok(())
}
