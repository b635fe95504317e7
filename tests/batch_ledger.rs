mod common;

use common::{admin, data, seed_stock, setup_state};
use sea_orm::EntityTrait;
use warehouse_ledger_api::{
    dto::batch::UpdateProductBatchRequest,
    entity::{ProductBatches, track_kind::TrackAction},
    error::AppError,
    routes::params::Pagination,
    services::{batch_service, catalog_service, track_service},
};

#[tokio::test]
async fn batch_lifecycle_writes_one_track_per_mutation() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let tracks = data(
        track_service::list_batch_tracks_by_batch(&state, fx.batch_id, Pagination::default())
            .await?,
    );
    assert_eq!(tracks.items.len(), 1);
    let created = &tracks.items[0];
    assert_eq!(created.action, TrackAction::Created);
    assert!(created.description.contains("Product batch created"));
    assert!(created.description.contains("exp_date: 2025-12-31"));

    batch_service::update_batch(
        &state,
        &user,
        fx.batch_id,
        UpdateProductBatchRequest {
            unit_price: Some(120.0),
            ..Default::default()
        },
    )
    .await?;

    let tracks = data(
        track_service::list_batch_tracks_by_batch(&state, fx.batch_id, Pagination::default())
            .await?,
    );
    assert_eq!(tracks.items.len(), 2);
    assert!(
        tracks.items[1]
            .description
            .contains("changed unit price from 100.00 to 120.00")
    );

    batch_service::delete_batch(&state, &user, fx.batch_id).await?;
    let err = batch_service::get_batch(&state, fx.batch_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let deleted = data(batch_service::list_deleted_batches(&state, Pagination::default()).await?);
    assert!(deleted.items.iter().any(|b| b.id == fx.batch_id));

    batch_service::restore_batch(&state, &user, fx.batch_id).await?;
    let restored = data(batch_service::get_batch(&state, fx.batch_id).await?);
    assert_eq!(restored.unit_price, Some(120.0));

    let tracks = data(
        track_service::list_batch_tracks_by_batch(&state, fx.batch_id, Pagination::default())
            .await?,
    );
    let actions: Vec<TrackAction> = tracks.items.iter().map(|t| t.action).collect();
    assert_eq!(
        actions,
        vec![
            TrackAction::Created,
            TrackAction::Updated,
            TrackAction::Deleted,
            TrackAction::Restored
        ]
    );
    Ok(())
}

#[tokio::test]
async fn update_description_names_only_changed_fields() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    batch_service::update_batch(
        &state,
        &user,
        fx.batch_id,
        UpdateProductBatchRequest {
            unit_price: Some(12.5),
            code_batch: Some("B-001".into()),
            ..Default::default()
        },
    )
    .await?;

    let tracks = data(
        track_service::list_batch_tracks_by_batch(&state, fx.batch_id, Pagination::default())
            .await?,
    );
    let description = &tracks.items[1].description;
    assert!(description.contains("changed unit price from 100.00 to 12.50"));
    assert!(!description.contains("code batch"));
    assert!(!description.contains("expiry date"));
    Ok(())
}

#[tokio::test]
async fn delete_then_restore_returns_the_same_row() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let before = ProductBatches::find_by_id(fx.batch_id)
        .one(&state.orm)
        .await?
        .expect("batch exists");

    batch_service::delete_batch(&state, &user, fx.batch_id).await?;
    let deleted = ProductBatches::find_by_id(fx.batch_id)
        .one(&state.orm)
        .await?
        .expect("soft-deleted row is kept");
    assert!(deleted.deleted_at.is_some());

    batch_service::restore_batch(&state, &user, fx.batch_id).await?;
    let mut after = ProductBatches::find_by_id(fx.batch_id)
        .one(&state.orm)
        .await?
        .expect("batch exists");
    assert!(after.deleted_at.is_none());

    after.updated_at = before.updated_at;
    after.user_updt = before.user_updt;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn malformed_expiry_date_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    let err = batch_service::update_batch(
        &state,
        &user,
        fx.batch_id,
        UpdateProductBatchRequest {
            exp_date: Some("31/12/2025".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn sub_cent_price_change_is_described() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    batch_service::update_batch(
        &state,
        &user,
        fx.batch_id,
        UpdateProductBatchRequest {
            unit_price: Some(100.004),
            ..Default::default()
        },
    )
    .await?;

    let tracks = data(
        track_service::list_batch_tracks_by_batch(&state, fx.batch_id, Pagination::default())
            .await?,
    );
    let description = &tracks.items[1].description;
    assert!(description.contains("changed unit price from 100.00 to 100.004"));
    assert!(!description.contains("no field changes detected"));
    Ok(())
}

#[tokio::test]
async fn huge_page_number_returns_an_empty_page() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    seed_stock(&state, &user, 0.0).await?;

    let resp = batch_service::list_batches(&state, Pagination::new(i64::MAX, 100)).await?;
    assert!(data(resp).items.is_empty());
    Ok(())
}

#[tokio::test]
async fn batch_restore_needs_an_active_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = admin(&state).await?;
    let fx = seed_stock(&state, &user, 0.0).await?;

    batch_service::delete_batch(&state, &user, fx.batch_id).await?;
    catalog_service::delete_product(&state, &user, fx.product_id).await?;

    let err = batch_service::restore_batch(&state, &user, fx.batch_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    catalog_service::restore_product(&state, &user, fx.product_id).await?;
    batch_service::restore_batch(&state, &user, fx.batch_id).await?;
    assert!(batch_service::get_batch(&state, fx.batch_id).await.is_ok());
    Ok(())
}
