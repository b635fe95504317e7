use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityName, EntityTrait};

use super::{
    Ledger, Movement, TrackEntry, TrackSink,
    describe::{self, Patch},
};
use crate::entity::track_kind::TrackAction;

type TrackEntity<L> = <<L as Ledger>::Track as ActiveModelTrait>::Entity;

/// Track writes share the caller's connection so that they commit or roll back with the ledger write.
pub async fn record_create<L, C>(
    conn: &C,
    entity: &L,
    movement: Movement,
    actor: i32,
) -> Result<(), DbErr>
where
    L: Ledger,
    C: ConnectionTrait,
{
    let description = describe::create_description(entity);
    write(conn, entity, TrackAction::Created, movement, description, actor).await
}

/// `old` is the pre-update snapshot; the anchor is taken from `new`.
pub async fn record_update<L, P, C>(
    conn: &C,
    patch: &P,
    old: &L,
    new: &L,
    movement: Movement,
    actor: i32,
) -> Result<(), DbErr>
where
    L: Ledger,
    P: Patch,
    C: ConnectionTrait,
{
    let description = describe::update_description(patch, old);
    write(conn, new, TrackAction::Updated, movement, description, actor).await
}

pub async fn record_delete<L, C>(
    conn: &C,
    entity: &L,
    movement: Movement,
    actor: i32,
) -> Result<(), DbErr>
where
    L: Ledger,
    C: ConnectionTrait,
{
    let description = describe::delete_description(entity);
    write(conn, entity, TrackAction::Deleted, movement, description, actor).await
}

pub async fn record_restore<L, C>(
    conn: &C,
    entity: &L,
    movement: Movement,
    actor: i32,
) -> Result<(), DbErr>
where
    L: Ledger,
    C: ConnectionTrait,
{
    let description = describe::restore_description(entity);
    write(conn, entity, TrackAction::Restored, movement, description, actor).await
}

/// Physical movement caused by another ledger row (e.g. an item moving its stock).
pub async fn record_movement<L, C>(
    conn: &C,
    entity: &L,
    movement: Movement,
    description: String,
    actor: i32,
) -> Result<(), DbErr>
where
    L: Ledger,
    C: ConnectionTrait,
{
    write(conn, entity, TrackAction::Moved, movement, description, actor).await
}

async fn write<L, C>(
    conn: &C,
    entity: &L,
    action: TrackAction,
    movement: Movement,
    description: String,
    actor: i32,
) -> Result<(), DbErr>
where
    L: Ledger,
    C: ConnectionTrait,
{
    let entry = TrackEntry {
        anchor: entity.anchor(),
        action,
        movement,
        description,
        actor,
        at: Utc::now().into(),
    };
    let row = L::Track::from_entry(&entry);
    <TrackEntity<L> as EntityTrait>::insert(row).exec(conn).await?;

    let table = <TrackEntity<L> as Default>::default();
    tracing::debug!(
        table = table.table_name(),
        parent_id = entry.anchor.parent_id,
        action = %entry.action,
        operation = %entry.movement.operation,
        "track recorded"
    );
    Ok(())
}
