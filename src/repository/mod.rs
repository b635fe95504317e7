//! Persistence helpers shared by every service: the soft-delete protocol,
//! row locking and the joined read models.

pub mod details;

use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbBackend, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QuerySelect, Select,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, Func, LockType},
};

use crate::{entity, response::Meta, routes::params::Pagination};

/// Entities carrying the audit-trail columns.
pub trait Audited: EntityTrait {
    fn id_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn user_updt_column() -> Self::Column;
}

macro_rules! audited {
    ($($module:ident),+ $(,)?) => {
        $(
            impl Audited for entity::$module::Entity {
                fn id_column() -> Self::Column {
                    entity::$module::Column::Id
                }
                fn deleted_at_column() -> Self::Column {
                    entity::$module::Column::DeletedAt
                }
                fn updated_at_column() -> Self::Column {
                    entity::$module::Column::UpdatedAt
                }
                fn user_updt_column() -> Self::Column {
                    entity::$module::Column::UserUpdt
                }
            }
        )+
    };
}

audited!(
    users,
    brands,
    categories,
    products,
    locations,
    product_batches,
    product_stocks,
    product_items,
    product_units,
    product_batch_tracks,
    product_stock_tracks,
    product_item_tracks,
    product_unit_tracks,
);

pub fn find_active<E: Audited>() -> Select<E> {
    E::find().filter(E::deleted_at_column().is_null())
}

pub fn find_deleted<E: Audited>() -> Select<E> {
    E::find().filter(E::deleted_at_column().is_not_null())
}

pub async fn find_active_by_id<E, C>(conn: &C, id: i32) -> Result<Option<E::Model>, DbErr>
where
    E: Audited,
    C: ConnectionTrait,
{
    find_active::<E>().filter(E::id_column().eq(id)).one(conn).await
}

/// Active row read under `SELECT ... FOR UPDATE` where the backend supports row locks.
pub async fn lock_active_by_id<E, C>(conn: &C, id: i32) -> Result<Option<E::Model>, DbErr>
where
    E: Audited,
    C: ConnectionTrait,
{
    let finder = find_active::<E>().filter(E::id_column().eq(id));
    for_update(finder, conn).one(conn).await
}

pub async fn find_deleted_by_id<E, C>(conn: &C, id: i32) -> Result<Option<E::Model>, DbErr>
where
    E: Audited,
    C: ConnectionTrait,
{
    find_deleted::<E>().filter(E::id_column().eq(id)).one(conn).await
}

pub fn for_update<E: EntityTrait, C: ConnectionTrait>(select: Select<E>, conn: &C) -> Select<E> {
    match conn.get_database_backend() {
        DbBackend::Sqlite => select,
        _ => select.lock(LockType::Update),
    }
}

/// Stamps the actor and marks the row deleted in one statement.
/// Returns `false` when no active row matched.
pub async fn soft_delete<E, C>(conn: &C, id: i32, actor: i32) -> Result<bool, DbErr>
where
    E: Audited,
    C: ConnectionTrait,
{
    let now: DateTimeWithTimeZone = Utc::now().into();
    let result = E::update_many()
        .col_expr(E::deleted_at_column(), Expr::value(now))
        .col_expr(E::updated_at_column(), Expr::value(now))
        .col_expr(E::user_updt_column(), Expr::value(actor))
        .filter(E::id_column().eq(id))
        .filter(E::deleted_at_column().is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Clears the delete marker of a soft-deleted row. Returns `false` when none matched.
pub async fn restore<E, C>(conn: &C, id: i32, actor: i32) -> Result<bool, DbErr>
where
    E: Audited,
    C: ConnectionTrait,
{
    let now: DateTimeWithTimeZone = Utc::now().into();
    let result = E::update_many()
        .col_expr(
            E::deleted_at_column(),
            Expr::value(Option::<DateTimeWithTimeZone>::None),
        )
        .col_expr(E::updated_at_column(), Expr::value(now))
        .col_expr(E::user_updt_column(), Expr::value(actor))
        .filter(E::id_column().eq(id))
        .filter(E::deleted_at_column().is_not_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Case-insensitive name lookup over active and soft-deleted rows within `scope`.
pub async fn name_taken<E, C>(
    conn: &C,
    name_column: E::Column,
    name: &str,
    scope: Condition,
    exclude_id: Option<i32>,
) -> Result<bool, DbErr>
where
    E: Audited,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let lowered = Expr::expr(Func::lower(Expr::col((E::default(), name_column))))
        .eq(name.trim().to_lowercase());
    let mut finder = E::find().filter(lowered).filter(scope);
    if let Some(id) = exclude_id {
        finder = finder.filter(E::id_column().ne(id));
    }
    Ok(finder.count(conn).await? > 0)
}

pub async fn paginate<E, M, C>(
    conn: &C,
    select: Select<E>,
    pagination: &Pagination,
) -> Result<(Vec<M>, Meta), DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
    M: FromQueryResult + Send + Sync,
    C: ConnectionTrait,
{
    let (page, limit, offset) = pagination.normalize();
    let total = select.clone().count(conn).await? as i64;
    let items = select
        .limit(limit as u64)
        .offset(offset as u64)
        .into_model::<M>()
        .all(conn)
        .await?;
    Ok((items, Meta::new(page, limit, total)))
}
