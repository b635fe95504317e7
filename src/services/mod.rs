pub mod auth_service;
pub mod batch_service;
pub mod catalog_service;
pub mod item_service;
pub mod stock_service;
pub mod track_service;
pub mod unit_service;
pub mod user_service;

use sea_orm::ConnectionTrait;

use crate::{
    error::{AppError, AppResult},
    repository::{Audited, find_active_by_id},
};

pub(crate) fn require_id(id: i32, field: &str) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(value: Option<f64>, field: &str) -> AppResult<()> {
    match value {
        Some(v) if !v.is_finite() => Err(AppError::BadRequest(format!("{field} must be a number"))),
        Some(v) if v < 0.0 => Err(AppError::BadRequest(format!("{field} cannot be negative"))),
        _ => Ok(()),
    }
}

pub(crate) fn require_name(name: &str, field: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(name.to_string())
}

/// Trims, and maps blank input to `None`.
pub(crate) fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fetches an active row or fails with a 404 naming `label`.
pub(crate) async fn ensure_active<E, C>(conn: &C, id: i32, label: &str) -> AppResult<E::Model>
where
    E: Audited,
    C: ConnectionTrait,
{
    find_active_by_id::<E, C>(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_drops_blank_values() {
        assert_eq!(clean_text(Some("  B-01 ".into())), Some("B-01".into()));
        assert_eq!(clean_text(Some("   ".into())), None);
        assert_eq!(clean_text(None), None);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(require_non_negative(Some(-0.5), "quantity").is_err());
        assert!(require_non_negative(Some(0.0), "quantity").is_ok());
        assert!(require_non_negative(None, "quantity").is_ok());
        assert!(require_id(0, "product_id").is_err());
    }
}
