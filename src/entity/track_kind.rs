use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle event a track row records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum TrackAction {
    #[sea_orm(string_value = "CREATED")]
    Created,
    #[sea_orm(string_value = "UPDATED")]
    Updated,
    #[sea_orm(string_value = "DELETED")]
    Deleted,
    #[sea_orm(string_value = "RESTORED")]
    Restored,
    #[sea_orm(string_value = "MOVED")]
    Moved,
}

impl TrackAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackAction::Created => "CREATED",
            TrackAction::Updated => "UPDATED",
            TrackAction::Deleted => "DELETED",
            TrackAction::Restored => "RESTORED",
            TrackAction::Moved => "MOVED",
        }
    }
}

impl std::fmt::Display for TrackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement kind. `Plus`/`Minus` adjust a ledger level, `In`/`Out` are physical movements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Operation {
    #[sea_orm(string_value = "Plus")]
    Plus,
    #[sea_orm(string_value = "Minus")]
    Minus,
    #[sea_orm(string_value = "In")]
    In,
    #[sea_orm(string_value = "Out")]
    Out,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Plus => "Plus",
            Operation::Minus => "Minus",
            Operation::In => "In",
            Operation::Out => "Out",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Plus" => Some(Operation::Plus),
            "Minus" => Some(Operation::Minus),
            "In" => Some(Operation::In),
            "Out" => Some(Operation::Out),
            _ => None,
        }
    }

    /// Sign applied to a quantity when folding movements into a level.
    pub fn sign(&self) -> f64 {
        match self {
            Operation::Plus | Operation::In => 1.0,
            Operation::Minus | Operation::Out => -1.0,
        }
    }

    pub fn is_ledger_adjustment(&self) -> bool {
        matches!(self, Operation::Plus | Operation::Minus)
    }

    /// Ledger-level counterpart for a signed delta.
    pub fn adjustment_for(delta: f64) -> Self {
        if delta < 0.0 { Operation::Minus } else { Operation::Plus }
    }

    /// Movement counterpart for a signed delta.
    pub fn movement_for(delta: f64) -> Self {
        if delta < 0.0 { Operation::Out } else { Operation::In }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
