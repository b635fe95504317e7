//! Ledger entities, their track families and the glue that keeps them in step.

pub mod describe;
pub mod families;
pub mod tracker;

use sea_orm::{ActiveModelTrait, prelude::DateTimeWithTimeZone};

use crate::entity::track_kind::{Operation, TrackAction};
use describe::Describe;

/// Chain of ids a track row denormalizes from its parent.
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    pub parent_id: i32,
    pub product_id: i32,
    pub product_batch_id: Option<i32>,
    pub product_stock_id: Option<i32>,
}

/// Movement carried by a track row: the delta and the resulting level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub operation: Operation,
    pub quantity: f64,
    pub stock: f64,
    pub unit_price: Option<f64>,
}

impl Movement {
    pub fn new(operation: Operation, quantity: f64, stock: f64) -> Self {
        Self {
            operation,
            quantity: quantity.abs(),
            stock,
            unit_price: None,
        }
    }

    pub fn priced(mut self, unit_price: Option<f64>) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// A record that moves nothing.
    pub fn none(stock: f64) -> Self {
        Self::new(Operation::Plus, 0.0, stock)
    }

    /// Ledger-level adjustment from `before` to `after`.
    pub fn adjustment(before: f64, after: f64) -> Self {
        let delta = after - before;
        Self::new(Operation::adjustment_for(delta), delta, after)
    }
}

/// Everything a track family needs to build one history row.
#[derive(Debug, Clone)]
pub struct TrackEntry {
    pub anchor: Anchor,
    pub action: TrackAction,
    pub movement: Movement,
    pub description: String,
    pub actor: i32,
    pub at: DateTimeWithTimeZone,
}

/// A track table that can persist a [`TrackEntry`].
pub trait TrackSink: ActiveModelTrait + Send {
    fn from_entry(entry: &TrackEntry) -> Self;
}

/// A current-state row with its own track family.
pub trait Ledger: Describe {
    type Track: TrackSink;

    fn anchor(&self) -> Anchor;
}
