use chrono::NaiveDate;
use sea_orm::ActiveValue::{NotSet, Set};

use super::{
    Anchor, Ledger, TrackEntry, TrackSink,
    describe::{Describe, Field, FieldValue, Patch},
};
use crate::{
    dto::{
        batch::UpdateProductBatchRequest, stock::UpdateProductStockRequest,
        unit::UpdateProductUnitRequest,
    },
    entity::{
        product_batch_tracks, product_batches, product_item_tracks, product_items,
        product_stock_tracks, product_stocks, product_unit_tracks, product_units,
    },
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn patched_text(value: &Option<String>) -> Option<FieldValue> {
    value.as_deref().map(|v| FieldValue::text(Some(v)))
}

// Product batch

impl Describe for product_batches::Model {
    const SUBJECT: &'static str = "Product batch";

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::value("product_id", "product"),
            Field::value("code_batch", "code batch"),
            Field::value("unit_price", "unit price"),
            Field::value("exp_date", "expiry date"),
            Field::presence("description", "description"),
        ];
        FIELDS
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "product_id" => FieldValue::Id(self.product_id),
            "code_batch" => FieldValue::text(self.code_batch.as_deref()),
            "unit_price" => FieldValue::amount(self.unit_price),
            "exp_date" => FieldValue::Date(self.exp_date),
            "description" => FieldValue::text(self.description.as_deref()),
            _ => FieldValue::Null,
        }
    }

    fn delete_note(&self) -> Option<String> {
        self.code_batch
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(|code| format!("code: {code}"))
    }
}

impl Ledger for product_batches::Model {
    type Track = product_batch_tracks::ActiveModel;

    fn anchor(&self) -> Anchor {
        Anchor {
            parent_id: self.id,
            product_id: self.product_id,
            product_batch_id: Some(self.id),
            product_stock_id: None,
        }
    }
}

impl Patch for UpdateProductBatchRequest {
    fn value(&self, key: &str) -> Option<FieldValue> {
        match key {
            "product_id" => self.product_id.map(FieldValue::Id),
            "code_batch" => patched_text(&self.code_batch),
            "unit_price" => self.unit_price.map(FieldValue::Amount),
            "exp_date" => self
                .exp_date
                .as_deref()
                .and_then(parse_date)
                .map(FieldValue::Date),
            "description" => patched_text(&self.description),
            _ => None,
        }
    }
}

impl TrackSink for product_batch_tracks::ActiveModel {
    fn from_entry(entry: &TrackEntry) -> Self {
        Self {
            id: NotSet,
            product_batch_id: Set(entry.anchor.parent_id),
            product_id: Set(entry.anchor.product_id),
            action: Set(entry.action),
            operation: Set(entry.movement.operation),
            quantity: Set(entry.movement.quantity),
            stock: Set(entry.movement.stock),
            description: Set(entry.description.clone()),
            date: Set(entry.at),
            user_ins: Set(Some(entry.actor)),
            user_updt: Set(None),
            created_at: Set(entry.at),
            updated_at: Set(entry.at),
            deleted_at: Set(None),
        }
    }
}

// Product stock

impl Describe for product_stocks::Model {
    const SUBJECT: &'static str = "Product stock";

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::value("product_batch_id", "batch"),
            Field::value("product_id", "product"),
            Field::value("location_id", "location"),
            Field::value("quantity", "quantity"),
        ];
        FIELDS
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "product_batch_id" => FieldValue::Id(self.product_batch_id),
            "product_id" => FieldValue::Id(self.product_id),
            "location_id" => FieldValue::Id(self.location_id),
            "quantity" => FieldValue::Amount(self.quantity),
            _ => FieldValue::Null,
        }
    }

    fn delete_note(&self) -> Option<String> {
        Some(format!("quantity: {:.2}", self.quantity))
    }
}

impl Ledger for product_stocks::Model {
    type Track = product_stock_tracks::ActiveModel;

    fn anchor(&self) -> Anchor {
        Anchor {
            parent_id: self.id,
            product_id: self.product_id,
            product_batch_id: Some(self.product_batch_id),
            product_stock_id: Some(self.id),
        }
    }
}

impl Patch for UpdateProductStockRequest {
    fn value(&self, key: &str) -> Option<FieldValue> {
        match key {
            "product_batch_id" => self.product_batch_id.map(FieldValue::Id),
            "product_id" => self.product_id.map(FieldValue::Id),
            "location_id" => self.location_id.map(FieldValue::Id),
            "quantity" => self.quantity.map(FieldValue::Amount),
            _ => None,
        }
    }
}

impl TrackSink for product_stock_tracks::ActiveModel {
    fn from_entry(entry: &TrackEntry) -> Self {
        Self {
            id: NotSet,
            product_stock_id: Set(entry.anchor.parent_id),
            product_batch_id: Set(entry.anchor.product_batch_id.unwrap_or_default()),
            product_id: Set(entry.anchor.product_id),
            action: Set(entry.action),
            operation: Set(entry.movement.operation),
            quantity: Set(entry.movement.quantity),
            stock: Set(entry.movement.stock),
            description: Set(entry.description.clone()),
            date: Set(entry.at),
            user_ins: Set(Some(entry.actor)),
            user_updt: Set(None),
            created_at: Set(entry.at),
            updated_at: Set(entry.at),
            deleted_at: Set(None),
        }
    }
}

// Product item

impl Describe for product_items::Model {
    const SUBJECT: &'static str = "Product item";

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::value("product_stock_id", "stock"),
            Field::value("stock_in", "stock in"),
            Field::value("stock_out", "stock out"),
            Field::value("quantity", "quantity"),
            Field::presence("description", "description"),
        ];
        FIELDS
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "product_stock_id" => FieldValue::Id(self.product_stock_id),
            "stock_in" => FieldValue::amount(self.stock_in),
            "stock_out" => FieldValue::amount(self.stock_out),
            "quantity" => FieldValue::amount(self.quantity),
            "description" => FieldValue::text(self.description.as_deref()),
            _ => FieldValue::Null,
        }
    }

    fn delete_note(&self) -> Option<String> {
        self.quantity.map(|q| format!("quantity: {q:.2}"))
    }
}

impl Ledger for product_items::Model {
    type Track = product_item_tracks::ActiveModel;

    fn anchor(&self) -> Anchor {
        Anchor {
            parent_id: self.id,
            product_id: self.product_id,
            product_batch_id: Some(self.product_batch_id),
            product_stock_id: Some(self.product_stock_id),
        }
    }
}

/// Resolved item update: exactly what gets persisted, so the diff matches the row.
#[derive(Debug, Default, Clone)]
pub struct ItemChanges {
    pub stock_in: Option<f64>,
    pub stock_out: Option<f64>,
    pub quantity: Option<f64>,
    pub description: Option<String>,
}

impl Patch for ItemChanges {
    fn value(&self, key: &str) -> Option<FieldValue> {
        match key {
            "stock_in" => self.stock_in.map(FieldValue::Amount),
            "stock_out" => self.stock_out.map(FieldValue::Amount),
            "quantity" => self.quantity.map(FieldValue::Amount),
            "description" => patched_text(&self.description),
            _ => None,
        }
    }
}

impl TrackSink for product_item_tracks::ActiveModel {
    fn from_entry(entry: &TrackEntry) -> Self {
        Self {
            id: NotSet,
            product_item_id: Set(entry.anchor.parent_id),
            product_stock_id: Set(entry.anchor.product_stock_id.unwrap_or_default()),
            product_batch_id: Set(entry.anchor.product_batch_id.unwrap_or_default()),
            product_id: Set(entry.anchor.product_id),
            action: Set(entry.action),
            operation: Set(entry.movement.operation),
            quantity: Set(entry.movement.quantity),
            stock: Set(entry.movement.stock),
            unit_price: Set(entry.movement.unit_price),
            description: Set(entry.description.clone()),
            date: Set(entry.at),
            user_ins: Set(Some(entry.actor)),
            user_updt: Set(None),
            created_at: Set(entry.at),
            updated_at: Set(entry.at),
            deleted_at: Set(None),
        }
    }
}

// Product unit

impl Describe for product_units::Model {
    const SUBJECT: &'static str = "Product unit";

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::value("product_id", "product"),
            Field::value("location_id", "location"),
            Field::value("product_batch_id", "batch"),
            Field::value("name", "name"),
            Field::value("quantity", "quantity"),
            Field::value("unit_price", "unit price"),
            Field::value("unit_price_retail", "retail unit price"),
            Field::value("barcode", "barcode"),
            Field::presence("description", "description"),
        ];
        FIELDS
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "product_id" => FieldValue::Id(self.product_id),
            "location_id" => FieldValue::Id(self.location_id),
            "product_batch_id" => FieldValue::id(self.product_batch_id),
            "name" => FieldValue::text(self.name.as_deref()),
            "quantity" => FieldValue::amount(self.quantity),
            "unit_price" => FieldValue::amount(self.unit_price),
            "unit_price_retail" => FieldValue::amount(self.unit_price_retail),
            "barcode" => FieldValue::text(self.barcode.as_deref()),
            "description" => FieldValue::text(self.description.as_deref()),
            _ => FieldValue::Null,
        }
    }

    fn delete_note(&self) -> Option<String> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("name: {name}"))
    }
}

impl Ledger for product_units::Model {
    type Track = product_unit_tracks::ActiveModel;

    fn anchor(&self) -> Anchor {
        Anchor {
            parent_id: self.id,
            product_id: self.product_id,
            product_batch_id: self.product_batch_id,
            product_stock_id: None,
        }
    }
}

impl Patch for UpdateProductUnitRequest {
    fn value(&self, key: &str) -> Option<FieldValue> {
        match key {
            "product_id" => self.product_id.map(FieldValue::Id),
            "location_id" => self.location_id.map(FieldValue::Id),
            "product_batch_id" => self.product_batch_id.map(FieldValue::Id),
            "name" => patched_text(&self.name),
            "quantity" => self.quantity.map(FieldValue::Amount),
            "unit_price" => self.unit_price.map(FieldValue::Amount),
            "unit_price_retail" => self.unit_price_retail.map(FieldValue::Amount),
            "barcode" => patched_text(&self.barcode),
            "description" => patched_text(&self.description),
            _ => None,
        }
    }
}

impl TrackSink for product_unit_tracks::ActiveModel {
    fn from_entry(entry: &TrackEntry) -> Self {
        Self {
            id: NotSet,
            product_unit_id: Set(entry.anchor.parent_id),
            product_id: Set(entry.anchor.product_id),
            action: Set(entry.action),
            operation: Set(entry.movement.operation),
            quantity: Set(entry.movement.quantity),
            stock: Set(entry.movement.stock),
            description: Set(entry.description.clone()),
            date: Set(entry.at),
            user_ins: Set(Some(entry.actor)),
            user_updt: Set(None),
            created_at: Set(entry.at),
            updated_at: Set(entry.at),
            deleted_at: Set(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::describe;

    fn stock(quantity: f64) -> product_stocks::Model {
        let now = chrono::Utc::now().into();
        product_stocks::Model {
            id: 7,
            product_batch_id: 3,
            product_id: 2,
            location_id: 1,
            quantity,
            version: 1,
            user_ins: Some(1),
            user_updt: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn stock_update_names_quantity_change() {
        let patch = UpdateProductStockRequest {
            quantity: Some(4.0),
            version: Some(1),
            ..Default::default()
        };
        assert_eq!(
            describe::update_description(&patch, &stock(10.0)),
            "Product stock updated: changed quantity from 10.00 to 4.00"
        );
    }

    #[test]
    fn stock_anchor_carries_batch_chain() {
        let anchor = stock(1.0).anchor();
        assert_eq!(anchor.parent_id, 7);
        assert_eq!(anchor.product_batch_id, Some(3));
        assert_eq!(anchor.product_stock_id, Some(7));
    }

    #[test]
    fn batch_patch_ignores_unparseable_date() {
        let patch = UpdateProductBatchRequest {
            exp_date: Some("31/12/2025".into()),
            ..Default::default()
        };
        assert_eq!(Patch::value(&patch, "exp_date"), None);
        assert_eq!(parse_date("2025-12-31"), NaiveDate::from_ymd_opt(2025, 12, 31));
    }
}
