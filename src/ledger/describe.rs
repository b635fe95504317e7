//! Human-readable change sentences for track rows.
//!
//! Every ledger entity publishes a list of known fields. Create and delete
//! sentences are rendered from a snapshot; update sentences diff a typed patch
//! against the pre-update snapshot, field by field, so that only the fields the
//! patch actually changes are mentioned.

use chrono::NaiveDate;
use std::fmt;

/// A single field value as it appears in a description.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Id(i32),
    Text(String),
    Amount(f64),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => FieldValue::Text(v.trim().to_string()),
            _ => FieldValue::Null,
        }
    }

    pub fn amount(value: Option<f64>) -> Self {
        value.map(FieldValue::Amount).unwrap_or(FieldValue::Null)
    }

    pub fn id(value: Option<i32>) -> Self {
        value.map(FieldValue::Id).unwrap_or(FieldValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }


    /// Rendering used inside "changed X from A to B" clauses.
    fn for_change(&self) -> String {
        match self {
            FieldValue::Id(id) => format!("ID {id}"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("-"),
            FieldValue::Id(id) => write!(f, "{id}"),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Amount(amount) => {
                // Two decimals unless that would hide part of the value.
                let short = format!("{amount:.2}");
                if short.parse::<f64>().ok() == Some(*amount) {
                    f.write_str(&short)
                } else {
                    write!(f, "{amount}")
                }
            }
            FieldValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// How a field shows up in an update sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// Old and new values are quoted.
    Value,
    /// Only presence is reported ("updated description"); used for free text.
    Presence,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub style: FieldStyle,
}

impl Field {
    pub const fn value(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            style: FieldStyle::Value,
        }
    }

    pub const fn presence(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            style: FieldStyle::Presence,
        }
    }
}

/// Snapshot side of the diff.
pub trait Describe {
    /// Sentence subject, e.g. "Product batch".
    const SUBJECT: &'static str;

    fn fields() -> &'static [Field];

    fn value(&self, key: &str) -> FieldValue;

    /// Extra context appended to the delete sentence.
    fn delete_note(&self) -> Option<String> {
        None
    }
}

/// Patch side of the diff. `None` means the field is left unchanged.
pub trait Patch {
    fn value(&self, key: &str) -> Option<FieldValue>;
}

pub fn create_description<D: Describe>(entity: &D) -> String {
    let parts: Vec<String> = D::fields()
        .iter()
        .filter(|field| field.style == FieldStyle::Value)
        .filter_map(|field| {
            let value = entity.value(field.key);
            (!value.is_null()).then(|| format!("{}: {}", field.key, value))
        })
        .collect();
    if parts.is_empty() {
        format!("{} created", D::SUBJECT)
    } else {
        format!("{} created: {}", D::SUBJECT, parts.join(", "))
    }
}

pub fn update_description<D: Describe, P: Patch>(patch: &P, old: &D) -> String {
    let clauses = change_clauses(patch, old);
    if clauses.is_empty() {
        format!("{} updated (no field changes detected)", D::SUBJECT)
    } else {
        format!("{} updated: {}", D::SUBJECT, clauses.join(", "))
    }
}

pub fn delete_description<D: Describe>(entity: &D) -> String {
    match entity.delete_note() {
        Some(note) => format!("{} deleted ({note})", D::SUBJECT),
        None => format!("{} deleted", D::SUBJECT),
    }
}

pub fn restore_description<D: Describe>(entity: &D) -> String {
    match entity.delete_note() {
        Some(note) => format!("{} restored ({note})", D::SUBJECT),
        None => format!("{} restored", D::SUBJECT),
    }
}

/// One clause per field whose patched value differs from the snapshot.
pub fn change_clauses<D: Describe, P: Patch>(patch: &P, old: &D) -> Vec<String> {
    D::fields()
        .iter()
        .filter_map(|field| {
            let new = patch.value(field.key)?;
            let old = old.value(field.key);
            clause(field, &old, &new)
        })
        .collect()
}

fn clause(field: &Field, old: &FieldValue, new: &FieldValue) -> Option<String> {
    if old == new {
        return None;
    }
    let label = field.label;
    let clause = match (field.style, old.is_null(), new.is_null()) {
        (FieldStyle::Presence, true, _) => format!("added {label}"),
        (FieldStyle::Presence, _, true) => format!("removed {label}"),
        (FieldStyle::Presence, _, _) => format!("updated {label}"),
        (FieldStyle::Value, true, _) => format!("added {label}: {}", new.for_change()),
        (FieldStyle::Value, _, true) => format!("removed {label}"),
        (FieldStyle::Value, _, _) => format!(
            "changed {label} from {} to {}",
            old.for_change(),
            new.for_change()
        ),
    };
    Some(clause)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Batch {
        product_id: i32,
        code: Option<String>,
        price: Option<f64>,
        exp: NaiveDate,
        note: Option<String>,
    }

    impl Describe for Batch {
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
                "code_batch" => FieldValue::text(self.code.as_deref()),
                "unit_price" => FieldValue::amount(self.price),
                "exp_date" => FieldValue::Date(self.exp),
                "description" => FieldValue::text(self.note.as_deref()),
                _ => FieldValue::Null,
            }
        }

        fn delete_note(&self) -> Option<String> {
            self.code.as_ref().map(|code| format!("code: {code}"))
        }
    }

    #[derive(Default)]
    struct BatchPatch {
        product_id: Option<i32>,
        code: Option<String>,
        price: Option<f64>,
        note: Option<String>,
    }

    impl Patch for BatchPatch {
        fn value(&self, key: &str) -> Option<FieldValue> {
            match key {
                "product_id" => self.product_id.map(FieldValue::Id),
                "code_batch" => self.code.as_deref().map(|c| FieldValue::text(Some(c))),
                "unit_price" => self.price.map(FieldValue::Amount),
                "description" => self.note.as_deref().map(|n| FieldValue::text(Some(n))),
                _ => None,
            }
        }
    }

    fn batch() -> Batch {
        Batch {
            product_id: 1,
            code: Some("B-001".into()),
            price: Some(100.0),
            exp: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            note: None,
        }
    }

    #[test]
    fn create_lists_known_fields() {
        let text = create_description(&batch());
        assert!(text.starts_with("Product batch created"));
        assert!(text.contains("exp_date: 2025-12-31"));
        assert!(text.contains("unit_price: 100.00"));
        assert!(text.contains("code_batch: B-001"));
        assert!(!text.contains("description"));
    }

    #[test]
    fn update_mentions_only_changed_fields() {
        let patch = BatchPatch {
            price: Some(120.0),
            ..Default::default()
        };
        let text = update_description(&patch, &batch());
        assert_eq!(
            text,
            "Product batch updated: changed unit price from 100.00 to 120.00"
        );
    }

    #[test]
    fn unchanged_values_in_patch_are_ignored() {
        let patch = BatchPatch {
            product_id: Some(1),
            code: Some("B-001".into()),
            price: Some(100.0),
            ..Default::default()
        };
        let text = update_description(&patch, &batch());
        assert_eq!(text, "Product batch updated (no field changes detected)");
    }

    #[test]
    fn sub_cent_changes_are_reported() {
        let patch = BatchPatch {
            price: Some(100.004),
            ..Default::default()
        };
        let text = update_description(&patch, &batch());
        assert_eq!(
            text,
            "Product batch updated: changed unit price from 100.00 to 100.004"
        );
    }

    #[test]
    fn added_removed_and_id_clauses() {
        let patch = BatchPatch {
            product_id: Some(2),
            code: Some(String::new()),
            note: Some("fragile".into()),
            ..Default::default()
        };
        let clauses = change_clauses(&patch, &batch());
        assert_eq!(
            clauses,
            vec![
                "changed product from ID 1 to ID 2".to_string(),
                "removed code batch".to_string(),
                "added description".to_string(),
            ]
        );
    }

    #[test]
    fn delete_and_restore_carry_note() {
        assert_eq!(
            delete_description(&batch()),
            "Product batch deleted (code: B-001)"
        );
        assert_eq!(
            restore_description(&batch()),
            "Product batch restored (code: B-001)"
        );
    }
}
