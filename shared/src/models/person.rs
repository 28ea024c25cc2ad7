//! Person model
//!
//! `items` and the four totals are derived values: the engine recomputes
//! them in full from the receipt and assignment map on every change.
//! They are never mutated independently.

use serde::{Deserialize, Serialize};

/// A participant in the split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Opaque identifier (uuid v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Item shares computed for this person
    #[serde(default)]
    pub items: Vec<PersonItem>,
    /// Pre-tax share of the receipt
    #[serde(default)]
    pub total_before_tax: f64,
    /// Proportional tax share
    #[serde(default)]
    pub tax: f64,
    /// Proportional tip share
    #[serde(default)]
    pub tip: f64,
    /// total_before_tax + tax + tip
    #[serde(default)]
    pub final_total: f64,
}

impl Person {
    /// Create a person with a fresh id and no computed totals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            items: Vec::new(),
            total_before_tax: 0.0,
            tax: 0.0,
            tip: 0.0,
            final_total: 0.0,
        }
    }
}

/// One person's share of a single receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonItem {
    /// Index into `Receipt.items`
    pub item_id: usize,
    /// Item name snapshot (for display without the receipt at hand)
    pub item_name: String,
    /// Per-unit price snapshot
    pub original_price: f64,
    /// Quantity snapshot
    pub quantity: f64,
    /// Share of the line total assigned to this person (0-100)
    pub share_percentage: f64,
    /// Dollar amount of that share
    pub amount: f64,
}
