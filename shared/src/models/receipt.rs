//! Receipt model

use serde::{Deserialize, Serialize};

/// A parsed purchase receipt, as produced by the extraction collaborator.
///
/// Monetary fields are `f64` at this boundary; all arithmetic on them
/// goes through the engine's decimal layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Restaurant / merchant name, if recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    /// Purchase date string, passed through as-is for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Pre-tax subtotal
    pub subtotal: f64,
    /// Tax amount
    pub tax: f64,
    /// Tip amount (absent when the receipt carries none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<f64>,
    /// Grand total
    pub total: f64,
    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Line items
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// A single receipt line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Item name
    pub name: String,
    /// Per-unit price
    pub price: f64,
    /// Quantity (fractional allowed for weighed items)
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl ReceiptItem {
    pub fn new(name: impl Into<String>, price: f64, quantity: f64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}
