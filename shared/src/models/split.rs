//! Shared split wire model
//!
//! Produced once at share time from the current `Person` snapshot and
//! immutable thereafter. It lives only inside a URL query string; there
//! is no server-side counterpart, so the receiving end re-validates
//! every invariant independently.

use serde::{Deserialize, Serialize};

/// A finalized split as encoded into a shareable link.
///
/// Invariants (checked by the codec, not enforced by construction):
/// `names.len() == amounts.len() >= 1`, every name non-empty after
/// trimming, amounts and total non-negative, and the amount sum within
/// one cent per person of `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedSplitData {
    /// Participant names, sorted for canonical output
    pub names: Vec<String>,
    /// Final amounts, parallel to `names`
    pub amounts: Vec<f64>,
    /// Sum of `amounts`
    pub total: f64,
    /// Free-text note (required; shown with the payment request)
    pub note: String,
    /// Payment-routing phone number, digits only
    pub phone: String,
    /// Optional date string, preserved verbatim for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
