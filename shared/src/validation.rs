//! Typed validation records
//!
//! Invariant violations are advisory data, not errors: the engine
//! reports them and keeps computing, the UI decides what to surface.
//! Codes are machine-readable; the frontend owns localization of the
//! human messages.

use serde::{Deserialize, Serialize};

/// Machine-readable tag for a receipt/assignment/person invariant violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// A receipt-level amount (subtotal, tax, tip, total) is negative
    NegativeReceiptAmount,
    /// An item price or quantity is negative
    NegativeItemAmount,
    /// Sum of item line totals disagrees with the receipt subtotal
    SubtotalMismatch,
    /// Share amounts for one item disagree with its line total
    ItemSplitMismatch,
    /// A person's derived total or item amount is negative
    NegativePersonAmount,
}

/// One invariant violation with diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Human-readable message
    pub message: String,
    /// Value the invariant called for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
    /// Value actually observed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    /// |expected - actual|
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
    /// Tolerance the comparison allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

impl ValidationIssue {
    /// Issue without numeric diagnostics (non-negativity violations).
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            expected: None,
            actual: None,
            diff: None,
            tolerance: None,
        }
    }

    /// Issue from a failed sum comparison.
    pub fn mismatch(
        kind: IssueKind,
        message: impl Into<String>,
        expected: f64,
        actual: f64,
        tolerance: f64,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            expected: Some(expected),
            actual: Some(actual),
            diff: Some((expected - actual).abs()),
            tolerance: Some(tolerance),
        }
    }
}

/// Result of a full invariant pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    #[serde(default)]
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// The empty-receipt short-circuit: nothing to check, nothing wrong.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }
}

/// Typed reason a `SharedSplitData` failed the detailed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitDataIssue {
    /// No participants at all
    Empty,
    /// names and amounts have different lengths
    LengthMismatch,
    /// A name is empty after trimming
    EmptyName,
    /// A per-person amount is negative
    NegativeAmount,
    /// The total is negative
    NegativeTotal,
    /// Sum of amounts outside the per-person cent tolerance of total
    TotalMismatch,
    /// Phone is not a 10-digit (or 1-prefixed 11-digit) number
    InvalidPhone,
    /// Date string does not parse under any accepted format
    InvalidDate,
}
