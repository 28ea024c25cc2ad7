//! Shared types for the split engine
//!
//! Data models exchanged between the calculation core and its
//! collaborators (receipt extraction, UI), plus the currency registry
//! and the typed validation records surfaced to the user.

pub mod currency;
pub mod models;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use currency::CurrencyInfo;
pub use models::{
    AssignmentMap, ItemAssignment, Person, PersonItem, Receipt, ReceiptItem, SharedSplitData,
};
pub use validation::{IssueKind, SplitDataIssue, ValidationIssue, ValidationReport};
