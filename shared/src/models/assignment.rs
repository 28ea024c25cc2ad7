//! Item assignment types
//!
//! The assignment map is an immutable value: the pure engine functions
//! take it by reference and the mutation helpers return the next map.
//! `BTreeMap` keeps item indices sorted, which makes every iteration
//! (and therefore every computed output) deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One person's claim on one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAssignment {
    /// `Person.id` of the assignee
    pub person_id: String,
    /// Share of the item's line total, 0-100
    pub share_percentage: f64,
}

impl ItemAssignment {
    pub fn new(person_id: impl Into<String>, share_percentage: f64) -> Self {
        Self {
            person_id: person_id.into(),
            share_percentage,
        }
    }
}

/// item index -> shares claimed against that item.
///
/// An item absent from the map, or whose shares do not sum to 100,
/// counts as unassigned.
pub type AssignmentMap = BTreeMap<usize, Vec<ItemAssignment>>;
