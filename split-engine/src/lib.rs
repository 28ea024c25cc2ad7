//! Split calculation and sharing engine
//!
//! Pure, synchronous core for splitting a receipt between people:
//! proportional allocation with exact decimal arithmetic, assignment and
//! cross-entity invariant validation with count-scaled tolerances, and a
//! URL codec that turns a finalized split into a self-verifying link.
//!
//! Everything here is a side-effect-free transform over immutable
//! inputs; callers own the receipt, the people list and the assignment
//! map, and receive new values back.

pub mod allocation;
pub mod assignment;
pub mod invariants;
pub mod money;
pub mod share;

// Re-exports
pub use allocation::calculate_person_totals;
pub use assignment::{
    assign_item_equally, equal_split_shares, remove_person, split_receipt_evenly,
    unassigned_items, validate_item_assignments,
};
pub use invariants::validate_receipt_invariants;
pub use share::{
    ShareError, deserialize_split, generate_shareable_url, is_valid_date, is_valid_phone_number,
    serialize_split, validate_split_data, validate_split_data_detailed,
};
