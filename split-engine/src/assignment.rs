//! Assignment map operations
//!
//! Completeness checks plus the helpers that produce the next map:
//! equal splits, whole-receipt splits, and participant removal. The map
//! itself is a plain value; nothing here mutates the caller's copy.

use rust_decimal::Decimal;
use shared::models::{AssignmentMap, ItemAssignment, Receipt};

use crate::money::{FULL_SHARE, SHARE_TOLERANCE, round2, to_decimal, to_f64};

/// Whether one item's shares sum to 100 within tolerance.
fn fully_assigned(shares: &[ItemAssignment]) -> bool {
    let sum: Decimal = shares.iter().map(|s| to_decimal(s.share_percentage)).sum();
    (sum - FULL_SHARE).abs() <= SHARE_TOLERANCE
}

/// True iff every item on the receipt is fully assigned.
///
/// A receipt with no items is never "complete" — the UI treats that as
/// "nothing to assign yet", not as done.
pub fn validate_item_assignments(receipt: &Receipt, assignments: &AssignmentMap) -> bool {
    if receipt.items.is_empty() {
        return false;
    }
    (0..receipt.items.len()).all(|index| {
        assignments
            .get(&index)
            .is_some_and(|shares| fully_assigned(shares))
    })
}

/// Indices of items that are not fully assigned, in ascending order.
pub fn unassigned_items(receipt: &Receipt, assignments: &AssignmentMap) -> Vec<usize> {
    (0..receipt.items.len())
        .filter(|index| {
            !assignments
                .get(index)
                .is_some_and(|shares| fully_assigned(shares))
        })
        .collect()
}

/// Equal shares for `n` people, always summing to exactly 100.00.
///
/// The first n-1 people get `round(100/n, 2)`; the last person gets the
/// remainder, so 3 people yields [33.33, 33.33, 33.34]. The last-listed
/// person absorbing the residue is UI-visible behavior and must stay
/// ordering-dependent.
pub fn equal_split_shares(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let share = round2(FULL_SHARE / Decimal::from(n as u64));
    let mut shares = vec![to_f64(share); n - 1];
    let last = round2(FULL_SHARE - share * Decimal::from((n - 1) as u64));
    shares.push(to_f64(last));
    shares
}

/// Next map with `item_index` split equally among `person_ids`.
///
/// An empty selection clears the item's assignment entirely.
pub fn assign_item_equally(
    assignments: &AssignmentMap,
    item_index: usize,
    person_ids: &[String],
) -> AssignmentMap {
    let mut next = assignments.clone();
    if person_ids.is_empty() {
        next.remove(&item_index);
        return next;
    }
    let shares = equal_split_shares(person_ids.len());
    next.insert(
        item_index,
        person_ids
            .iter()
            .zip(shares)
            .map(|(id, share)| ItemAssignment::new(id, share))
            .collect(),
    );
    next
}

/// Fresh map with every receipt item split equally among `person_ids`.
pub fn split_receipt_evenly(receipt: &Receipt, person_ids: &[String]) -> AssignmentMap {
    let mut map = AssignmentMap::new();
    for index in 0..receipt.items.len() {
        map = assign_item_equally(&map, index, person_ids);
    }
    map
}

/// Next map with every share belonging to `person_id` pruned.
///
/// Items whose remaining shares no longer sum to 100 simply become
/// unassigned again; items left with no shares drop out of the map.
pub fn remove_person(assignments: &AssignmentMap, person_id: &str) -> AssignmentMap {
    assignments
        .iter()
        .filter_map(|(&index, shares)| {
            let remaining: Vec<ItemAssignment> = shares
                .iter()
                .filter(|s| s.person_id != person_id)
                .cloned()
                .collect();
            (!remaining.is_empty()).then_some((index, remaining))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ReceiptItem;

    fn receipt(item_count: usize) -> Receipt {
        Receipt {
            restaurant: None,
            date: None,
            subtotal: 10.0 * item_count as f64,
            tax: 0.0,
            tip: None,
            total: 10.0 * item_count as f64,
            currency: "USD".to_string(),
            items: (0..item_count)
                .map(|i| ReceiptItem::new(format!("Item {i}"), 10.0, 1.0))
                .collect(),
        }
    }

    #[test]
    fn test_equal_split_always_sums_to_100() {
        for n in 1..=12 {
            let shares = equal_split_shares(n);
            assert_eq!(shares.len(), n);
            let sum: Decimal = shares.iter().map(|&s| to_decimal(s)).sum();
            assert_eq!(sum, FULL_SHARE, "n = {n}");
        }
    }

    #[test]
    fn test_last_person_absorbs_remainder() {
        assert_eq!(equal_split_shares(3), vec![33.33, 33.33, 33.34]);
        assert_eq!(equal_split_shares(6), vec![16.67, 16.67, 16.67, 16.67, 16.67, 16.65]);
        assert_eq!(equal_split_shares(1), vec![100.0]);
        assert!(equal_split_shares(0).is_empty());
    }

    #[test]
    fn test_validate_item_assignments_complete() {
        let r = receipt(2);
        let map = split_receipt_evenly(&r, &["a".to_string(), "b".to_string(), "c".to_string()]);
        assert!(validate_item_assignments(&r, &map));
        assert!(unassigned_items(&r, &map).is_empty());
    }

    #[test]
    fn test_empty_receipt_never_complete() {
        let r = receipt(0);
        assert!(!validate_item_assignments(&r, &AssignmentMap::new()));
        assert!(unassigned_items(&r, &AssignmentMap::new()).is_empty());
    }

    #[test]
    fn test_partial_assignment_reported_ascending() {
        let r = receipt(3);
        let map = AssignmentMap::from([
            (1, vec![ItemAssignment::new("a", 100.0)]),
            (2, vec![ItemAssignment::new("a", 60.0)]), // incomplete
        ]);
        assert!(!validate_item_assignments(&r, &map));
        assert_eq!(unassigned_items(&r, &map), vec![0, 2]);
    }

    #[test]
    fn test_share_tolerance_absorbs_rounding() {
        let r = receipt(1);
        // 3-way manual split that sums to 99.99
        let map = AssignmentMap::from([(
            0,
            vec![
                ItemAssignment::new("a", 33.33),
                ItemAssignment::new("b", 33.33),
                ItemAssignment::new("c", 33.33),
            ],
        )]);
        assert!(validate_item_assignments(&r, &map));

        // 99.97 is outside the ±0.01 window
        let map = AssignmentMap::from([(
            0,
            vec![
                ItemAssignment::new("a", 33.33),
                ItemAssignment::new("b", 33.33),
                ItemAssignment::new("c", 33.31),
            ],
        )]);
        assert!(!validate_item_assignments(&r, &map));
    }

    #[test]
    fn test_remove_person_unassigns_items() {
        let r = receipt(2);
        let ids = ["a".to_string(), "b".to_string()];
        let map = split_receipt_evenly(&r, &ids);
        assert!(validate_item_assignments(&r, &map));

        let next = remove_person(&map, "b");
        assert!(!validate_item_assignments(&r, &next));
        assert_eq!(unassigned_items(&r, &next), vec![0, 1]);
        // Original map untouched
        assert!(validate_item_assignments(&r, &map));

        // Removing the last assignee drops the entries entirely
        let empty = remove_person(&next, "a");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_assign_item_equally_with_empty_selection_clears() {
        let r = receipt(1);
        let map = split_receipt_evenly(&r, &["a".to_string()]);
        let next = assign_item_equally(&map, 0, &[]);
        assert!(next.is_empty());
    }
}
