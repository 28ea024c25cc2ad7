//! Proportional allocation engine
//!
//! Turns a receipt plus an assignment map into per-person totals. Pure
//! and deterministic: the same inputs always produce bit-identical
//! output (the assignment map is a `BTreeMap`, so iteration order is
//! fixed), and all intermediates stay in `Decimal` until the final
//! write-back of each person.

use rust_decimal::Decimal;
use shared::models::{AssignmentMap, Person, PersonItem, Receipt};

use crate::money::{FULL_SHARE, to_decimal, to_f64};

/// Recompute every person's item list, pre-tax subtotal, proportional
/// tax/tip and final total from scratch.
///
/// Tax and tip are distributed by each person's share of the receipt
/// subtotal. Zero line prices and a zero subtotal are guarded branches,
/// not errors.
pub fn calculate_person_totals(
    receipt: &Receipt,
    people: &[Person],
    assignments: &AssignmentMap,
) -> Vec<Person> {
    let subtotal = to_decimal(receipt.subtotal);
    let tax = to_decimal(receipt.tax);
    let tip = to_decimal(receipt.tip.unwrap_or(0.0));

    people
        .iter()
        .map(|person| {
            let mut items = Vec::new();
            let mut total_before_tax = Decimal::ZERO;

            for (&item_index, shares) in assignments {
                let Some(item) = receipt.items.get(item_index) else {
                    continue;
                };
                let Some(share) = shares.iter().find(|s| s.person_id == person.id) else {
                    continue;
                };

                let line_total = to_decimal(item.price) * to_decimal(item.quantity);
                // A free line contributes exactly zero whatever the share
                let amount = if line_total.is_zero() {
                    Decimal::ZERO
                } else {
                    line_total * to_decimal(share.share_percentage) / FULL_SHARE
                };

                total_before_tax += amount;
                items.push(PersonItem {
                    item_id: item_index,
                    item_name: item.name.clone(),
                    original_price: item.price,
                    quantity: item.quantity,
                    share_percentage: share.share_percentage,
                    amount: to_f64(amount),
                });
            }

            // No subtotal, no basis for a proportion
            let (person_tax, person_tip) = if subtotal.is_zero() {
                (Decimal::ZERO, Decimal::ZERO)
            } else {
                let proportion = total_before_tax / subtotal;
                (tax * proportion, tip * proportion)
            };
            let final_total = total_before_tax + person_tax + person_tip;

            Person {
                id: person.id.clone(),
                name: person.name.clone(),
                items,
                total_before_tax: to_f64(total_before_tax),
                tax: to_f64(person_tax),
                tip: to_f64(person_tip),
                final_total: to_f64(final_total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ItemAssignment, ReceiptItem};

    fn receipt() -> Receipt {
        Receipt {
            restaurant: None,
            date: None,
            subtotal: 100.0,
            tax: 10.0,
            tip: Some(15.0),
            total: 125.0,
            currency: "USD".to_string(),
            items: vec![
                ReceiptItem::new("Burger", 50.0, 1.0),
                ReceiptItem::new("Fries", 25.0, 2.0),
            ],
        }
    }

    fn full_assignment(alice: &Person, bob: &Person) -> AssignmentMap {
        AssignmentMap::from([
            (0, vec![ItemAssignment::new(&alice.id, 100.0)]),
            (1, vec![ItemAssignment::new(&bob.id, 100.0)]),
        ])
    }

    #[test]
    fn test_burger_fries_scenario() {
        let alice = Person::new("Alice");
        let bob = Person::new("Bob");
        let assignments = full_assignment(&alice, &bob);

        let result = calculate_person_totals(&receipt(), &[alice, bob], &assignments);

        for person in &result {
            assert_eq!(person.total_before_tax, 50.0);
            assert_eq!(person.tax, 5.0);
            assert_eq!(person.tip, 7.5);
            assert_eq!(person.final_total, 62.5);
            assert_eq!(person.items.len(), 1);
        }
        assert_eq!(result[0].items[0].item_name, "Burger");
        assert_eq!(result[1].items[0].amount, 50.0); // Fries: 25 x 2
    }

    #[test]
    fn test_totals_sum_to_receipt_total() {
        let alice = Person::new("Alice");
        let bob = Person::new("Bob");
        let carol = Person::new("Carol");
        let assignments = AssignmentMap::from([
            (
                0,
                vec![
                    ItemAssignment::new(&alice.id, 33.34),
                    ItemAssignment::new(&bob.id, 33.33),
                    ItemAssignment::new(&carol.id, 33.33),
                ],
            ),
            (1, vec![ItemAssignment::new(&alice.id, 100.0)]),
        ]);
        let people = [alice, bob, carol];

        let result = calculate_person_totals(&receipt(), &people, &assignments);

        let sum: f64 = result.iter().map(|p| p.final_total).sum();
        // 1 cent per person of rounding slack
        assert!((sum - 125.0).abs() <= 0.01 * result.len() as f64);
    }

    #[test]
    fn test_zero_line_price_contributes_exactly_zero() {
        let alice = Person::new("Alice");
        let mut r = receipt();
        r.items.push(ReceiptItem::new("Free refill", 0.0, 3.0));
        let assignments = AssignmentMap::from([(2, vec![ItemAssignment::new(&alice.id, 100.0)])]);

        let result = calculate_person_totals(&r, std::slice::from_ref(&alice), &assignments);

        assert_eq!(result[0].items[0].amount, 0.0);
        assert_eq!(result[0].total_before_tax, 0.0);
    }

    #[test]
    fn test_zero_subtotal_yields_zero_tax_and_tip() {
        let alice = Person::new("Alice");
        let r = Receipt {
            restaurant: None,
            date: None,
            subtotal: 0.0,
            tax: 10.0,
            tip: Some(5.0),
            total: 15.0,
            currency: "USD".to_string(),
            items: vec![ReceiptItem::new("Comped", 0.0, 1.0)],
        };
        let assignments = AssignmentMap::from([(0, vec![ItemAssignment::new(&alice.id, 100.0)])]);

        let result = calculate_person_totals(&r, std::slice::from_ref(&alice), &assignments);

        assert_eq!(result[0].tax, 0.0);
        assert_eq!(result[0].tip, 0.0);
        assert_eq!(result[0].final_total, 0.0);
    }

    #[test]
    fn test_missing_tip_treated_as_zero() {
        let alice = Person::new("Alice");
        let bob = Person::new("Bob");
        let mut r = receipt();
        r.tip = None;
        let assignments = full_assignment(&alice, &bob);

        let result = calculate_person_totals(&r, &[alice, bob], &assignments);

        assert_eq!(result[0].tip, 0.0);
        assert_eq!(result[0].final_total, 55.0);
    }

    #[test]
    fn test_out_of_range_item_index_is_skipped() {
        let alice = Person::new("Alice");
        let assignments = AssignmentMap::from([(9, vec![ItemAssignment::new(&alice.id, 100.0)])]);

        let result = calculate_person_totals(&receipt(), std::slice::from_ref(&alice), &assignments);

        assert!(result[0].items.is_empty());
        assert_eq!(result[0].final_total, 0.0);
    }

    #[test]
    fn test_deterministic_output() {
        let alice = Person::new("Alice");
        let bob = Person::new("Bob");
        let assignments = full_assignment(&alice, &bob);
        let people = [alice, bob];

        let a = calculate_person_totals(&receipt(), &people, &assignments);
        let b = calculate_person_totals(&receipt(), &people, &assignments);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fractional_share_precision() {
        // 3 x 10.01 split 50/50: each half is 15.015 -> 15.02/15.01 would
        // drift in f64; Decimal keeps both at exactly 15.02 after rounding
        let alice = Person::new("Alice");
        let bob = Person::new("Bob");
        let r = Receipt {
            restaurant: None,
            date: None,
            subtotal: 30.03,
            tax: 0.0,
            tip: None,
            total: 30.03,
            currency: "USD".to_string(),
            items: vec![ReceiptItem::new("Tapas", 10.01, 3.0)],
        };
        let assignments = AssignmentMap::from([(
            0,
            vec![
                ItemAssignment::new(&alice.id, 50.0),
                ItemAssignment::new(&bob.id, 50.0),
            ],
        )]);

        let result = calculate_person_totals(&r, &[alice, bob], &assignments);
        assert_eq!(result[0].total_before_tax, 15.02);
        assert_eq!(result[1].total_before_tax, 15.02);
    }
}
