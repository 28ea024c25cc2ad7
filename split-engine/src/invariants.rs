//! Cross-entity invariant validation
//!
//! Sanity checks across the receipt / assignment map / people triple.
//! Violations are advisory: every check runs and every violation is
//! reported, nothing short-circuits on the first failure. Tolerances
//! scale with item and assignee counts — rounding a percentage split to
//! two decimals drifts up to about half a cent per participant, so a
//! fixed epsilon would reject perfectly good large splits.

use rust_decimal::Decimal;
use shared::models::{AssignmentMap, Person, Receipt};
use shared::validation::{IssueKind, ValidationIssue, ValidationReport};

use crate::money::{
    FULL_SHARE, ITEM_TOLERANCE_PER_ITEM, TOLERANCE_PER_PERSON, round2, to_decimal, to_f64,
};

/// Run the full invariant pass.
///
/// A receipt with no items short-circuits to valid: there is no state
/// to be inconsistent yet.
pub fn validate_receipt_invariants(
    receipt: &Receipt,
    assignments: &AssignmentMap,
    people: &[Person],
) -> ValidationReport {
    if receipt.items.is_empty() {
        return ValidationReport::valid();
    }

    let mut issues = Vec::new();
    check_receipt_amounts(receipt, &mut issues);
    check_items_sum_to_subtotal(receipt, &mut issues);
    check_item_splits(receipt, assignments, &mut issues);
    check_person_amounts(people, &mut issues);
    ValidationReport::from_issues(issues)
}

/// Check 1: receipt-level and item-level amounts must be non-negative.
fn check_receipt_amounts(receipt: &Receipt, issues: &mut Vec<ValidationIssue>) {
    for (field, value) in [
        ("subtotal", Some(receipt.subtotal)),
        ("tax", Some(receipt.tax)),
        ("tip", receipt.tip),
        ("total", Some(receipt.total)),
    ] {
        if let Some(v) = value
            && v < 0.0
        {
            issues.push(ValidationIssue::new(
                IssueKind::NegativeReceiptAmount,
                format!("receipt {field} must be non-negative, got {v}"),
            ));
        }
    }

    for (index, item) in receipt.items.iter().enumerate() {
        if item.price < 0.0 {
            issues.push(ValidationIssue::new(
                IssueKind::NegativeItemAmount,
                format!("item {index} '{}' has negative price {}", item.name, item.price),
            ));
        }
        if item.quantity < 0.0 {
            issues.push(ValidationIssue::new(
                IssueKind::NegativeItemAmount,
                format!(
                    "item {index} '{}' has negative quantity {}",
                    item.name, item.quantity
                ),
            ));
        }
    }
}

/// Check 2: item line totals must sum to the receipt subtotal, within a
/// tolerance that grows with the item count. Both sides are rounded to
/// two places first so the comparison itself adds no float noise.
fn check_items_sum_to_subtotal(receipt: &Receipt, issues: &mut Vec<ValidationIssue>) {
    let items_sum: Decimal = receipt
        .items
        .iter()
        .map(|item| to_decimal(item.price) * to_decimal(item.quantity))
        .sum();
    let expected = round2(to_decimal(receipt.subtotal));
    let actual = round2(items_sum);
    let tolerance = ITEM_TOLERANCE_PER_ITEM * Decimal::from(receipt.items.len() as u64);

    if (expected - actual).abs() > tolerance {
        issues.push(ValidationIssue::mismatch(
            IssueKind::SubtotalMismatch,
            format!(
                "item totals sum to {} but receipt subtotal is {}",
                to_f64(actual),
                to_f64(expected)
            ),
            to_f64(expected),
            to_f64(actual),
            to_f64(tolerance),
        ));
    }
}

/// Check 3: for each item with at least one assignment, the share
/// amounts must reproduce the line total within a per-assignee-scaled
/// tolerance. Items with no assignments are skipped — unassigned is not
/// invalid.
fn check_item_splits(
    receipt: &Receipt,
    assignments: &AssignmentMap,
    issues: &mut Vec<ValidationIssue>,
) {
    for (&index, shares) in assignments {
        if shares.is_empty() {
            continue;
        }
        let Some(item) = receipt.items.get(index) else {
            continue;
        };

        let line_total = to_decimal(item.price) * to_decimal(item.quantity);
        let split_sum: Decimal = shares
            .iter()
            .map(|s| round2(line_total * to_decimal(s.share_percentage) / FULL_SHARE))
            .sum();
        let tolerance = TOLERANCE_PER_PERSON * Decimal::from(shares.len() as u64);

        if (line_total - split_sum).abs() > tolerance {
            issues.push(ValidationIssue::mismatch(
                IssueKind::ItemSplitMismatch,
                format!(
                    "item {index} '{}' splits sum to {} but line total is {}",
                    item.name,
                    to_f64(split_sum),
                    to_f64(line_total)
                ),
                to_f64(line_total),
                to_f64(split_sum),
                to_f64(tolerance),
            ));
        }
    }
}

/// Check 4: every derived person amount must be non-negative.
fn check_person_amounts(people: &[Person], issues: &mut Vec<ValidationIssue>) {
    for person in people {
        for (field, value) in [
            ("total_before_tax", person.total_before_tax),
            ("tax", person.tax),
            ("tip", person.tip),
            ("final_total", person.final_total),
        ] {
            if value < 0.0 {
                issues.push(ValidationIssue::new(
                    IssueKind::NegativePersonAmount,
                    format!("{} has negative {field}: {value}", person.name),
                ));
            }
        }
        for item in &person.items {
            if item.amount < 0.0 {
                issues.push(ValidationIssue::new(
                    IssueKind::NegativePersonAmount,
                    format!(
                        "{} has negative amount {} on item '{}'",
                        person.name, item.amount, item.item_name
                    ),
                ));
            }
        }
    }
}
