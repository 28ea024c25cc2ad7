//! Shareable split link codec
//!
//! A finalized split lives entirely inside a URL query string — there is
//! no server-side record — so the producer and consumer may be different
//! devices and the consumer must re-validate everything. The wire format
//! is stable for backward compatibility with previously generated links:
//!
//! - `names`:   comma-joined participant names
//! - `amounts`: comma-joined 2-decimal amounts, parallel to `names`
//! - `total`:   2-decimal sum
//! - `note`:    required free text
//! - `phone`:   required payment-routing number, digits only
//! - `date`:    optional, passed through verbatim
//!
//! Commas inside names are a known limitation of the joined encoding:
//! they are neither escaped nor rejected here, and a link carrying one
//! fails the parity check on the receiving end.

use std::collections::HashMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use rust_decimal::Decimal;
use shared::models::{Person, SharedSplitData};
use shared::validation::SplitDataIssue;
use thiserror::Error;

use crate::money::{MONEY_TOLERANCE, round2, to_decimal, to_f64};


/// Everything except unreserved characters and the comma separator gets
/// percent-encoded. The literal comma keeps old links parseable.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',');

/// Ordered wire parameters, pre-encoding.
pub type ShareParams = Vec<(&'static str, String)>;

/// Caller-misuse errors from [`serialize_split`].
///
/// These three preconditions are hard requirements for a shareable link
/// (the phone is the payment-routing target); violating them is a bug in
/// the calling code, not a user-recoverable state, so they fail loudly
/// instead of degrading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("cannot share a split with no people")]
    NoPeople,

    #[error("a note is required for a shareable link")]
    EmptyNote,

    #[error("a phone number is required for a shareable link")]
    EmptyPhone,
}

/// Serialize a finalized split into wire parameters.
///
/// People are sorted by name (case-sensitive) for canonical,
/// diff-friendly output; amounts are fixed 2-decimal strings and the
/// total is their exact decimal sum.
pub fn serialize_split(
    people: &[Person],
    note: &str,
    phone: &str,
    date: Option<&str>,
) -> Result<ShareParams, ShareError> {
    if people.is_empty() {
        return Err(ShareError::NoPeople);
    }
    if note.trim().is_empty() {
        return Err(ShareError::EmptyNote);
    }
    if phone.trim().is_empty() {
        return Err(ShareError::EmptyPhone);
    }

    let mut sorted: Vec<&Person> = people.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let amounts: Vec<Decimal> = sorted
        .iter()
        .map(|p| round2(to_decimal(p.final_total)))
        .collect();
    let total: Decimal = amounts.iter().copied().sum();

    let names = sorted
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let amounts = amounts
        .iter()
        .map(|a| format!("{:.2}", to_f64(*a)))
        .collect::<Vec<_>>()
        .join(",");

    let mut params: ShareParams = vec![
        ("names", names),
        ("amounts", amounts),
        ("total", format!("{:.2}", to_f64(total))),
        ("note", note.trim().to_string()),
        ("phone", strip_phone(phone)),
    ];
    if let Some(date) = date
        && !date.trim().is_empty()
    {
        params.push(("date", date.trim().to_string()));
    }
    Ok(params)
}

/// Percent-encode parameters into a query string.
pub fn encode_query(params: &ShareParams) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_ENCODE_SET)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the full shareable URL: `{base_url}/split?{query}`.
///
/// A single trailing slash on `base_url` is trimmed so the path never
/// doubles up.
pub fn generate_shareable_url(
    base_url: &str,
    people: &[Person],
    note: &str,
    phone: &str,
    date: Option<&str>,
) -> Result<String, ShareError> {
    let params = serialize_split(people, note, phone, date)?;
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    Ok(format!("{base}/split?{}", encode_query(&params)))
}

/// Decode a query string (the part after `?`) back into split data.
///
/// This is the untrusted-input boundary: the URL may be hand-edited or
/// corrupted in transit, so every structural invariant is re-derived
/// here independently of whatever produced it. Any problem yields
/// `None`; this function never panics.
pub fn deserialize_split(query: &str) -> Option<SharedSplitData> {
    let params = parse_query(query);

    let names_raw = require_param(&params, "names")?;
    let amounts_raw = require_param(&params, "amounts")?;
    let total_raw = require_param(&params, "total")?;
    let note = require_param(&params, "note")?.to_string();
    let phone = require_param(&params, "phone")?.to_string();
    let date = params
        .get("date")
        .filter(|d| !d.trim().is_empty())
        .cloned();

    let names: Vec<String> = names_raw.split(',').map(str::to_string).collect();
    if names.iter().any(|n| n.trim().is_empty()) {
        tracing::debug!("rejected share link: empty participant name");
        return None;
    }

    let amounts = amounts_raw
        .split(',')
        .map(parse_amount)
        .collect::<Option<Vec<f64>>>()?;
    if names.len() != amounts.len() {
        tracing::debug!(
            names = names.len(),
            amounts = amounts.len(),
            "rejected share link: names/amounts length mismatch"
        );
        return None;
    }
    let total = parse_amount(total_raw)?;

    Some(SharedSplitData {
        names,
        amounts,
        total,
        note,
        phone,
        date,
    })
}

/// Quick validity check for deserialized or caller-built split data.
pub fn validate_split_data(data: &SharedSplitData) -> bool {
    validate_split_data_detailed(data).is_empty()
}

/// Detailed variant returning every failed invariant.
pub fn validate_split_data_detailed(data: &SharedSplitData) -> Vec<SplitDataIssue> {
    let mut issues = Vec::new();

    if data.names.is_empty() {
        issues.push(SplitDataIssue::Empty);
    }
    if data.names.len() != data.amounts.len() {
        issues.push(SplitDataIssue::LengthMismatch);
    }
    if data.names.iter().any(|n| n.trim().is_empty()) {
        issues.push(SplitDataIssue::EmptyName);
    }
    if data.amounts.iter().any(|&a| !a.is_finite() || a < 0.0) {
        issues.push(SplitDataIssue::NegativeAmount);
    }
    if !data.total.is_finite() || data.total < 0.0 {
        issues.push(SplitDataIssue::NegativeTotal);
    }

    // One cent of rounding slack per participant
    if !data.names.is_empty() && data.names.len() == data.amounts.len() {
        let sum: Decimal = data.amounts.iter().map(|&a| to_decimal(a)).sum();
        let tolerance = MONEY_TOLERANCE * Decimal::from(data.names.len() as u64);
        if (sum - to_decimal(data.total)).abs() > tolerance {
            issues.push(SplitDataIssue::TotalMismatch);
        }
    }

    if !is_valid_phone_number(&data.phone) {
        issues.push(SplitDataIssue::InvalidPhone);
    }
    if let Some(date) = &data.date
        && !is_valid_date(date)
    {
        issues.push(SplitDataIssue::InvalidDate);
    }
    issues
}

/// Accepts 10-digit numbers and 11-digit numbers with a leading
/// country-code 1, tolerating `()`, `-`, `.`, spaces and a leading `+`
/// by stripping non-digits first.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let digits = strip_phone(phone);
    digits.len() == 10 || (digits.len() == 11 && digits.starts_with('1'))
}

/// Accepts ISO-8601 date/datetime and a few common human-readable
/// formats. Unparseable strings fail validation; the raw string is kept
/// on the struct regardless, as a display fallback.
pub fn is_valid_date(date: &str) -> bool {
    let date = date.trim();
    if chrono::DateTime::parse_from_rfc3339(date).is_ok() {
        return true;
    }
    if chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").is_ok() {
        return true;
    }
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];
    DATE_FORMATS
        .iter()
        .any(|fmt| chrono::NaiveDate::parse_from_str(date, fmt).is_ok())
}

fn strip_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn require_param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a String> {
    let value = params.get(key).filter(|v| !v.trim().is_empty());
    if value.is_none() {
        tracing::debug!(key, "rejected share link: missing required parameter");
    }
    value
}

/// Wire amounts are plain unsigned decimals; exponent notation and
/// textual spellings like `inf`/`NaN` are rejected before parsing.
fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty()
        || !raw.chars().all(|c| c.is_ascii_digit() || c == '.')
        || raw.chars().filter(|&c| c == '.').count() > 1
    {
        return None;
    }
    let value: f64 = raw.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Split a query string into decoded key/value pairs. Malformed
/// segments are dropped rather than failing the whole parse.
fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    // '+' as space for links produced by form-style encoders
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw)
        .decode_utf8()
        .ok()
        .map(|s| s.to_string())
}
