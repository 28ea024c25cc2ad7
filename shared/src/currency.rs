//! Currency registry
//!
//! Static metadata per ISO 4217 code with an insert-once index, so
//! repeated lookups hand back the identical `&'static` record. This
//! module never errors: unknown codes degrade to USD, non-finite
//! numeric input degrades to zero.

use rust_decimal::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Display metadata for one currency.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    /// ISO 4217 code
    pub code: &'static str,
    /// Display symbol
    pub symbol: &'static str,
    /// English display name
    pub name: &'static str,
    /// Decimal places of the minor unit (0 for JPY, 2 for most)
    pub minor_units: u32,
    /// Symbol before the amount ("$12.50") vs after ("12.50 €")
    pub symbol_first: bool,
}

/// All known currencies. USD must stay first: it is the fallback record.
static CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "AUD", symbol: "A$", name: "Australian Dollar", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "BRL", symbol: "R$", name: "Brazilian Real", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "CAD", symbol: "C$", name: "Canadian Dollar", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "CNY", symbol: "¥", name: "Chinese Yuan", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "DKK", symbol: "kr", name: "Danish Krone", minor_units: 2, symbol_first: false },
    CurrencyInfo { code: "EUR", symbol: "€", name: "Euro", minor_units: 2, symbol_first: false },
    CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen", minor_units: 0, symbol_first: true },
    CurrencyInfo { code: "MXN", symbol: "MX$", name: "Mexican Peso", minor_units: 2, symbol_first: true },
    CurrencyInfo { code: "NOK", symbol: "kr", name: "Norwegian Krone", minor_units: 2, symbol_first: false },
    CurrencyInfo { code: "PLN", symbol: "zł", name: "Polish Zloty", minor_units: 2, symbol_first: false },
    CurrencyInfo { code: "KRW", symbol: "₩", name: "South Korean Won", minor_units: 0, symbol_first: true },
    CurrencyInfo { code: "SEK", symbol: "kr", name: "Swedish Krona", minor_units: 2, symbol_first: false },
    CurrencyInfo { code: "CHF", symbol: "Fr", name: "Swiss Franc", minor_units: 2, symbol_first: false },
];

fn index() -> &'static HashMap<&'static str, &'static CurrencyInfo> {
    static INDEX: OnceLock<HashMap<&'static str, &'static CurrencyInfo>> = OnceLock::new();
    INDEX.get_or_init(|| CURRENCIES.iter().map(|c| (c.code, c)).collect())
}

/// Look up currency metadata. Unknown or malformed codes fall back to USD.
pub fn currency_info(code: &str) -> &'static CurrencyInfo {
    let upper = code.trim().to_ascii_uppercase();
    index().get(upper.as_str()).copied().unwrap_or(&CURRENCIES[0])
}

/// Whether the registry knows this code.
pub fn is_supported_currency(code: &str) -> bool {
    index().contains_key(code.trim().to_ascii_uppercase().as_str())
}

/// All known currencies, sorted by display name.
pub fn supported_currencies() -> Vec<&'static CurrencyInfo> {
    let mut all: Vec<_> = CURRENCIES.iter().collect();
    all.sort_by(|a, b| a.name.cmp(b.name));
    all
}

/// Convert a major-unit amount to integer minor units (cents for USD),
/// rounding to the nearest minor unit. Non-finite input yields 0.
pub fn to_minor_units(amount: f64, code: &str) -> i64 {
    let Some(dec) = Decimal::from_f64(amount) else {
        tracing::debug!(amount, code, "non-finite amount in minor-unit conversion");
        return 0;
    };
    let scale = Decimal::from(10i64.pow(currency_info(code).minor_units));
    (dec * scale)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Convert integer minor units back to a major-unit amount.
pub fn from_minor_units(minor: i64, code: &str) -> f64 {
    let scale = Decimal::from(10i64.pow(currency_info(code).minor_units));
    (Decimal::from(minor) / scale).to_f64().unwrap_or(0.0)
}

/// Format an amount with the currency's symbol placement and decimal
/// count. Non-finite input formats as zero.
pub fn format_currency(amount: f64, code: &str) -> String {
    let info = currency_info(code);
    let value = if amount.is_finite() { amount } else { 0.0 };
    // Round through Decimal first so 1234.5 JPY formats as 1235, not 1234
    let scale = Decimal::from(10i64.pow(info.minor_units));
    let rounded = (Decimal::from_f64(value).unwrap_or(Decimal::ZERO) * scale)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / scale;
    let number = format!(
        "{:.prec$}",
        rounded.to_f64().unwrap_or(0.0),
        prec = info.minor_units as usize
    );
    if info.symbol_first {
        format!("{}{}", info.symbol, number)
    } else {
        format!("{} {}", number, info.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(currency_info("eur").code, "EUR");
        assert_eq!(currency_info(" gbp ").code, "GBP");
    }

    #[test]
    fn test_unknown_code_falls_back_to_usd_identity() {
        let usd = currency_info("USD");
        let unknown = currency_info("ZZZ");
        assert!(std::ptr::eq(usd, unknown));
    }

    #[test]
    fn test_repeated_lookup_returns_same_record() {
        assert!(std::ptr::eq(currency_info("JPY"), currency_info("JPY")));
    }

    #[test]
    fn test_minor_unit_conversion() {
        assert_eq!(to_minor_units(10.99, "USD"), 1099);
        assert_eq!(to_minor_units(10.995, "USD"), 1100);
        assert_eq!(to_minor_units(1234.0, "JPY"), 1234);
        assert_eq!(from_minor_units(1099, "USD"), 10.99);
        assert_eq!(from_minor_units(1234, "JPY"), 1234.0);
    }

    #[test]
    fn test_non_finite_input_degrades_to_zero() {
        assert_eq!(to_minor_units(f64::NAN, "USD"), 0);
        assert_eq!(to_minor_units(f64::INFINITY, "USD"), 0);
        assert_eq!(to_minor_units(f64::NEG_INFINITY, "EUR"), 0);
    }

    #[test]
    fn test_format_symbol_placement_and_decimals() {
        assert_eq!(format_currency(12.5, "USD"), "$12.50");
        assert_eq!(format_currency(12.5, "EUR"), "12.50 €");
        assert_eq!(format_currency(1234.5, "JPY"), "¥1235");
        assert_eq!(format_currency(0.0, "KRW"), "₩0");
    }

    #[test]
    fn test_format_unknown_code_uses_usd() {
        assert_eq!(format_currency(3.0, "???"), "$3.00");
    }

    #[test]
    fn test_supported_currencies_sorted_by_name() {
        let all = supported_currencies();
        assert_eq!(all.len(), CURRENCIES.len());
        for pair in all.windows(2) {
            assert!(pair[0].name <= pair[1].name);
        }
        assert!(is_supported_currency("usd"));
        assert!(!is_supported_currency("XYZ"));
    }
}
