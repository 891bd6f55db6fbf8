//! Lenient amount parsing and currency display

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use splitease_config::{CurrencyConfig, SymbolPosition};
use std::str::FromStr;

/// Leading numeric prefix: optional sign, digits with fraction, optional exponent
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-])?(\d+\.?\d*|\.\d+)(?:[eE]([+-]?\d+))?").expect("valid numeric prefix regex")
});

/// Largest power of ten a `Decimal` can be scaled by before it overflows
const MAX_EXPONENT: u64 = 28;

/// Parse user input the way a browser number field is read.
///
/// Only the leading numeric prefix counts; anything after it is ignored.
/// Empty, non-numeric or out-of-range input yields zero.
pub fn parse_amount(input: &str) -> Decimal {
    let Some(caps) = NUMERIC_PREFIX.captures(input) else {
        return Decimal::ZERO;
    };

    let mut mantissa = caps[2].to_string();
    if mantissa.starts_with('.') {
        mantissa.insert(0, '0');
    }
    if mantissa.ends_with('.') {
        mantissa.pop();
    }

    let Ok(mut value) = Decimal::from_str(&mantissa) else {
        return Decimal::ZERO;
    };

    if let Some(exp) = caps.get(3) {
        value = match exp.as_str().parse::<i64>() {
            Ok(exp) => scale_by_power_of_ten(value, exp).unwrap_or(Decimal::ZERO),
            Err(_) => Decimal::ZERO,
        };
    }

    if caps.get(1).map(|m| m.as_str()) == Some("-") && !value.is_zero() {
        value.set_sign_negative(true);
    }
    value
}

/// Parse every entry with [`parse_amount`]
pub fn parse_amounts<S: AsRef<str>>(inputs: &[S]) -> Vec<Decimal> {
    inputs.iter().map(|s| parse_amount(s.as_ref())).collect()
}

fn scale_by_power_of_ten(value: Decimal, exp: i64) -> Option<Decimal> {
    if exp.unsigned_abs() > MAX_EXPONENT * 2 {
        return if exp < 0 { Some(Decimal::ZERO) } else { None };
    }
    let mut result = value;
    for _ in 0..exp.unsigned_abs() {
        result = if exp > 0 {
            result.checked_mul(Decimal::TEN)?
        } else {
            result.checked_div(Decimal::TEN)?
        };
    }
    Some(result)
}

/// Truncate toward zero to whole cents
pub fn truncate_cents(value: Decimal) -> Decimal {
    fixed(value, 2, RoundingStrategy::ToZero)
}

/// Round half away from zero to `dp` places and pin the scale to `dp`
fn fixed(value: Decimal, dp: u32, strategy: RoundingStrategy) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, strategy);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(dp);
    rounded
}

/// Currency formatter built from configuration
#[derive(Debug, Clone)]
pub struct CurrencyFormat {
    symbol: String,
    decimal_places: u32,
    thousands_separator: String,
    position: SymbolPosition,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from_config(&CurrencyConfig::default())
    }
}

impl CurrencyFormat {
    pub fn from_config(config: &CurrencyConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            decimal_places: config.decimal_places,
            thousands_separator: config.thousands_separator.clone(),
            position: config.symbol_position,
        }
    }

    /// Format a rounded amount, e.g. `₹33.34`
    pub fn format(&self, value: Decimal) -> String {
        let rounded = fixed(value, self.decimal_places, RoundingStrategy::MidpointAwayFromZero);
        self.decorate(rounded)
    }

    /// Format an amount truncated toward zero instead of rounded
    pub fn format_truncated(&self, value: Decimal) -> String {
        let truncated = fixed(value, self.decimal_places, RoundingStrategy::ToZero);
        self.decorate(truncated)
    }

    fn decorate(&self, value: Decimal) -> String {
        let text = value.to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };
        let mut body = splitease_utils::format_number(int_part, &self.thousands_separator);
        if let Some(frac) = frac_part {
            body.push('.');
            body.push_str(frac);
        }
        match self.position {
            SymbolPosition::Before => match body.strip_prefix('-') {
                Some(unsigned) => format!("-{}{}", self.symbol, unsigned),
                None => format!("{}{}", self.symbol, body),
            },
            SymbolPosition::After => format!("{}{}", body, self.symbol),
        }
    }
}

/// Format with the default currency settings
pub fn format_currency(value: Decimal) -> String {
    CurrencyFormat::default().format(value)
}

/// Format a percentage with one decimal place, e.g. `99.9%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", fixed(value, 1, RoundingStrategy::MidpointAwayFromZero))
}
