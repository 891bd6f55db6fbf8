//! Animated balance counters

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::money::parse_amount;

static BALANCE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[₹$]?([\d,.]+)").expect("valid balance regex"));

/// Cubic ease-out: fast start, slow finish
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Pull the first positive figure out of a rendered balance such as `₹1,250.00`
pub fn parse_balance_text(text: &str) -> Option<Decimal> {
    let caps = BALANCE_TEXT.captures(text)?;
    let digits = caps[1].replace(',', "");
    let value = parse_amount(&digits);
    (value > Decimal::ZERO).then_some(value)
}

/// Counter running from `start` to `end` over `duration_ms`
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    start: Decimal,
    end: Decimal,
    duration_ms: u64,
    started_at: u64,
}

impl CounterAnimation {
    pub fn new(start: Decimal, end: Decimal, duration_ms: u64, started_at: u64) -> Self {
        Self {
            start,
            end,
            duration_ms,
            started_at,
        }
    }

    /// Linear progress in `[0, 1]` at time `now`
    pub fn progress(&self, now: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at) as f64;
        (elapsed / self.duration_ms as f64).min(1.0)
    }

    pub fn is_finished(&self, now: u64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Eased value at time `now`; exactly `end` once finished
    pub fn value_at(&self, now: u64) -> Decimal {
        if self.is_finished(now) {
            return self.end;
        }
        let eased = Decimal::from_f64(ease_out_cubic(self.progress(now))).unwrap_or(Decimal::ONE);
        self.start + (self.end - self.start) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_parse_balance_text() {
        assert_eq!(parse_balance_text("₹1,250.50"), Some(Decimal::from_str("1250.50").unwrap()));
        assert_eq!(parse_balance_text("You are owed $40"), Some(Decimal::from(40)));
        assert_eq!(parse_balance_text("₹0.00"), None);
        assert_eq!(parse_balance_text("settled up"), None);
    }

    #[test]
    fn test_counter_progression() {
        let counter = CounterAnimation::new(Decimal::ZERO, Decimal::from(800), 800, 1000);
        assert_eq!(counter.value_at(1000), Decimal::ZERO);
        assert!(counter.value_at(1400) > Decimal::from(400));
        assert!(!counter.is_finished(1799));
        assert_eq!(counter.value_at(1800), Decimal::from(800));
        assert_eq!(counter.value_at(9999), Decimal::from(800));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let counter = CounterAnimation::new(Decimal::ZERO, Decimal::from(5), 0, 0);
        assert!(counter.is_finished(0));
        assert_eq!(counter.value_at(0), Decimal::from(5));
    }
}
