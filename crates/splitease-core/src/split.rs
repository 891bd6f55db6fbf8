//! Split calculation engine
//!
//! Pure functions over explicit snapshots. Nothing here reads page state or
//! fails on malformed input; callers parse raw text with
//! [`crate::money::parse_amount`] first, which maps garbage to zero.

use rust_decimal::Decimal;
use splitease_config::SplitConfig;

use crate::error::CoreResult;
use crate::models::{EqualSplit, ExactReconciliation, PercentageReconciliation, SplitForm, SplitPreview};

/// Reconciliation tolerances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitTolerances {
    /// Maximum gap (exclusive) between the exact sum and the amount
    pub exact: Decimal,
    /// Maximum gap (exclusive) between the percentage sum and 100
    pub percentage: Decimal,
}

impl Default for SplitTolerances {
    fn default() -> Self {
        Self {
            exact: Decimal::new(1, 2),
            percentage: Decimal::new(1, 1),
        }
    }
}

impl SplitTolerances {
    pub fn from_config(config: &SplitConfig) -> CoreResult<Self> {
        Ok(Self {
            exact: config.exact_tolerance()?,
            percentage: config.percentage_tolerance()?,
        })
    }
}

/// `amount / checked_count`, or zero when nobody is checked
pub fn compute_equal_split(amount: Decimal, checked_count: usize) -> Decimal {
    if checked_count == 0 {
        return Decimal::ZERO;
    }
    amount
        .checked_div(Decimal::from(checked_count))
        .unwrap_or(Decimal::ZERO)
}

/// Sum the exact entries and compare them with the amount (default tolerance)
pub fn compute_exact_reconciliation(amount: Decimal, exact_values: &[Decimal]) -> ExactReconciliation {
    SplitEngine::default().exact(amount, exact_values)
}

/// Convert percentages to amounts and compare their sum with 100 (default tolerance)
pub fn compute_percentage_reconciliation(
    amount: Decimal,
    percent_values: &[Decimal],
) -> PercentageReconciliation {
    SplitEngine::default().percentage(amount, percent_values)
}

/// Exact sum, or `None` when it leaves the `Decimal` range
fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values.iter().try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
}

/// Sum clamped to the `Decimal` range, for display only
fn saturating_sum(values: &[Decimal]) -> Decimal {
    values.iter().fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}

/// `|value - target| < tolerance`; out-of-range values never reconcile
fn within(value: Option<Decimal>, target: Decimal, tolerance: Decimal) -> bool {
    value
        .and_then(|v| v.checked_sub(target))
        .map(|gap| gap.abs() < tolerance)
        .unwrap_or(false)
}

/// Split engine carrying configured tolerances
#[derive(Debug, Clone, Default)]
pub struct SplitEngine {
    tolerances: SplitTolerances,
}

impl SplitEngine {
    pub fn new(tolerances: SplitTolerances) -> Self {
        Self { tolerances }
    }

    pub fn from_config(config: &SplitConfig) -> CoreResult<Self> {
        Ok(Self::new(SplitTolerances::from_config(config)?))
    }

    pub fn tolerances(&self) -> SplitTolerances {
        self.tolerances
    }

    /// Equal split over the members whose flag is set
    pub fn equal(&self, amount: Decimal, included: &[bool]) -> EqualSplit {
        let checked_count = included.iter().filter(|&&checked| checked).count();
        let per_person = compute_equal_split(amount, checked_count);
        let member_amounts = included
            .iter()
            .map(|&checked| if checked { per_person } else { Decimal::ZERO })
            .collect();

        EqualSplit {
            per_person,
            checked_count,
            member_amounts,
        }
    }

    pub fn exact(&self, amount: Decimal, exact_values: &[Decimal]) -> ExactReconciliation {
        let total = checked_sum(exact_values);
        let reconciled = within(total, amount, self.tolerances.exact);

        ExactReconciliation {
            values: exact_values.to_vec(),
            sum: total.unwrap_or_else(|| saturating_sum(exact_values)),
            amount,
            reconciled,
        }
    }

    pub fn percentage(&self, amount: Decimal, percent_values: &[Decimal]) -> PercentageReconciliation {
        let per_member_amounts = percent_values
            .iter()
            .map(|percent| {
                amount
                    .checked_mul(*percent)
                    .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                    .unwrap_or(Decimal::ZERO)
            })
            .collect();
        let total_percent = checked_sum(percent_values);
        let reconciled = within(total_percent, Decimal::ONE_HUNDRED, self.tolerances.percentage);

        PercentageReconciliation {
            per_member_amounts,
            total_percent: total_percent.unwrap_or_else(|| saturating_sum(percent_values)),
            reconciled,
        }
    }

    /// Derive every preview value of a snapshot
    pub fn preview(&self, form: &SplitForm) -> SplitPreview {
        let amount = form.amount_value();
        let preview = SplitPreview {
            mode: form.mode,
            amount,
            member_ids: form.members.iter().map(|m| m.id.clone()).collect(),
            equal: self.equal(amount, &form.included_flags()),
            exact: self.exact(amount, &form.exact_values()),
            percentage: self.percentage(amount, &form.percentage_values()),
        };
        log::debug!(
            "split preview: mode={} amount={} reconciled={}",
            preview.mode,
            preview.amount,
            preview.is_reconciled()
        );
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;
    use crate::money::{parse_amounts, truncate_cents};
    use crate::types::SplitMode;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn decs(values: &[&str]) -> Vec<Decimal> {
        values.iter().map(|s| dec(s)).collect()
    }

    #[test]
    fn test_equal_split_divides_by_checked_count() {
        assert_eq!(compute_equal_split(dec("100"), 4), dec("25"));
        assert_eq!(compute_equal_split(dec("0"), 3), Decimal::ZERO);
        assert_eq!(compute_equal_split(dec("90"), 1), dec("90"));
        for count in 1..=7usize {
            let amount = dec("123.45");
            assert_eq!(compute_equal_split(amount, count), amount / Decimal::from(count));
        }
    }

    #[test]
    fn test_equal_split_with_nobody_checked() {
        assert_eq!(compute_equal_split(dec("100"), 0), Decimal::ZERO);
        let split = SplitEngine::default().equal(dec("100"), &[false, false]);
        assert_eq!(split.checked_count, 0);
        assert_eq!(split.member_amounts, vec![Decimal::ZERO, Decimal::ZERO]);
    }

    #[test]
    fn test_equal_split_unchecked_members_owe_nothing() {
        let split = SplitEngine::default().equal(dec("90"), &[true, false, true]);
        assert_eq!(split.per_person, dec("45"));
        assert_eq!(split.member_amounts, decs(&["45", "0", "45"]));
    }

    #[test]
    fn test_equal_split_display_is_truncated_without_redistribution() {
        let split = SplitEngine::default().equal(dec("100"), &[true, true, true]);
        let shown = truncate_cents(split.per_person);
        assert_eq!(shown, dec("33.33"));
        assert_eq!(shown * Decimal::from(3), dec("99.99"));
    }

    #[test]
    fn test_exact_non_numeric_entries_count_as_zero() {
        let result = compute_exact_reconciliation(dec("100"), &parse_amounts(&["abc", "40"]));
        assert_eq!(result.sum, dec("40"));
        assert!(!result.reconciled);
        assert_eq!(result.remaining(), dec("60"));
    }

    #[test]
    fn test_exact_reconciles_thirds() {
        let result = compute_exact_reconciliation(dec("100.00"), &decs(&["33.34", "33.33", "33.33"]));
        assert_eq!(result.sum, dec("100.00"));
        assert!(result.reconciled);
    }

    #[test]
    fn test_exact_tolerance_is_exclusive() {
        assert!(compute_exact_reconciliation(dec("100"), &decs(&["99.995"])).reconciled);
        assert!(!compute_exact_reconciliation(dec("100"), &decs(&["99.99"])).reconciled);
        assert!(!compute_exact_reconciliation(dec("100"), &decs(&["100.01"])).reconciled);
    }

    #[test]
    fn test_exact_accepts_negative_entries() {
        let result = compute_exact_reconciliation(dec("50"), &decs(&["80", "-30"]));
        assert_eq!(result.sum, dec("50"));
        assert!(result.reconciled);
    }

    #[test]
    fn test_exact_out_of_range_never_reconciles() {
        let result = compute_exact_reconciliation(Decimal::ZERO, &[Decimal::MAX, Decimal::MAX]);
        assert!(!result.reconciled);
        assert_eq!(result.sum, Decimal::MAX);

        let result = compute_exact_reconciliation(Decimal::MIN, &[Decimal::MAX]);
        assert!(!result.reconciled);
        assert_eq!(result.remaining(), Decimal::MIN);
    }

    #[test]
    fn test_percentage_out_of_range_never_reconciles() {
        let huge = parse_amounts(&["-79228162514264337593543950335"]);
        let result = compute_percentage_reconciliation(dec("100"), &huge);
        assert!(!result.reconciled);
        assert_eq!(result.total_percent, Decimal::MIN);
        assert_eq!(result.per_member_amounts, vec![Decimal::ZERO]);

        let result = compute_percentage_reconciliation(dec("100"), &[Decimal::MAX, Decimal::MAX, dec("-1")]);
        assert!(!result.reconciled);
    }

    #[test]
    fn test_percentage_even_halves() {
        let result = compute_percentage_reconciliation(dec("200"), &decs(&["50", "50"]));
        assert_eq!(result.per_member_amounts, decs(&["100", "100"]));
        assert_eq!(result.total_percent, dec("100"));
        assert!(result.reconciled);
    }

    #[test]
    fn test_percentage_within_tolerance() {
        let result = compute_percentage_reconciliation(dec("200"), &decs(&["50", "49.91"]));
        assert_eq!(result.total_percent, dec("99.91"));
        assert!(result.reconciled);
    }

    #[test]
    fn test_percentage_outside_tolerance() {
        let result = compute_percentage_reconciliation(dec("200"), &decs(&["50", "49"]));
        assert_eq!(result.total_percent, dec("99"));
        assert!(!result.reconciled);
        assert_eq!(result.per_member_amounts, decs(&["100", "98"]));
    }

    #[test]
    fn test_custom_tolerances() {
        let engine = SplitEngine::new(SplitTolerances {
            exact: dec("1"),
            percentage: dec("5"),
        });
        assert!(engine.exact(dec("100"), &decs(&["99.5"])).reconciled);
        assert!(engine.percentage(dec("10"), &decs(&["96"])).reconciled);
    }

    #[test]
    fn test_engine_from_config() {
        let config = SplitConfig {
            exact_tolerance: "0.5".to_string(),
            ..SplitConfig::default()
        };
        let engine = SplitEngine::from_config(&config).unwrap();
        assert_eq!(engine.tolerances().exact, dec("0.5"));
        assert_eq!(engine.tolerances().percentage, dec("0.1"));
    }

    #[test]
    fn test_preview_keeps_modes_independent() {
        let form = SplitForm::new(
            "120",
            SplitMode::Percentage,
            vec![
                Member::new("alice").with_exact("100").with_percentage("25"),
                Member::new("bob").included(false).with_exact("20").with_percentage("75"),
            ],
        );
        let preview = SplitEngine::default().preview(&form);

        assert_eq!(preview.equal.member_amounts, decs(&["120", "0"]));
        assert!(preview.exact.reconciled);
        assert_eq!(preview.percentage.per_member_amounts, decs(&["30", "90"]));
        assert!(preview.is_reconciled());
        assert_eq!(
            preview.active_amounts(),
            vec![("alice".to_string(), dec("30")), ("bob".to_string(), dec("90"))]
        );
    }

    #[test]
    fn test_preview_with_malformed_amount() {
        let form = SplitForm::new("lots", SplitMode::Equal, vec![Member::new("alice")]);
        let preview = SplitEngine::default().preview(&form);
        assert_eq!(preview.amount, Decimal::ZERO);
        assert_eq!(preview.equal.per_person, Decimal::ZERO);
    }
}
