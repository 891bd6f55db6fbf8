//! Form snapshot and preview models

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::parse_amount;
use crate::types::SplitMode;

/// One participant as entered on the expense form.
///
/// Inputs are kept exactly as typed; each split mode reads only its own field,
/// so switching modes never clears the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier
    pub id: String,
    /// Display name (defaults to the id)
    #[serde(default)]
    pub name: Option<String>,
    /// Participation flag for equal splits
    #[serde(default = "default_included")]
    pub included: bool,
    /// Raw exact-amount input
    #[serde(default, deserialize_with = "raw_input")]
    pub exact_amount: Option<String>,
    /// Raw percentage input
    #[serde(default, deserialize_with = "raw_input")]
    pub percentage: Option<String>,
}

fn default_included() -> bool {
    true
}

impl Member {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            included: true,
            exact_amount: None,
            percentage: None,
        }
    }

    pub fn included(mut self, included: bool) -> Self {
        self.included = included;
        self
    }

    pub fn with_exact(mut self, raw: impl Into<String>) -> Self {
        self.exact_amount = Some(raw.into());
        self
    }

    pub fn with_percentage(mut self, raw: impl Into<String>) -> Self {
        self.percentage = Some(raw.into());
        self
    }

    /// Name to show next to the member's row
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Parsed exact amount (missing or malformed is zero)
    pub fn exact_value(&self) -> Decimal {
        parse_amount(self.exact_amount.as_deref().unwrap_or(""))
    }

    /// Parsed percentage (missing or malformed is zero)
    pub fn percentage_value(&self) -> Decimal {
        parse_amount(self.percentage.as_deref().unwrap_or(""))
    }
}

/// Snapshot of the expense form at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitForm {
    /// Raw expense amount input
    #[serde(default, deserialize_with = "raw_amount")]
    pub amount: String,
    /// Active split mode
    #[serde(default)]
    pub mode: SplitMode,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl SplitForm {
    pub fn new(amount: impl Into<String>, mode: SplitMode, members: Vec<Member>) -> Self {
        Self {
            amount: amount.into(),
            mode,
            members,
        }
    }

    /// Decode a snapshot from YAML
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let form: SplitForm = serde_yaml::from_str(content).map_err(|e| CoreError::InvalidFormat {
            message: e.to_string(),
        })?;

        let mut seen = std::collections::HashSet::new();
        for member in &form.members {
            if !seen.insert(member.id.as_str()) {
                return Err(CoreError::InvalidFormat {
                    message: format!("duplicate member id '{}'", member.id),
                });
            }
        }

        Ok(form)
    }

    /// Parsed expense amount (malformed is zero)
    pub fn amount_value(&self) -> Decimal {
        parse_amount(&self.amount)
    }

    pub fn included_flags(&self) -> Vec<bool> {
        self.members.iter().map(|m| m.included).collect()
    }

    pub fn exact_values(&self) -> Vec<Decimal> {
        self.members.iter().map(Member::exact_value).collect()
    }

    pub fn percentage_values(&self) -> Vec<Decimal> {
        self.members.iter().map(Member::percentage_value).collect()
    }
}

/// Accept strings or bare YAML numbers for raw inputs
fn raw_input<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn raw_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_input(deserializer)?.unwrap_or_default())
}

// ==================== Engine Output ====================

/// Result of an equal split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualSplit {
    /// Untruncated `amount / checked_count`
    pub per_person: Decimal,
    pub checked_count: usize,
    /// Amount owed per member, in input order (zero when unchecked)
    pub member_amounts: Vec<Decimal>,
}

/// Result of reconciling exact amounts with the expense amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactReconciliation {
    /// Parsed entries, in input order
    pub values: Vec<Decimal>,
    pub sum: Decimal,
    pub amount: Decimal,
    pub reconciled: bool,
}

impl ExactReconciliation {
    /// Amount still to be assigned (negative when over-assigned), clamped to the `Decimal` range
    pub fn remaining(&self) -> Decimal {
        self.amount.saturating_sub(self.sum)
    }
}

/// Result of reconciling percentages with 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageReconciliation {
    pub per_member_amounts: Vec<Decimal>,
    pub total_percent: Decimal,
    pub reconciled: bool,
}

/// Every derived value of a form snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPreview {
    pub mode: SplitMode,
    pub amount: Decimal,
    pub member_ids: Vec<String>,
    pub equal: EqualSplit,
    pub exact: ExactReconciliation,
    pub percentage: PercentageReconciliation,
}

impl SplitPreview {
    /// Whether the active mode's inputs add up
    pub fn is_reconciled(&self) -> bool {
        match self.mode {
            SplitMode::Equal => self.equal.checked_count > 0,
            SplitMode::Exact => self.exact.reconciled,
            SplitMode::Percentage => self.percentage.reconciled,
        }
    }

    /// Amount owed per member under the active mode
    pub fn active_amounts(&self) -> Vec<(String, Decimal)> {
        let amounts: Vec<Decimal> = match self.mode {
            SplitMode::Equal => self.equal.member_amounts.clone(),
            SplitMode::Exact => self.exact.values.clone(),
            SplitMode::Percentage => self.percentage.per_member_amounts.clone(),
        };
        self.member_ids.iter().cloned().zip(amounts).collect()
    }
}
