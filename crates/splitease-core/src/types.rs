//! Basic types for the split engine

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How an expense is divided among members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitMode {
    /// Split equally among all checked members
    #[serde(alias = "equal")]
    Equal,
    /// Each member owes an explicit amount
    #[serde(alias = "exact")]
    Exact,
    /// Each member owes a percentage of the total
    #[serde(alias = "percentage")]
    Percentage,
}

impl SplitMode {
    pub const ALL: [SplitMode; 3] = [SplitMode::Equal, SplitMode::Exact, SplitMode::Percentage];

    /// Name shown to users when switching tabs
    pub fn display_name(&self) -> &'static str {
        match self {
            SplitMode::Equal => "Equal",
            SplitMode::Exact => "Exact Amount",
            SplitMode::Percentage => "Percentage",
        }
    }
}

impl Default for SplitMode {
    fn default() -> Self {
        SplitMode::Equal
    }
}

impl std::str::FromStr for SplitMode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EQUAL" => Ok(SplitMode::Equal),
            "EXACT" => Ok(SplitMode::Exact),
            "PERCENTAGE" => Ok(SplitMode::Percentage),
            _ => Err(CoreError::InvalidSplitMode {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitMode::Equal => write!(f, "EQUAL"),
            SplitMode::Exact => write!(f, "EXACT"),
            SplitMode::Percentage => write!(f, "PERCENTAGE"),
        }
    }
}

/// Human name for a raw split type, falling back to the raw value
pub fn split_type_name(raw: &str) -> String {
    match raw.parse::<SplitMode>() {
        Ok(mode) => mode.display_name().to_string(),
        Err(_) => raw.to_string(),
    }
}
