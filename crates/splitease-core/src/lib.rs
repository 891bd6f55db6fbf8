//! Split calculation engine and money handling
//!
//! - split: equal, exact and percentage distribution with reconciliation
//! - money: lenient parsing and currency display
//! - counter: eased balance counters
//! - models: form snapshots and engine output

pub mod counter;
pub mod error;
pub mod models;
pub mod money;
pub mod split;
pub mod types;

pub use counter::{ease_out_cubic, parse_balance_text, CounterAnimation};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{
    EqualSplit, ExactReconciliation, Member, PercentageReconciliation, SplitForm, SplitPreview,
};
pub use money::{format_currency, format_percent, parse_amount, parse_amounts, truncate_cents, CurrencyFormat};
pub use split::{
    compute_equal_split, compute_exact_reconciliation, compute_percentage_reconciliation,
    SplitEngine, SplitTolerances,
};
pub use types::{split_type_name, SplitMode};

pub use rust_decimal::Decimal;
