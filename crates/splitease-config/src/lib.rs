//! Configuration management for splitease
//!
//! This module handles loading, validation, and management of
//! the page glue configuration from YAML files.

pub mod error;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub use error::{ConfigError, ConfigErrorDetails, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol prefixed (or suffixed) to every displayed amount
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator (empty disables grouping)
    #[serde(default)]
    pub thousands_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: String::new(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

impl Default for SymbolPosition {
    fn default() -> Self {
        SymbolPosition::Before
    }
}

/// Toast notification timings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a toast stays visible before fading
    #[serde(default = "default_toast_duration")]
    pub default_duration_ms: u64,
    /// Delay between fade start and removal
    #[serde(default = "default_fade_out")]
    pub fade_out_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_toast_duration(),
            fade_out_ms: default_fade_out(),
        }
    }
}

fn default_toast_duration() -> u64 {
    4000
}

fn default_fade_out() -> u64 {
    300
}

/// Server-rendered alert banners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Delay before an alert banner starts fading
    #[serde(default = "default_alert_dismiss")]
    pub auto_dismiss_ms: u64,
    #[serde(default = "default_fade_out")]
    pub fade_out_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: default_alert_dismiss(),
            fade_out_ms: default_fade_out(),
        }
    }
}

fn default_alert_dismiss() -> u64 {
    5000
}

/// Page loader and button busy state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Text shown by the page overlay when none is given
    #[serde(default = "default_loader_text")]
    pub default_text: String,
    /// Label swapped onto a busy button
    #[serde(default = "default_busy_label")]
    pub busy_label: String,
    /// Delay before the server-rendered page loader is hidden
    #[serde(default = "default_page_loader_delay")]
    pub page_loader_hide_delay_ms: u64,
    /// Delay before the progress bar is hidden
    #[serde(default = "default_progress_delay")]
    pub progress_hide_delay_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_text: default_loader_text(),
            busy_label: default_busy_label(),
            page_loader_hide_delay_ms: default_page_loader_delay(),
            progress_hide_delay_ms: default_progress_delay(),
        }
    }
}

fn default_loader_text() -> String {
    "Loading...".to_string()
}

fn default_busy_label() -> String {
    "Processing...".to_string()
}

fn default_page_loader_delay() -> u64 {
    300
}

fn default_progress_delay() -> u64 {
    500
}

/// Split calculation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Allowed gap between the exact-amount sum and the expense amount
    #[serde(default = "default_exact_tolerance")]
    pub exact_tolerance: String,
    /// Allowed gap between the percentage sum and 100
    #[serde(default = "default_percentage_tolerance")]
    pub percentage_tolerance: String,
    /// Debounce window for amount edits (0 recalculates immediately)
    #[serde(default)]
    pub recalc_debounce_ms: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            exact_tolerance: default_exact_tolerance(),
            percentage_tolerance: default_percentage_tolerance(),
            recalc_debounce_ms: 0,
        }
    }
}

fn default_exact_tolerance() -> String {
    "0.01".to_string()
}

fn default_percentage_tolerance() -> String {
    "0.1".to_string()
}

impl SplitConfig {
    /// Exact-split tolerance as a decimal
    pub fn exact_tolerance(&self) -> ConfigResult<Decimal> {
        parse_tolerance("split.exact_tolerance", &self.exact_tolerance)
    }

    /// Percentage-split tolerance as a decimal
    pub fn percentage_tolerance(&self) -> ConfigResult<Decimal> {
        parse_tolerance("split.percentage_tolerance", &self.percentage_tolerance)
    }
}

fn parse_tolerance(field: &str, raw: &str) -> ConfigResult<Decimal> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("'{}' is not a decimal number", raw),
    })?;
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "Tolerance must not be negative".to_string(),
        });
    }
    Ok(value)
}

/// Animated balance counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u64,
    /// Interval between animation frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: default_counter_duration(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

fn default_counter_duration() -> u64 {
    800
}

fn default_frame_interval() -> u64 {
    16
}

/// Navigation highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Link that is only active on an exact path match
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            dashboard_path: default_dashboard_path(),
        }
    }
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Toast settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Alert banner settings
    #[serde(default)]
    pub alerts: AlertConfig,
    /// Loader settings
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Split calculation settings
    #[serde(default)]
    pub split: SplitConfig,
    /// Counter animation settings
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Navigation settings
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.currency.symbol.is_empty() {
            return Err(ConfigError::MissingField {
                field: "currency.symbol".to_string(),
            });
        }

        self.split.exact_tolerance()?;
        self.split.percentage_tolerance()?;

        if self.animation.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "animation.frame_interval_ms".to_string(),
                reason: "Frame interval must be greater than 0".to_string(),
            });
        }

        if !self.navigation.dashboard_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "navigation.dashboard_path".to_string(),
                reason: "Paths must start with '/'".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}
