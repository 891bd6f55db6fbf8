//! Error types for splitease-ui

use thiserror::Error;

use crate::dom::NodeId;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("Stale node handle: {node}")]
    StaleNode { node: NodeId },

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Invalid tree operation: {message}")]
    InvalidTree { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<splitease_core::CoreError> for UiError {
    fn from(error: splitease_core::CoreError) -> Self {
        UiError::Config {
            message: error.to_string(),
        }
    }
}

impl From<splitease_config::ConfigError> for UiError {
    fn from(error: splitease_config::ConfigError) -> Self {
        UiError::Config {
            message: error.to_string(),
        }
    }
}

pub type UiResult<T> = Result<T, UiError>;
