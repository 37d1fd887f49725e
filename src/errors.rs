//! Error types shared across the crate.
//!
//! Library code returns these typed errors; the GUI and `main` wrap them in
//! `anyhow::Result` like every other application-level failure.

use std::time::Duration;
use thiserror::Error;

use crate::notification::{Notification, Severity};

/// How long the "maximum amount" warning stays on screen.
pub const MAX_AMOUNT_WARNING_DURATION: Duration = Duration::from_millis(3000);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address cannot be empty")]
    Empty,
    #[error("Invalid raw address '{0}': expected <workchain>:<64 hex chars>")]
    InvalidRaw(String),
    #[error("Invalid address '{input}': {reason}")]
    InvalidFriendly { input: String, reason: String },
    #[error("Address checksum mismatch: expected {expected:04x}, got {actual:04x}")]
    Checksum { expected: u16, actual: u16 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount cannot be empty")]
    Empty,
    #[error("Amount cannot be negative")]
    Negative,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("At most {decimals} decimal places are allowed")]
    TooPrecise { decimals: u8 },
    #[error("Amount is too large")]
    Overflow,
}

/// Reasons a burn is refused before anything is sent to the wallet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BurnRejection {
    #[error("Minimum amount to burn is 1 {symbol}")]
    MinimumAmount { symbol: String },
    #[error("Maximum amount to burn is {balance}")]
    MaximumAmount { balance: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
}

impl BurnRejection {
    /// Warning notification shown to the user for this rejection.
    pub fn notification(&self) -> Notification {
        let notification = Notification::new(self.to_string(), Severity::Warning);
        match self {
            BurnRejection::MaximumAmount { .. } => {
                notification.with_duration(MAX_AMOUNT_WARNING_DURATION)
            }
            _ => notification,
        }
    }
}

/// Failure reported by a deploy controller for a submitted burn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BurnError {
    /// The wallet or network refused the burn and said why.
    #[error("{0}")]
    Failed(String),
    /// The burn was dropped without an explanation (e.g. the wallet prompt
    /// was dismissed).
    #[error("burn aborted")]
    Aborted,
}

impl BurnError {
    pub fn failed(message: impl Into<String>) -> Self {
        BurnError::Failed(message.into())
    }

    /// Human readable message, if the failure carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            BurnError::Failed(message) => Some(message.as_str()),
            BurnError::Aborted => None,
        }
    }
}
