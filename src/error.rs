//! Error types for sizing, risk and projection calculations

use thiserror::Error;

/// Errors that can occur in bankroll calculations
#[derive(Error, Debug)]
pub enum BankrollError {
    #[error("Invalid probability: {0} (must be strictly between 0 and 1)")]
    InvalidProbability(f64),

    #[error("Invalid multiplier {name}: {value} (must be positive)")]
    InvalidMultiplier { name: &'static str, value: f64 },

    #[error("Invalid fraction {name}: {value} (must be in (0, 1])")]
    InvalidFraction { name: &'static str, value: f64 },

    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    #[error("Negative volatility not allowed: {0}")]
    NegativeVolatility(f64),

    #[error("Balance must be positive, got {0}")]
    NonPositiveBalance(f64),

    #[error("{name} must be non-negative, got {value}")]
    NegativeValue { name: &'static str, value: f64 },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{name} must be a finite number")]
    NotANumber { name: &'static str },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BankrollError {
    /// True for input validation failures, false for config loading failures
    pub fn is_domain(&self) -> bool {
        !matches!(
            self,
            BankrollError::Yaml(_) | BankrollError::Json(_) | BankrollError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BankrollError>;

/// Reject NaN and infinities before any range check
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BankrollError::NotANumber { name })
    }
}

/// Validate a probability in the open interval (0, 1)
pub(crate) fn ensure_probability(value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(BankrollError::InvalidProbability(value))
    }
}

pub(crate) fn ensure_positive_multiplier(name: &'static str, value: f64) -> Result<()> {
    // NaN fails the comparison and lands here too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BankrollError::InvalidMultiplier { name, value })
    }
}

/// Validate a fraction in the half-open interval (0, 1]
pub(crate) fn ensure_unit_fraction(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(BankrollError::InvalidFraction { name, value })
    }
}

pub(crate) fn ensure_confidence(value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(BankrollError::InvalidConfidenceLevel(value))
    }
}

pub(crate) fn ensure_positive_balance(value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BankrollError::NonPositiveBalance(value))
    }
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
