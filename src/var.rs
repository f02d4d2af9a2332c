//! Value at Risk (VaR) and Conditional VaR
//!
//! Implements three tail-risk estimators:
//! - Parametric VaR: Gaussian approximation, VaR = -(μ - z·σ) · value
//! - Historical VaR: empirical lower-tail return at the confidence level
//! - Conditional VaR (CVaR/Expected Shortfall): average of the tail returns
//!
//! All estimators report the *magnitude* of a loss. A tail that is not a
//! loss reports zero.

use crate::error::{ensure_confidence, ensure_finite, BankrollError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inverse standard normal CDF (percent-point function)
///
/// Rational approximation from Abramowitz & Stegun 26.2.23, absolute
/// error below 4.5e-4. Lower-half quantiles come from symmetry.
pub fn norm_ppf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(BankrollError::InvalidParameter(format!(
            "quantile probability must be in (0, 1), got {}",
            p
        )));
    }

    if p < 0.5 {
        return norm_ppf(1.0 - p).map(|z| -z);
    }

    const C0: f64 = 2.515517;
    const C1: f64 = 0.802853;
    const C2: f64 = 0.010328;
    const D1: f64 = 1.432788;
    const D2: f64 = 0.189269;
    const D3: f64 = 0.001308;

    let t = (-2.0 * (1.0 - p).ln()).sqrt();
    let numerator = C0 + C1 * t + C2 * t * t;
    let denominator = 1.0 + D1 * t + D2 * t * t + D3 * t * t * t;

    Ok(t - numerator / denominator)
}

/// Parametric (Gaussian) VaR in dollars
///
/// Formula: VaR = max(0, -(μ - z_c·σ) · portfolio_value)
pub fn parametric_var(
    mean_return: f64,
    std_return: f64,
    confidence: f64,
    portfolio_value: f64,
) -> Result<f64> {
    ensure_finite("mean_return", mean_return)?;
    ensure_confidence(confidence)?;

    if std_return < 0.0 || std_return.is_nan() {
        return Err(BankrollError::NegativeVolatility(std_return));
    }
    ensure_finite("std_return", std_return)?;

    if portfolio_value < 0.0 || portfolio_value.is_nan() {
        return Err(BankrollError::NegativeValue {
            name: "portfolio_value",
            value: portfolio_value,
        });
    }
    ensure_finite("portfolio_value", portfolio_value)?;

    let z = norm_ppf(confidence)?;
    let var_pct = -(mean_return - z * std_return);

    Ok((portfolio_value * var_pct).max(0.0))
}

/// Historical VaR as a fraction of the return series
///
/// Picks the return at index floor((1 - c) · N) of the ascending series.
pub fn historical_var(returns: &[f64], confidence: f64) -> Result<f64> {
    let sorted = sorted_returns(returns, confidence)?;

    let index = tail_cutoff(sorted.len(), confidence).min(sorted.len() - 1);
    let percentile_return = sorted[index];

    Ok(loss_magnitude(percentile_return))
}

/// Conditional VaR (Expected Shortfall) as a fraction of the return series
///
/// Averages the worst max(1, floor((1 - c) · N)) returns. The averaged tail
/// always reaches the historical VaR index, so CVaR >= VaR.
pub fn conditional_var(returns: &[f64], confidence: f64) -> Result<f64> {
    let sorted = sorted_returns(returns, confidence)?;

    let cutoff = tail_cutoff(sorted.len(), confidence).max(1);
    let tail = &sorted[..cutoff];
    let average_tail = tail.iter().sum::<f64>() / tail.len() as f64;

    Ok(loss_magnitude(average_tail))
}

fn sorted_returns(returns: &[f64], confidence: f64) -> Result<Vec<f64>> {
    if returns.is_empty() {
        return Err(BankrollError::InsufficientData(
            "returns series must not be empty".to_string(),
        ));
    }
    ensure_confidence(confidence)?;

    if returns.iter().any(|r| !r.is_finite()) {
        return Err(BankrollError::NotANumber { name: "returns" });
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

fn tail_cutoff(len: usize, confidence: f64) -> usize {
    ((1.0 - confidence) * len as f64).floor() as usize
}

fn loss_magnitude(value: f64) -> f64 {
    if value < 0.0 {
        -value
    } else {
        0.0
    }
}

/// Which estimator produced a [`RiskMeasure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureKind {
    ParametricVar,
    HistoricalVar,
    ConditionalVar,
}

/// A tail-risk figure tied to its confidence level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMeasure {
    /// Estimator used
    pub kind: MeasureKind,

    /// Loss magnitude; dollars for parametric VaR, return fraction otherwise
    pub value: f64,

    /// Confidence level (e.g., 0.95, 0.99)
    pub confidence_level: f64,

    /// Timestamp of calculation
    pub computed_at: DateTime<Utc>,
}

impl RiskMeasure {
    pub fn parametric(
        mean_return: f64,
        std_return: f64,
        confidence: f64,
        portfolio_value: f64,
    ) -> Result<Self> {
        let value = parametric_var(mean_return, std_return, confidence, portfolio_value)?;
        Ok(Self::stamped(MeasureKind::ParametricVar, value, confidence))
    }

    pub fn historical(returns: &[f64], confidence: f64) -> Result<Self> {
        let value = historical_var(returns, confidence)?;
        Ok(Self::stamped(MeasureKind::HistoricalVar, value, confidence))
    }

    pub fn conditional(returns: &[f64], confidence: f64) -> Result<Self> {
        let value = conditional_var(returns, confidence)?;
        Ok(Self::stamped(MeasureKind::ConditionalVar, value, confidence))
    }

    /// Scale a fractional measure to dollars
    pub fn in_dollars(&self, portfolio_value: f64) -> f64 {
        match self.kind {
            MeasureKind::ParametricVar => self.value,
            MeasureKind::HistoricalVar | MeasureKind::ConditionalVar => {
                self.value * portfolio_value
            }
        }
    }

    fn stamped(kind: MeasureKind, value: f64, confidence_level: f64) -> Self {
        Self {
            kind,
            value,
            confidence_level,
            computed_at: Utc::now(),
        }
    }
}
