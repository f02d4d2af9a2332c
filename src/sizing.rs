//! Fixed-percentage position sizing

use crate::error::{ensure_finite, BankrollError, Result};

/// Check whether a risk percentage lies in [0, 1]
///
/// Returns `Ok(false)` for an out-of-range number and `Err` for a value
/// that is not a finite number at all.
pub fn validate_risk_parameters(risk_pct: f64) -> Result<bool> {
    ensure_finite("risk_pct", risk_pct)?;
    Ok((0.0..=1.0).contains(&risk_pct))
}

/// Dollar size of a position risking `risk_pct` of `balance`
///
/// # Example
///
/// ```
/// use ag_bankroll::calculate_position_size;
///
/// assert_eq!(calculate_position_size(1000.0, 0.1).unwrap(), 100.0);
/// ```
pub fn calculate_position_size(balance: f64, risk_pct: f64) -> Result<f64> {
    ensure_finite("balance", balance)?;
    if balance < 0.0 {
        return Err(BankrollError::NegativeValue {
            name: "balance",
            value: balance,
        });
    }

    if !validate_risk_parameters(risk_pct)? {
        return Err(BankrollError::InvalidParameter(format!(
            "risk percentage must be between 0.0 and 1.0, got {}",
            risk_pct
        )));
    }

    Ok(balance * risk_pct)
}
