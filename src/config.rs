//! Strategy profiles loaded from YAML or JSON
//!
//! A profile names a bankroll, an estimated edge and the projection and
//! search parameters to evaluate it with. Missing sections fall back to
//! their defaults.

use crate::error::{BankrollError, Result};
use crate::projection::{project_yearly_roi, ProjectionConfig, YearlyProjection};
use crate::search::{find_optimal_strategy, SearchConfig, StrategyCandidate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A complete, serializable description of a strategy to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyProfile {
    /// Human-readable profile name
    pub name: String,

    /// Starting bankroll in dollars
    pub initial_balance: f64,

    /// Estimated true probability of winning each trade
    pub win_prob: f64,

    /// Average contract price paid
    pub avg_odds: f64,

    #[serde(default)]
    pub projection: ProjectionConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl StrategyProfile {
    /// Load a profile from a YAML string
    ///
    /// # Example
    ///
    /// ```
    /// use ag_bankroll::StrategyProfile;
    ///
    /// let yaml = r#"
    /// name: quarter-kelly
    /// initial_balance: 500.0
    /// win_prob: 0.60
    /// avg_odds: 0.50
    /// projection:
    ///   num_simulations: 200
    ///   seed: 42
    /// "#;
    ///
    /// let profile = StrategyProfile::from_yaml(yaml).unwrap();
    /// assert_eq!(profile.projection.weeks, 52);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a profile from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a profile from a `.yaml`, `.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            Some("json") => Self::from_json(&contents),
            other => Err(BankrollError::InvalidParameter(format!(
                "unsupported profile format: {:?}",
                other
            ))),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Run the profile's yearly projection
    pub fn project(&self) -> Result<YearlyProjection> {
        project_yearly_roi(self.initial_balance, self.win_prob, self.avg_odds, &self.projection)
    }

    /// Run the profile's grid search
    pub fn search(&self) -> Result<Vec<StrategyCandidate>> {
        find_optimal_strategy(&self.search)
    }
}
