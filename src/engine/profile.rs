//! Scoring profiles: named bundles of {weight vector, recency weighting
//! scheme, window-selection policy}. The caller picks one explicitly; the
//! engine itself has no implicit default behaviour.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::window::WindowPolicy;

/// Default exponential-decay scale in days. Gives an effective half-life of
/// about three weeks, so recent games dominate.
pub const DEFAULT_DECAY_SCALE_DAYS: f64 = 30.0;

/// Default multiplier applied to carried-over prior-season games: they count
/// at 10% of an equivalent-recency current-season game.
pub const DEFAULT_PRIOR_SEASON_PENALTY: f64 = 0.1;

/// The six per-team metrics the linear model scores. Serde names match the
/// column labels used by the offline weight-fitting procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    #[serde(rename = "Net_TOV%")]
    NetTov,
    #[serde(rename = "Net_eFG%")]
    NetEfg,
    #[serde(rename = "Net_FT%")]
    NetFt,
    #[serde(rename = "Net_ORB%")]
    NetOrb,
    #[serde(rename = "Steal%")]
    Steal,
    #[serde(rename = "Block%")]
    Block,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::NetTov,
        Factor::NetEfg,
        Factor::NetFt,
        Factor::NetOrb,
        Factor::Steal,
        Factor::Block,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::NetTov => "Net_TOV%",
            Factor::NetEfg => "Net_eFG%",
            Factor::NetFt => "Net_FT%",
            Factor::NetOrb => "Net_ORB%",
            Factor::Steal => "Steal%",
            Factor::Block => "Block%",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Linear-model coefficients, one per [`Factor`]. Produced by an external
/// regression over historical net-factor/outcome pairs; the engine treats
/// them as opaque, already-calibrated configuration and never fits them.
///
/// A JSON weight file must name exactly the six factors:
/// `{"Net_TOV%": 0.43, "Net_eFG%": 0.41, ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightVector {
    #[serde(rename = "Net_TOV%")]
    pub net_tov: f64,
    #[serde(rename = "Net_eFG%")]
    pub net_efg: f64,
    #[serde(rename = "Net_FT%")]
    pub net_ft: f64,
    #[serde(rename = "Net_ORB%")]
    pub net_orb: f64,
    #[serde(rename = "Steal%")]
    pub steal: f64,
    #[serde(rename = "Block%")]
    pub block: f64,
}

impl Default for WeightVector {
    /// The calibrated coefficients from the reference regression run.
    fn default() -> Self {
        WeightVector {
            net_tov: 0.43,
            net_efg: 0.41,
            net_ft: 0.11,
            net_orb: 0.04,
            steal: 0.005,
            block: 0.005,
        }
    }
}

impl WeightVector {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::NetTov => self.net_tov,
            Factor::NetEfg => self.net_efg,
            Factor::NetFt => self.net_ft,
            Factor::NetOrb => self.net_orb,
            Factor::Steal => self.steal,
            Factor::Block => self.block,
        }
    }

    /// Load a weight vector from a JSON file. Unknown or missing keys fail
    /// deserialization; non-finite coefficients fail validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let weights: WeightVector = serde_json::from_str(&text)?;
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for factor in Factor::ALL {
            let w = self.get(factor);
            if !w.is_finite() {
                return Err(Error::BadWeights(format!(
                    "coefficient for {factor} is not finite: {w}"
                )));
            }
        }
        Ok(())
    }
}

/// How much each game in a window counts toward the aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightingScheme {
    /// `w = exp(-days_before_cutoff / scale_days)`.
    Exponential { scale_days: f64 },
    /// Every game counts equally (plain per-window mean).
    Uniform,
}

impl WeightingScheme {
    /// Base weight for a game `days` before the cutoff, before the
    /// prior-season penalty and normalization.
    pub fn base_weight(&self, days: f64) -> f64 {
        match self {
            WeightingScheme::Exponential { scale_days } => (-days / scale_days).exp(),
            WeightingScheme::Uniform => 1.0,
        }
    }
}

/// A complete, named scoring configuration. The repository historically grew
/// several divergent copies of the engine with different feature sets and
/// constants; those are consolidated here as explicit profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    pub name: String,
    pub weights: WeightVector,
    pub scheme: WeightingScheme,
    pub window: WindowPolicy,
    /// Multiplier for carried-over prior-season games. Ignored under
    /// `WindowPolicy::CurrentSeasonOnly`.
    pub prior_season_penalty: f64,
}

impl ScoringProfile {
    /// The default profile: exponential recency decay over the current
    /// season plus down-weighted prior-season carry-over.
    pub fn recency() -> Self {
        ScoringProfile {
            name: "recency".to_string(),
            weights: WeightVector::default(),
            scheme: WeightingScheme::Exponential {
                scale_days: DEFAULT_DECAY_SCALE_DAYS,
            },
            window: WindowPolicy::WithCarryOver,
            prior_season_penalty: DEFAULT_PRIOR_SEASON_PENALTY,
        }
    }

    /// Season-average profile: uniform weights over current-season games
    /// only. Matches the season-means variant of the model.
    pub fn season_average() -> Self {
        ScoringProfile {
            name: "season-average".to_string(),
            weights: WeightVector::default(),
            scheme: WeightingScheme::Uniform,
            window: WindowPolicy::CurrentSeasonOnly,
            prior_season_penalty: 1.0,
        }
    }

    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if let WeightingScheme::Exponential { scale_days } = self.scheme {
            if !(scale_days > 0.0) {
                return Err(Error::InvalidInput(format!(
                    "decay scale must be positive, got {scale_days}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.prior_season_penalty) {
            return Err(Error::InvalidInput(format!(
                "prior-season penalty must be in [0, 1], got {}",
                self.prior_season_penalty
            )));
        }
        Ok(())
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        ScoringProfile::recency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_weights_match_calibrated_vector() {
        let w = WeightVector::default();
        assert_relative_eq!(w.get(Factor::NetTov), 0.43);
        assert_relative_eq!(w.get(Factor::NetEfg), 0.41);
        assert_relative_eq!(w.get(Factor::NetFt), 0.11);
        assert_relative_eq!(w.get(Factor::NetOrb), 0.04);
        assert_relative_eq!(w.get(Factor::Steal), 0.005);
        assert_relative_eq!(w.get(Factor::Block), 0.005);
    }

    #[test]
    fn weight_json_rejects_unknown_keys() {
        let json = r#"{
            "Net_TOV%": 0.43, "Net_eFG%": 0.41, "Net_FT%": 0.11,
            "Net_ORB%": 0.04, "Steal%": 0.005, "Block%": 0.005,
            "Net_AST%": 0.2
        }"#;
        assert!(serde_json::from_str::<WeightVector>(json).is_err());
    }

    #[test]
    fn weight_json_rejects_missing_keys() {
        let json = r#"{"Net_TOV%": 0.43}"#;
        assert!(serde_json::from_str::<WeightVector>(json).is_err());
    }

    #[test]
    fn weight_json_round_trips_by_factor_label() {
        let w = WeightVector::default();
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"Net_eFG%\":0.41"));
        let back: WeightVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn exponential_weight_decays_with_days() {
        let scheme = WeightingScheme::Exponential { scale_days: 30.0 };
        assert_relative_eq!(scheme.base_weight(0.0), 1.0);
        assert!(scheme.base_weight(10.0) > scheme.base_weight(20.0));
        assert_relative_eq!(scheme.base_weight(30.0), (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn uniform_weight_ignores_days() {
        let scheme = WeightingScheme::Uniform;
        assert_relative_eq!(scheme.base_weight(0.0), scheme.base_weight(200.0));
    }

    #[test]
    fn non_finite_weight_fails_validation() {
        let w = WeightVector {
            net_efg: f64::NAN,
            ..WeightVector::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn zero_decay_scale_fails_validation() {
        let mut p = ScoringProfile::recency();
        p.scheme = WeightingScheme::Exponential { scale_days: 0.0 };
        assert!(p.validate().is_err());
    }
}
