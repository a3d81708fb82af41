//! Scoring and prediction: apply the weight vector to each team's
//! aggregated stats and normalize the two scores into a win probability.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::gamelog::models::Season;
use crate::gamelog::GameLog;

use super::aggregate::{aggregate, AggregatedStats};
use super::profile::{Factor, ScoringProfile, WeightVector};
use super::window::select_window;

/// Linear score for one team: the dot product of the weight vector with the
/// six aggregated factors.
pub fn score(stats: &AggregatedStats, weights: &WeightVector) -> f64 {
    Factor::ALL
        .iter()
        .map(|&f| weights.get(f) * stats.get(f))
        .sum()
}

/// The outcome of one prediction call. `probability` is always the winner's,
/// in [0.5, 1.0], rounded to three decimal places.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub winner: String,
    pub probability: f64,
    /// Clamped linear scores, in caller argument order.
    pub team1_score: f64,
    pub team2_score: f64,
    /// Aggregated factors, in caller argument order, for presentation.
    pub team1_stats: AggregatedStats,
    pub team2_stats: AggregatedStats,
}

/// Stateless prediction capability over an immutable game log. Holds the
/// log by reference; any number of `predict` calls may run concurrently.
#[derive(Debug, Clone)]
pub struct Predictor<'a> {
    log: &'a GameLog,
    profile: ScoringProfile,
}

impl<'a> Predictor<'a> {
    pub fn new(log: &'a GameLog, profile: ScoringProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Predictor { log, profile })
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Predict the winner of `team1` vs `team2` as of `cutoff`, from each
    /// team's own recency-weighted history (not head-to-head only).
    ///
    /// A single deterministic pass: identical inputs always yield identical
    /// output. Ties at exactly 0.5 resolve to `team2` by the strict `>`
    /// comparison; that is a fixed tie-break, not a special case.
    pub fn predict(
        &self,
        team1: &str,
        team2: &str,
        season: Season,
        cutoff: NaiveDate,
    ) -> Result<Prediction> {
        for (label, team) in [("team1", team1), ("team2", team2)] {
            if team.trim().is_empty() {
                return Err(Error::InvalidInput(format!("{label} is required")));
            }
        }
        for team in [team1, team2] {
            if !self.log.contains_team(team) {
                return Err(Error::UnknownTeam(team.to_string()));
            }
        }

        let stats1 = self.team_stats(team1, season, cutoff)?;
        let stats2 = self.team_stats(team2, season, cutoff)?;

        let raw1 = score(&stats1, &self.profile.weights);
        let raw2 = score(&stats2, &self.profile.weights);
        for (team, raw) in [(team1, raw1), (team2, raw2)] {
            if raw.is_nan() {
                return Err(Error::DataIntegrity {
                    team: team.to_string(),
                });
            }
        }

        // A team cannot contribute negative probability mass.
        let s1 = raw1.max(0.0);
        let s2 = raw2.max(0.0);
        let total = s1 + s2;
        let p1 = if total > 0.0 { s1 / total } else { 0.5 };

        let (winner, prob) = if p1 > 0.5 {
            (team1, p1)
        } else {
            (team2, 1.0 - p1)
        };

        Ok(Prediction {
            winner: winner.to_string(),
            probability: round3(prob),
            team1_score: s1,
            team2_score: s2,
            team1_stats: stats1,
            team2_stats: stats2,
        })
    }

    /// Window + aggregate for a single team.
    pub fn team_stats(
        &self,
        team: &str,
        season: Season,
        cutoff: NaiveDate,
    ) -> Result<AggregatedStats> {
        let window = select_window(self.log, team, season, cutoff, self.profile.window)?;
        aggregate(
            &window,
            cutoff,
            self.profile.scheme,
            self.profile.prior_season_penalty,
        )
    }
}

fn round3(p: f64) -> f64 {
    (p * 1000.0).round() / 1000.0
}
