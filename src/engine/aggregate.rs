//! Recency-weighted aggregation: collapse a window of raw box scores into
//! the six net performance metrics the linear model scores.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};

use super::profile::{Factor, WeightingScheme};
use super::window::MatchupWindow;

/// Free throws per attempt that end a possession, the standard possession
/// estimate coefficient.
const FTA_POSSESSION_FACTOR: f64 = 0.44;

/// The six derived scalars for one team over one window. Computed fresh per
/// prediction call and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedStats {
    #[serde(rename = "Net_TOV%")]
    pub net_tov_pct: f64,
    #[serde(rename = "Net_eFG%")]
    pub net_efg_pct: f64,
    #[serde(rename = "Net_FT%")]
    pub net_ft_pct: f64,
    #[serde(rename = "Net_ORB%")]
    pub net_orb_pct: f64,
    #[serde(rename = "Steal%")]
    pub steal_pct: f64,
    #[serde(rename = "Block%")]
    pub block_pct: f64,
}

impl AggregatedStats {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::NetTov => self.net_tov_pct,
            Factor::NetEfg => self.net_efg_pct,
            Factor::NetFt => self.net_ft_pct,
            Factor::NetOrb => self.net_orb_pct,
            Factor::Steal => self.steal_pct,
            Factor::Block => self.block_pct,
        }
    }
}

/// Per-game weights for a window, normalized to sum to 1. Exposed separately
/// from [`aggregate`] so the weighting itself is testable.
///
/// Fails when the raw weights sum to zero (an all-carry-over window under a
/// prior-season penalty of 0) rather than normalizing into NaN.
pub fn recency_weights(
    window: &MatchupWindow<'_>,
    cutoff: NaiveDate,
    scheme: WeightingScheme,
    prior_season_penalty: f64,
) -> Result<Vec<f64>> {
    let mut weights: Vec<f64> = window
        .games()
        .iter()
        .map(|g| {
            // Carry-over games keep their calendar distance but are never
            // "in the future" of the cutoff.
            let days = (cutoff - g.record.date).num_days().max(0) as f64;
            let base = scheme.base_weight(days);
            if g.carry_over {
                base * prior_season_penalty
            } else {
                base
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return Err(Error::InvalidInput(format!(
            "every eligible game for {} carries zero weight \
             (prior-season penalty {prior_season_penalty})",
            window.team()
        )));
    }
    for w in &mut weights {
        *w /= total;
    }
    Ok(weights)
}

/// Weighted means of the raw stat columns, accumulated in one pass.
#[derive(Debug, Default, Clone, Copy)]
struct WeightedMeans {
    efg_pct: f64,
    tov_pct: f64,
    orb_pct: f64,
    ft_pct: f64,
    stl: f64,
    blk: f64,
    opp_efg_pct: f64,
    opp_tov: f64,
    opp_tov_pct: f64,
    opp_orb_pct: f64,
    opp_ft_pct: f64,
    opp_fga: f64,
    opp_fta: f64,
}

/// Collapse a window into [`AggregatedStats`]:
///
/// 1. weight each game by recency (and the prior-season penalty for
///    carry-over games), normalized to a probability-weighted average;
/// 2. take the weighted mean of each raw stat column;
/// 3. estimate opponent possessions as `Opp_FGA + 0.44·Opp_FTA + Opp_TOV`
///    and derive Steal%/Block% per 100 opponent possessions (both defined
///    as 0 when the estimate is 0);
/// 4. net the Four Factors against the opponents' values.
///
/// Pure function of its inputs. Fails with `NoData` on an empty window,
/// which the window selector should already have ruled out.
pub fn aggregate(
    window: &MatchupWindow<'_>,
    cutoff: NaiveDate,
    scheme: WeightingScheme,
    prior_season_penalty: f64,
) -> Result<AggregatedStats> {
    // The selector never hands out an empty window, but stay defensive.
    if window.is_empty() {
        return Err(Error::NoData {
            team: window.team().to_string(),
            season: window.season(),
            cutoff,
        });
    }

    let weights = recency_weights(window, cutoff, scheme, prior_season_penalty)?;

    let mut m = WeightedMeans::default();
    for (g, w) in window.games().iter().zip(&weights) {
        let r = g.record;
        m.efg_pct += w * r.efg_pct;
        m.tov_pct += w * r.tov_pct;
        m.orb_pct += w * r.orb_pct;
        m.ft_pct += w * r.ft_pct;
        m.stl += w * r.stl;
        m.blk += w * r.blk;
        m.opp_efg_pct += w * r.opp_efg_pct;
        m.opp_tov += w * r.opp_tov;
        m.opp_tov_pct += w * r.opp_tov_pct;
        m.opp_orb_pct += w * r.opp_orb_pct;
        m.opp_ft_pct += w * r.opp_ft_pct;
        m.opp_fga += w * r.opp_fga;
        m.opp_fta += w * r.opp_fta;
    }

    let opp_possessions = m.opp_fga + FTA_POSSESSION_FACTOR * m.opp_fta + m.opp_tov;
    let (steal_pct, block_pct) = if opp_possessions > 0.0 {
        (
            m.stl / opp_possessions * 100.0,
            m.blk / opp_possessions * 100.0,
        )
    } else {
        // Degenerate window (all-zero opponent counts): rates are defined
        // as 0 rather than a division error.
        (0.0, 0.0)
    };

    Ok(AggregatedStats {
        // Forcing opponent turnovers helps; committing them hurts.
        net_tov_pct: m.opp_tov_pct - m.tov_pct,
        net_efg_pct: m.efg_pct - m.opp_efg_pct,
        net_ft_pct: m.ft_pct - m.opp_ft_pct,
        net_orb_pct: m.orb_pct - m.opp_orb_pct,
        steal_pct,
        block_pct,
    })
}
