use chrono::NaiveDate;
use thiserror::Error;

use crate::gamelog::models::Season;

/// Engine error taxonomy. Every failure propagates to the caller as a typed
/// result; the engine never retries and never substitutes a fallback
/// prediction.
#[derive(Debug, Error)]
pub enum Error {
    /// A team has zero eligible games before the cutoff date.
    #[error("no games for {team} in {season} before {cutoff}")]
    NoData {
        team: String,
        season: Season,
        cutoff: NaiveDate,
    },

    /// A computed score or metric came out not-a-number, typically from
    /// missing or corrupted box-score fields upstream.
    #[error("score for {team} is not a number (corrupt box-score data?)")]
    DataIntegrity { team: String },

    /// The caller omitted a required team identifier.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The caller named a team that does not appear in the game log.
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    /// A season string that is not of the form "YYYY-YYYY" with consecutive
    /// years.
    #[error("invalid season {0:?}: expected \"YYYY-YYYY\" with end = start + 1")]
    InvalidSeason(String),

    /// A game-log row that failed validation (bad date, negative count).
    #[error("game log row {row}: {reason}")]
    BadRecord { row: usize, reason: String },

    /// Weight-vector configuration that does not name exactly the six
    /// factors.
    #[error("bad weight vector: {0}")]
    BadWeights(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
