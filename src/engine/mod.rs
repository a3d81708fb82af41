//! The matchup probability engine: window selection, recency-weighted
//! aggregation, linear scoring, and batch evaluation. Everything here is a
//! pure, synchronous function of its inputs; the game log is only ever read.

pub mod aggregate;
pub mod evaluate;
pub mod predictor;
pub mod profile;
pub mod window;

pub use aggregate::AggregatedStats;
pub use evaluate::{evaluate_season, EvalReport};
pub use predictor::{Prediction, Predictor};
pub use profile::{Factor, ScoringProfile, WeightVector, WeightingScheme};
pub use window::{select_window, MatchupWindow, WindowPolicy};
