//! hoopcast — college basketball matchup prediction from recency-weighted
//! Four Factors.
//!
//! The engine is a stateless capability over an immutable [`GameLog`]:
//! build the log once, pick a [`ScoringProfile`], and call
//! [`Predictor::predict`] from a CLI, a service endpoint, or anywhere else.
//! No presentation types are reachable from the engine.

pub mod config;
pub mod engine;
pub mod error;
pub mod gamelog;

pub use engine::{evaluate_season, EvalReport, Prediction, Predictor, ScoringProfile};
pub use error::{Error, Result};
pub use gamelog::GameLog;
