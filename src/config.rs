use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::engine::profile::{ScoringProfile, WeightVector, WeightingScheme};
use crate::error::Result;
use crate::gamelog::models::Season;

/// College basketball matchup predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "hoopcast", version, about)]
pub struct Config {
    /// Path to the cleaned game-log CSV
    #[arg(long, env = "HOOPCAST_DATA", default_value = "cleaned_win_prob_data.csv")]
    pub data: PathBuf,

    /// Named scoring profile
    #[arg(long, value_enum, default_value_t = ProfileKind::Recency)]
    pub profile: ProfileKind,

    /// JSON file overriding the six model coefficients
    #[arg(long, env = "HOOPCAST_WEIGHTS")]
    pub weights: Option<PathBuf>,

    /// Override the exponential recency-decay scale, in days
    #[arg(long)]
    pub decay_days: Option<f64>,

    /// Override the prior-season carry-over penalty factor (0.0–1.0)
    #[arg(long)]
    pub prior_penalty: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileKind {
    /// Exponential recency decay with prior-season carry-over (default)
    Recency,
    /// Uniform season averages, current season only
    SeasonAverage,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict the winner of a single matchup
    Predict {
        /// First team
        #[arg(long)]
        team1: String,
        /// Second team
        #[arg(long)]
        team2: String,
        /// Season the matchup belongs to, e.g. 2024-2025
        #[arg(long)]
        season: Season,
        /// Reference date (YYYY-MM-DD); only games before it count.
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Backtest the model over every logged game of a season
    Evaluate {
        /// Season to replay, e.g. 2024-2025
        #[arg(long)]
        season: Season,
    },
    /// List the teams present in the game log
    Teams,
}

impl Config {
    /// Resolve the flags into a validated [`ScoringProfile`].
    pub fn scoring_profile(&self) -> Result<ScoringProfile> {
        let mut profile = match self.profile {
            ProfileKind::Recency => ScoringProfile::recency(),
            ProfileKind::SeasonAverage => ScoringProfile::season_average(),
        };
        if let Some(path) = &self.weights {
            profile.weights = WeightVector::from_json_file(path)?;
        }
        if let Some(scale_days) = self.decay_days {
            profile.scheme = WeightingScheme::Exponential { scale_days };
        }
        if let Some(penalty) = self.prior_penalty {
            profile.prior_season_penalty = penalty;
        }
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::window::WindowPolicy;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(args).unwrap()
    }

    #[test]
    fn predict_args_parse() {
        let config = parse(&[
            "hoopcast",
            "--data",
            "games.csv",
            "predict",
            "--team1",
            "Dayton",
            "--team2",
            "VCU",
            "--season",
            "2024-2025",
            "--date",
            "2025-01-15",
        ]);
        match config.command {
            Command::Predict {
                team1,
                team2,
                season,
                date,
            } => {
                assert_eq!(team1, "Dayton");
                assert_eq!(team2, "VCU");
                assert_eq!(season.to_string(), "2024-2025");
                assert_eq!(date, Some("2025-01-15".parse().unwrap()));
            }
            other => panic!("expected predict, got {other:?}"),
        }
    }

    #[test]
    fn bad_season_flag_is_a_parse_error() {
        let result = Config::try_parse_from([
            "hoopcast", "predict", "--team1", "A", "--team2", "B", "--season", "2024",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn profile_flags_shape_the_scoring_profile() {
        let config = parse(&["hoopcast", "--profile", "season-average", "teams"]);
        let profile = config.scoring_profile().unwrap();
        assert_eq!(profile.window, WindowPolicy::CurrentSeasonOnly);
        assert_eq!(profile.scheme, WeightingScheme::Uniform);

        let config = parse(&[
            "hoopcast",
            "--decay-days",
            "14",
            "--prior-penalty",
            "0.2",
            "teams",
        ]);
        let profile = config.scoring_profile().unwrap();
        assert_eq!(
            profile.scheme,
            WeightingScheme::Exponential { scale_days: 14.0 }
        );
        assert_eq!(profile.prior_season_penalty, 0.2);
    }

    #[test]
    fn out_of_range_penalty_fails_validation() {
        let config = parse(&["hoopcast", "--prior-penalty", "1.5", "teams"]);
        assert!(config.scoring_profile().is_err());
    }
}
