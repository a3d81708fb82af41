use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A basketball season, e.g. "2024-2025". Stored as the start year; the end
/// year is always start + 1. Ordering follows the start year, so seasons
/// compare chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Season { start: start_year }
    }

    pub fn start_year(&self) -> i32 {
        self.start
    }

    pub fn end_year(&self) -> i32 {
        self.start + 1
    }

    /// The season immediately preceding this one ("2024-2025" → "2023-2024").
    pub fn prior(&self) -> Season {
        Season {
            start: self.start - 1,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.start + 1)
    }
}

impl FromStr for Season {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let bad = || Error::InvalidSeason(s.to_string());
        let (start, end) = s.split_once('-').ok_or_else(bad)?;
        let start: i32 = start.trim().parse().map_err(|_| bad())?;
        let end: i32 = end.trim().parse().map_err(|_| bad())?;
        if end != start + 1 {
            return Err(bad());
        }
        Ok(Season { start })
    }
}

impl TryFrom<String> for Season {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<Season> for String {
    fn from(s: Season) -> String {
        s.to_string()
    }
}

/// Result of a game from the row team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

/// One row of the game log: a single team-game with its raw box-score counts
/// and per-game derived rates, for both the team and its opponent. Each game
/// appears twice in the log, once from each team's perspective.
///
/// Column names match the cleaned CSV produced by the ingestion step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Season")]
    pub season: Season,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Opp")]
    pub opponent: String,
    #[serde(rename = "Rslt")]
    pub result: GameResult,

    // Team box score
    #[serde(rename = "eFG%")]
    pub efg_pct: f64,
    #[serde(rename = "TOV")]
    pub tov: f64,
    #[serde(rename = "TOV%")]
    pub tov_pct: f64,
    #[serde(rename = "ORB")]
    pub orb: f64,
    #[serde(rename = "ORB%")]
    pub orb_pct: f64,
    #[serde(rename = "DRB")]
    pub drb: f64,
    #[serde(rename = "FT%")]
    pub ft_pct: f64,
    #[serde(rename = "STL")]
    pub stl: f64,
    #[serde(rename = "BLK")]
    pub blk: f64,
    #[serde(rename = "FGA")]
    pub fga: f64,
    #[serde(rename = "FTA")]
    pub fta: f64,

    // Opponent box score
    #[serde(rename = "Opp_eFG%")]
    pub opp_efg_pct: f64,
    #[serde(rename = "Opp_TOV")]
    pub opp_tov: f64,
    #[serde(rename = "Opp_TOV%")]
    pub opp_tov_pct: f64,
    #[serde(rename = "Opp_ORB")]
    pub opp_orb: f64,
    #[serde(rename = "Opp_ORB%")]
    pub opp_orb_pct: f64,
    #[serde(rename = "Opp_DRB")]
    pub opp_drb: f64,
    #[serde(rename = "Opp_FT%")]
    pub opp_ft_pct: f64,
    #[serde(rename = "Opp_STL")]
    pub opp_stl: f64,
    #[serde(rename = "Opp_BLK")]
    pub opp_blk: f64,
    #[serde(rename = "Opp_FGA")]
    pub opp_fga: f64,
    #[serde(rename = "Opp_FTA")]
    pub opp_fta: f64,
}

impl GameRecord {
    /// Validate the invariants the engine relies on: non-negative counts and
    /// a non-empty team/opponent pair. Date validity is enforced earlier by
    /// deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if self.team.trim().is_empty() {
            return Err("empty team name".into());
        }
        if self.opponent.trim().is_empty() {
            return Err("empty opponent name".into());
        }
        let counts = [
            ("TOV", self.tov),
            ("ORB", self.orb),
            ("DRB", self.drb),
            ("STL", self.stl),
            ("BLK", self.blk),
            ("FGA", self.fga),
            ("FTA", self.fta),
            ("Opp_TOV", self.opp_tov),
            ("Opp_ORB", self.opp_orb),
            ("Opp_DRB", self.opp_drb),
            ("Opp_STL", self.opp_stl),
            ("Opp_BLK", self.opp_blk),
            ("Opp_FGA", self.opp_fga),
            ("Opp_FTA", self.opp_fta),
        ];
        for (name, value) in counts {
            if value < 0.0 {
                return Err(format!("negative count {name}={value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_parses_and_displays_round_trip() {
        let s: Season = "2024-2025".parse().unwrap();
        assert_eq!(s.start_year(), 2024);
        assert_eq!(s.end_year(), 2025);
        assert_eq!(s.to_string(), "2024-2025");
    }

    #[test]
    fn season_prior_decrements_both_years() {
        let s: Season = "2024-2025".parse().unwrap();
        assert_eq!(s.prior().to_string(), "2023-2024");
    }

    #[test]
    fn seasons_order_chronologically() {
        let a: Season = "2023-2024".parse().unwrap();
        let b: Season = "2024-2025".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn season_rejects_non_consecutive_years() {
        assert!("2024-2026".parse::<Season>().is_err());
        assert!("2024".parse::<Season>().is_err());
        assert!("abcd-efgh".parse::<Season>().is_err());
    }

    #[test]
    fn negative_count_fails_validation() {
        let mut rec = crate::gamelog::test_support::record("Dayton", "VCU", "2024-2025", "2024-11-10");
        rec.stl = -1.0;
        assert!(rec.validate().is_err());
    }
}
