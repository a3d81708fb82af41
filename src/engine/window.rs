//! Window selection: which of a team's logged games are eligible to inform
//! a prediction at a given cutoff date.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::gamelog::models::{GameRecord, Season};
use crate::gamelog::GameLog;

/// Which seasons feed the window. The engine variants historically
/// disagreed on prior-season carry-over; the policy is now explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Current-season games before the cutoff, plus every game from the
    /// immediately preceding season (tagged so the aggregator can
    /// down-weight them).
    WithCarryOver,
    /// Current-season games before the cutoff only.
    CurrentSeasonOnly,
}

/// One eligible game, tagged with whether it was carried over from the
/// prior season.
#[derive(Debug, Clone, Copy)]
pub struct WindowedGame<'a> {
    pub record: &'a GameRecord,
    pub carry_over: bool,
}

/// An ordered-by-date window of one team's eligible games. Non-empty by
/// construction: selection fails with `NoData` instead of producing an
/// empty window.
#[derive(Debug, Clone)]
pub struct MatchupWindow<'a> {
    team: String,
    season: Season,
    games: Vec<WindowedGame<'a>>,
}

impl<'a> MatchupWindow<'a> {
    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn games(&self) -> &[WindowedGame<'a>] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Select `team`'s eligible games from the log: current-season games
/// strictly before `cutoff`, plus (under [`WindowPolicy::WithCarryOver`])
/// all of the prior season's games regardless of date. Result is sorted
/// ascending by date. Pure read over the log.
pub fn select_window<'a>(
    log: &'a GameLog,
    team: &str,
    season: Season,
    cutoff: NaiveDate,
    policy: WindowPolicy,
) -> Result<MatchupWindow<'a>> {
    let prior = season.prior();
    let mut games: Vec<WindowedGame<'a>> = log
        .games_for(team)
        .filter_map(|record| {
            if record.season == season && record.date < cutoff {
                Some(WindowedGame {
                    record,
                    carry_over: false,
                })
            } else if record.season == prior && policy == WindowPolicy::WithCarryOver {
                Some(WindowedGame {
                    record,
                    carry_over: true,
                })
            } else {
                None
            }
        })
        .collect();
    games.sort_by_key(|g| g.record.date);

    if games.is_empty() {
        return Err(Error::NoData {
            team: team.to_string(),
            season,
            cutoff,
        });
    }
    Ok(MatchupWindow {
        team: team.to_string(),
        season,
        games,
    })
}
