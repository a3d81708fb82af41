//! The historical game log: an immutable, in-memory table of per-team game
//! box scores, loaded once at startup and read-only for the lifetime of the
//! process. The engine never re-reads or mutates it.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

pub mod models;
use models::GameRecord;

/// Immutable game log. Construct once via [`GameLog::load`] (or
/// [`GameLog::from_records`] when the rows come from elsewhere) and share by
/// reference; any number of predictions may read it concurrently.
#[derive(Debug, Clone)]
pub struct GameLog {
    records: Vec<GameRecord>,
}

impl GameLog {
    /// Load the game log from a cleaned CSV file. Rows that fail validation
    /// (unparseable date, negative counts, empty team names) abort the load
    /// with a row-numbered error rather than being silently dropped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<GameRecord>().enumerate() {
            // Header is line 1, so the first data row is line 2.
            let line = idx + 2;
            let record = row.map_err(|e| Error::BadRecord {
                row: line,
                reason: e.to_string(),
            })?;
            record.validate().map_err(|reason| Error::BadRecord {
                row: line,
                reason,
            })?;
            records.push(record);
        }
        if records.is_empty() {
            warn!("game log {} contains no rows", path.display());
        }
        info!(
            "loaded {} game records from {}",
            records.len(),
            path.display()
        );
        Ok(GameLog { records })
    }

    /// Build a log from already-validated records (tests, alternate loaders).
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        GameLog { records }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Sorted, deduplicated list of every team that appears as a row team.
    pub fn teams(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.team.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn contains_team(&self, team: &str) -> bool {
        self.records.iter().any(|r| r.team == team)
    }

    /// All rows belonging to one team, in log order. The returned records
    /// borrow only from the log, not from `team`.
    pub fn games_for<'a>(&'a self, team: &str) -> impl Iterator<Item = &'a GameRecord> + 'a {
        let team = team.to_owned();
        self.records.iter().filter(move |r| r.team == team)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV_HEADER: &str = "Date,Season,Team,Opp,Rslt,eFG%,TOV,TOV%,ORB,ORB%,DRB,FT%,STL,BLK,FGA,FTA,Opp_eFG%,Opp_TOV,Opp_TOV%,Opp_ORB,Opp_ORB%,Opp_DRB,Opp_FT%,Opp_STL,Opp_BLK,Opp_FGA,Opp_FTA";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{CSV_HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    const ROW_DAYTON: &str = "2024-11-10,2024-2025,Dayton,VCU,W,0.50,11,0.15,10,0.30,24,0.70,6,3,58,18,0.45,12,0.20,9,0.25,22,0.65,5,2,60,20";

    #[test]
    fn load_parses_a_valid_row() {
        let file = write_csv(&[ROW_DAYTON]);
        let log = GameLog::load(file.path()).unwrap();
        assert_eq!(log.len(), 1);
        let rec = &log.records()[0];
        assert_eq!(rec.team, "Dayton");
        assert_eq!(rec.opponent, "VCU");
        assert_eq!(rec.season.to_string(), "2024-2025");
        assert_eq!(rec.result, models::GameResult::Win);
        assert_eq!(rec.opp_fga, 60.0);
    }

    #[test]
    fn load_rejects_unparseable_date_with_row_number() {
        let bad = ROW_DAYTON.replacen("2024-11-10", "not-a-date", 1);
        let file = write_csv(&[ROW_DAYTON, &bad]);
        let err = GameLog::load(file.path()).unwrap_err();
        match err {
            Error::BadRecord { row, .. } => assert_eq!(row, 3),
            other => panic!("expected BadRecord, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_negative_counts() {
        let bad = ROW_DAYTON.replacen(",6,3,", ",-6,3,", 1);
        let file = write_csv(&[&bad]);
        assert!(matches!(
            GameLog::load(file.path()),
            Err(Error::BadRecord { .. })
        ));
    }

    #[test]
    fn teams_are_sorted_and_deduplicated() {
        let log = GameLog::from_records(vec![
            test_support::record("VCU", "Dayton", "2024-2025", "2024-11-10"),
            test_support::record("Dayton", "VCU", "2024-2025", "2024-11-10"),
            test_support::record("Dayton", "Richmond", "2024-2025", "2024-11-14"),
        ]);
        assert_eq!(log.teams(), vec!["Dayton".to_string(), "VCU".to_string()]);
        assert!(log.contains_team("VCU"));
        assert!(!log.contains_team("Fordham"));
        assert_eq!(log.games_for("Dayton").count(), 2);
    }
}
