use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::info;

use hoopcast::config::{Command, Config};
use hoopcast::engine::{evaluate_season, Factor, Predictor};
use hoopcast::GameLog;

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let profile = config.scoring_profile()?;

    // Load the game log once; the engine only ever reads it.
    let log = GameLog::load(&config.data)?;

    match config.command {
        Command::Predict {
            team1,
            team2,
            season,
            date,
        } => {
            let cutoff = date.unwrap_or_else(|| Utc::now().date_naive());
            info!(
                "predicting {} vs {} in {} as of {} (profile: {})",
                team1, team2, season, cutoff, profile.name
            );
            let predictor = Predictor::new(&log, profile)?;
            let prediction = predictor.predict(&team1, &team2, season, cutoff)?;

            println!("Predicted winner: {}", prediction.winner);
            println!("Win probability:  {:.1}%", prediction.probability * 100.0);
            println!();
            println!("{:<10} {:>12} {:>12}", "factor", team1, team2);
            for factor in Factor::ALL {
                println!(
                    "{:<10} {:>12.4} {:>12.4}",
                    factor.label(),
                    prediction.team1_stats.get(factor),
                    prediction.team2_stats.get(factor)
                );
            }
        }
        Command::Evaluate { season } => {
            let report = evaluate_season(&log, season, profile)?;
            match report.accuracy() {
                Some(accuracy) => println!(
                    "Accuracy: {}/{} = {:.2}%",
                    report.correct,
                    report.total,
                    accuracy * 100.0
                ),
                None => println!("No games could be evaluated for {season}."),
            }
            println!("Failed predictions: {}", report.failed);
        }
        Command::Teams => {
            for team in log.teams() {
                println!("{team}");
            }
        }
    }

    Ok(())
}
