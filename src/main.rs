use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{error, info};

use league_predictor::config::{AppConfig, TeamsConfig, path_arg};
use league_predictor::football_data::FootballDataClient;
use league_predictor::model::Fixture;
use league_predictor::logging::init_logging;
use league_predictor::picker::pick_fixture;
use league_predictor::pipeline::predict_with_provider;
use league_predictor::provider::FixtureProvider;
use league_predictor::report::{render_report, summary_line};
use league_predictor::runner::{BatchSummary, RunOutcome, record_prediction, run_batch};
use league_predictor::store::PredictionStore;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    let mut cfg = AppConfig::from_env();
    if let Some(db) = path_arg("db") {
        cfg.db_path = db;
    }
    let teams = TeamsConfig::load(&cfg.teams_file)?;
    let client = FootballDataClient::new(cfg.require_api_key()?, cfg.competition.clone());
    let store = PredictionStore::open(&cfg.db_path)?;
    info!(db = %cfg.db_path.display(), competition = %cfg.competition, "ready");

    if std::env::args().skip(1).any(|a| a == "--all") {
        let summary = run_batch(&client, &store, &teams, cfg.upcoming_limit, cfg.history_limit)?;
        print_batch(&summary);
        Ok(())
    } else {
        run_interactive(&client, &store, &teams, &cfg)
    }
}

fn run_interactive(
    client: &FootballDataClient,
    store: &PredictionStore,
    teams: &TeamsConfig,
    cfg: &AppConfig,
) -> Result<()> {
    println!("{} Predictions", cfg.competition);
    loop {
        let upcoming = client.upcoming(cfg.upcoming_limit)?;
        if upcoming.is_empty() {
            println!("No upcoming fixtures found.");
            return Ok(());
        }

        let Some(pick) = pick_fixture(&upcoming, client.competition())? else {
            return Ok(());
        };
        let fixture = &upcoming[pick];
        predict_and_save(client, store, teams, cfg, fixture);

        if !confirm("\nPredict another? (y/n): ")? {
            return Ok(());
        }
    }
}

fn predict_and_save(
    client: &FootballDataClient,
    store: &PredictionStore,
    teams: &TeamsConfig,
    cfg: &AppConfig,
    fixture: &Fixture,
) {
    let scored = predict_with_provider(client, fixture, teams, cfg.history_limit);
    if let Ok(report) = &scored {
        println!("\n{}", render_report(report));
    }
    match record_prediction(store, fixture.id, &scored) {
        Ok(RunOutcome::Saved) => println!(
            "Saved prediction for {} vs {}",
            fixture.home_name, fixture.away_name
        ),
        Ok(RunOutcome::Duplicate) => {
            println!("Prediction already exists in DB, skipping save.")
        }
        Ok(RunOutcome::Abandoned) => println!("Prediction abandoned, nothing saved."),
        Err(err) => error!(fixture_id = fixture.id, "failed to save prediction: {err:#}"),
    }
}

fn print_batch(summary: &BatchSummary) {
    for report in &summary.reports {
        println!("{}", summary_line(report));
    }
    println!(
        "Saved {} new, {} already stored, {} abandoned",
        summary.saved, summary.duplicates, summary.abandoned
    );
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read answer")?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
