use anyhow::Result;
use tracing::info;

use league_predictor::config::{AppConfig, default_export_path, path_arg};
use league_predictor::export::export_predictions;
use league_predictor::logging::init_logging;
use league_predictor::store::PredictionStore;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    let cfg = AppConfig::from_env();
    let db_path = path_arg("db").unwrap_or(cfg.db_path);
    let out_path = path_arg("out").unwrap_or_else(|| default_export_path(&cfg.competition));

    let store = PredictionStore::open(&db_path)?;
    let rows = store.all()?;
    let written = export_predictions(&rows, &out_path)?;
    info!(db = %db_path.display(), rows = written, "export finished");

    println!("Exported {written} predictions to {}", out_path.display());
    Ok(())
}
