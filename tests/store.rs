use std::fs;
use std::path::PathBuf;

use league_predictor::export::export_predictions;
use league_predictor::model::PredictionResult;
use league_predictor::store::{PredictionStore, SaveOutcome};

fn result(match_id: u64, utc_date: &str, p_home: f64) -> PredictionResult {
    PredictionResult {
        match_id,
        utc_date: utc_date.to_string(),
        home_team: format!("Home {match_id}"),
        away_team: format!("Away {match_id}"),
        home_rating: 0.456_789,
        away_rating: 0.123_456,
        p_home,
        p_draw: 0.3,
        p_away: 0.7 - p_home,
        prediction: format!("Home {match_id} Win"),
    }
}

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("league_predictor_{}_{name}", std::process::id()));
    path
}

#[test]
fn duplicate_match_ids_are_skipped() {
    let store = PredictionStore::open_in_memory().unwrap();
    let first = result(537900, "2025-05-11T15:30:00Z", 0.5);

    assert_eq!(store.save(&first).unwrap(), SaveOutcome::Inserted);
    assert!(store.contains(537900).unwrap());

    let mut changed = first.clone();
    changed.prediction = "Draw".to_string();
    assert_eq!(store.save(&changed).unwrap(), SaveOutcome::Duplicate);

    let rows = store.all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].result.prediction, "Home 537900 Win");
}

#[test]
fn rows_come_back_rounded_and_ordered_by_kickoff() {
    let store = PredictionStore::open_in_memory().unwrap();
    store.save(&result(3, "2025-05-11T15:30:00Z", 0.4)).unwrap();
    store.save(&result(2, "2025-05-10T14:00:00Z", 0.4)).unwrap();
    store.save(&result(1, "2025-05-10T14:00:00Z", 0.4)).unwrap();

    let rows = store.all().unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r.result.match_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(rows[0].result.home_rating, 0.4568);
    assert_eq!(rows[0].result.away_rating, 0.1235);
    assert!(!rows[0].created_at.is_empty());
    assert!(!store.contains(4).unwrap());
}

#[test]
fn file_store_persists_between_opens() {
    let path = scratch_path("persist.db");
    let _ = fs::remove_file(&path);

    {
        let store = PredictionStore::open(&path).unwrap();
        store.save(&result(10, "2025-05-10T14:00:00Z", 0.45)).unwrap();
    }
    let reopened = PredictionStore::open(&path).unwrap();
    assert!(reopened.contains(10).unwrap());
    assert_eq!(
        reopened.save(&result(10, "2025-05-10T14:00:00Z", 0.45)).unwrap(),
        SaveOutcome::Duplicate
    );

    drop(reopened);
    let _ = fs::remove_file(&path);
}

#[test]
fn export_writes_workbook() {
    let store = PredictionStore::open_in_memory().unwrap();
    store.save(&result(1, "2025-05-10T14:00:00Z", 0.4)).unwrap();
    store.save(&result(2, "2025-05-11T14:00:00Z", 0.35)).unwrap();

    let path = scratch_path("predictions.xlsx");
    let written = export_predictions(&store.all().unwrap(), &path).unwrap();
    assert_eq!(written, 2);

    let bytes = fs::read(&path).unwrap();
    // xlsx is a zip container.
    assert_eq!(&bytes[..2], b"PK");
    let _ = fs::remove_file(&path);
}
