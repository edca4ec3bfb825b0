use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, Row, params};
use tracing::{info, warn};

use crate::model::PredictionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    /// A prediction for this match id already exists; nothing was written.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredPrediction {
    pub result: PredictionResult,
    pub created_at: String,
}

/// SQLite sink for predictions, one row per match id.
pub struct PredictionStore {
    conn: Connection,
}

impl PredictionStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)
            .with_context(|| format!("open sqlite db {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Inserts the prediction unless its match id is already stored. Probabilities and
    /// ratings are rounded to four decimals.
    pub fn save(&self, result: &PredictionResult) -> Result<SaveOutcome> {
        let changed = self
            .conn
            .execute(
                r#"
                INSERT OR IGNORE INTO predictions (
                    match_id, date, home_team, away_team,
                    home_prob, draw_prob, away_prob,
                    home_rating, away_rating, prediction, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
                params![
                    result.match_id as i64,
                    result.utc_date,
                    result.home_team,
                    result.away_team,
                    round4(result.p_home),
                    round4(result.p_draw),
                    round4(result.p_away),
                    round4(result.home_rating),
                    round4(result.away_rating),
                    result.prediction,
                    Utc::now().to_rfc3339(),
                ],
            )
            .with_context(|| format!("insert prediction {}", result.match_id))?;

        if changed == 0 {
            warn!(
                match_id = result.match_id,
                "prediction already exists in db, skipping save"
            );
            Ok(SaveOutcome::Duplicate)
        } else {
            info!(
                match_id = result.match_id,
                home = %result.home_team,
                away = %result.away_team,
                "prediction saved"
            );
            Ok(SaveOutcome::Inserted)
        }
    }

    pub fn contains(&self, match_id: u64) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM predictions WHERE match_id = ?1",
                params![match_id as i64],
                |row| row.get(0),
            )
            .context("query prediction by id")?;
        Ok(count > 0)
    }

    /// Every stored prediction, ordered by kickoff then match id.
    pub fn all(&self) -> Result<Vec<StoredPrediction>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT match_id, date, home_team, away_team,
                       home_prob, draw_prob, away_prob,
                       home_rating, away_rating, prediction, created_at
                FROM predictions
                ORDER BY date, match_id
                "#,
            )
            .context("prepare predictions query")?;
        let rows = stmt
            .query_map([], row_to_prediction)
            .context("query predictions")?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("read prediction row")?);
        }
        Ok(out)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS predictions (
            match_id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            home_prob REAL NOT NULL,
            draw_prob REAL NOT NULL,
            away_prob REAL NOT NULL,
            home_rating REAL NOT NULL,
            away_rating REAL NOT NULL,
            prediction TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_predictions_date ON predictions(date);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

fn row_to_prediction(row: &Row<'_>) -> rusqlite::Result<StoredPrediction> {
    let match_id: i64 = row.get(0)?;
    Ok(StoredPrediction {
        result: PredictionResult {
            match_id: match_id as u64,
            utc_date: row.get(1)?,
            home_team: row.get(2)?,
            away_team: row.get(3)?,
            p_home: row.get(4)?,
            p_draw: row.get(5)?,
            p_away: row.get(6)?,
            home_rating: row.get(7)?,
            away_rating: row.get(8)?,
            prediction: row.get(9)?,
        },
        created_at: row.get(10)?,
    })
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
