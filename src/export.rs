use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::store::StoredPrediction;

const SHEET_NAME: &str = "predictions";

const HEADER: [&str; 11] = [
    "match_id",
    "date",
    "home_team",
    "away_team",
    "home_prob",
    "draw_prob",
    "away_prob",
    "home_rating",
    "away_rating",
    "prediction",
    "created_at",
];

enum Cell {
    Text(String),
    Number(f64),
}

/// Writes the predictions table to a single-sheet workbook. Returns the number of data rows.
pub fn export_predictions(rows: &[StoredPrediction], path: &Path) -> Result<usize> {
    let mut table = Vec::with_capacity(rows.len() + 1);
    table.push(HEADER.iter().map(|h| Cell::Text(h.to_string())).collect());
    table.extend(rows.iter().map(prediction_row));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        write_rows(sheet, &table)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(rows.len())
}

fn prediction_row(row: &StoredPrediction) -> Vec<Cell> {
    let r = &row.result;
    vec![
        Cell::Number(r.match_id as f64),
        Cell::Text(r.utc_date.clone()),
        Cell::Text(r.home_team.clone()),
        Cell::Text(r.away_team.clone()),
        Cell::Number(r.p_home),
        Cell::Number(r.p_draw),
        Cell::Number(r.p_away),
        Cell::Number(r.home_rating),
        Cell::Number(r.away_rating),
        Cell::Text(r.prediction.clone()),
        Cell::Text(row.created_at.clone()),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match value {
                Cell::Text(s) => worksheet.write_string(r, c, s),
                Cell::Number(n) => worksheet.write_number(r, c, *n),
            }
            .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
