//! Scores fixtures and hands successful runs to the store. A run that fails its
//! probability checks is logged and dropped; nothing of it is persisted.

use anyhow::Result;
use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::config::TeamsConfig;
use crate::error::PipelineError;
use crate::pipeline::{FixtureInputs, PredictionReport, gather_inputs, predict};
use crate::provider::{FixtureProvider, standings_or_empty};
use crate::store::{PredictionStore, SaveOutcome};

pub type Scored = Result<PredictionReport, PipelineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Saved,
    Duplicate,
    Abandoned,
}

/// Saves an `Ok` run; an `Err` run is logged and abandoned.
pub fn record_prediction(
    store: &PredictionStore,
    fixture_id: u64,
    scored: &Scored,
) -> Result<RunOutcome> {
    let report = match scored {
        Ok(report) => report,
        Err(err) => {
            error!(fixture_id, "prediction abandoned: {err}");
            return Ok(RunOutcome::Abandoned);
        }
    };
    Ok(match store.save(&report.result())? {
        SaveOutcome::Inserted => RunOutcome::Saved,
        SaveOutcome::Duplicate => RunOutcome::Duplicate,
    })
}

/// Independent fixtures scored in parallel, returned in input order.
pub fn score_all(inputs: &[FixtureInputs], teams: &TeamsConfig) -> Vec<(u64, Scored)> {
    inputs
        .par_iter()
        .map(|input| (input.fixture.id, predict(input, teams)))
        .collect()
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Successful runs, in fixture order, whether or not they were newly stored.
    pub reports: Vec<PredictionReport>,
    pub saved: usize,
    pub duplicates: usize,
    pub abandoned: usize,
    pub failed_saves: usize,
}

pub fn save_all(store: &PredictionStore, scored: Vec<(u64, Scored)>) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for (fixture_id, run) in scored {
        match record_prediction(store, fixture_id, &run) {
            Ok(RunOutcome::Saved) => summary.saved += 1,
            Ok(RunOutcome::Duplicate) => summary.duplicates += 1,
            Ok(RunOutcome::Abandoned) => summary.abandoned += 1,
            Err(err) => {
                warn!(fixture_id, "failed to save prediction: {err:#}");
                summary.failed_saves += 1;
            }
        }
        if let Ok(report) = run {
            summary.reports.push(report);
        }
    }
    summary
}

/// Every upcoming fixture: inputs fetched one after another (standings once), scoring in
/// parallel, then each run saved.
pub fn run_batch(
    provider: &dyn FixtureProvider,
    store: &PredictionStore,
    teams: &TeamsConfig,
    upcoming_limit: usize,
    history_limit: usize,
) -> Result<BatchSummary> {
    let upcoming = provider.upcoming(upcoming_limit)?;
    let standings = standings_or_empty(provider);
    let inputs = upcoming
        .iter()
        .map(|f| gather_inputs(provider, f, &standings, history_limit))
        .collect::<Vec<_>>();

    let summary = save_all(store, score_all(&inputs, teams));
    info!(
        fixtures = upcoming.len(),
        saved = summary.saved,
        duplicates = summary.duplicates,
        abandoned = summary.abandoned,
        "batch complete"
    );
    Ok(summary)
}
