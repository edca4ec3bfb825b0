//! Match outcome scoring: venue stats -> base ratings -> adjustments -> probabilities ->
//! label. Everything here is pure; data comes in through [`FixtureInputs`].

use tracing::debug;

use crate::adjustments::{AdjustmentContext, Ratings, StageOutcome, apply_all};
use crate::config::TeamsConfig;
use crate::error::PipelineError;
use crate::label::{Prediction, classify};
use crate::model::{Fixture, MatchRecord, PredictionResult, Standings, Venue};
use crate::probability::{OutcomeProbs, ratings_to_probs};
use crate::provider::{
    FixtureProvider, head_to_head_or_empty, standings_or_empty, team_matches_or_empty,
};
use crate::rating::base_rating;
use crate::stats::{VenueStats, compute_venue_stats};

/// Everything one prediction reads, gathered before scoring.
#[derive(Debug, Clone)]
pub struct FixtureInputs {
    pub fixture: Fixture,
    /// Home side's matches at home.
    pub home_history: Vec<MatchRecord>,
    /// Away side's matches away.
    pub away_history: Vec<MatchRecord>,
    pub head_to_head: Vec<MatchRecord>,
    pub standings: Standings,
}

impl FixtureInputs {
    /// Inputs with no history, meetings or table: every stage falls back to neutral.
    pub fn bare(fixture: Fixture) -> Self {
        Self {
            fixture,
            home_history: Vec::new(),
            away_history: Vec::new(),
            head_to_head: Vec::new(),
            standings: Standings::new(),
        }
    }
}

/// Full trace of one run, from venue stats to the label.
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub fixture: Fixture,
    pub home_stats: VenueStats,
    pub away_stats: VenueStats,
    pub base: Ratings,
    pub stages: Vec<StageOutcome>,
    pub ratings: Ratings,
    pub head_to_head: Vec<MatchRecord>,
    pub probs: OutcomeProbs,
    pub prediction: Prediction,
    pub label: String,
}

impl PredictionReport {
    pub fn result(&self) -> PredictionResult {
        PredictionResult {
            match_id: self.fixture.id,
            utc_date: self.fixture.utc_date.clone(),
            home_team: self.fixture.home_name.clone(),
            away_team: self.fixture.away_name.clone(),
            home_rating: self.ratings.home,
            away_rating: self.ratings.away,
            p_home: self.probs.home,
            p_draw: self.probs.draw,
            p_away: self.probs.away,
            prediction: self.label.clone(),
        }
    }
}

pub fn predict(
    inputs: &FixtureInputs,
    teams: &TeamsConfig,
) -> Result<PredictionReport, PipelineError> {
    let fixture = &inputs.fixture;

    let home_stats = compute_venue_stats(&inputs.home_history, fixture.home_id);
    let away_stats = compute_venue_stats(&inputs.away_history, fixture.away_id);
    let base = Ratings::new(
        base_rating(&home_stats, Venue::Home),
        base_rating(&away_stats, Venue::Away),
    );

    let ctx = AdjustmentContext {
        home_id: fixture.home_id,
        away_id: fixture.away_id,
        home_name: &fixture.home_name,
        away_name: &fixture.away_name,
        teams,
        head_to_head: &inputs.head_to_head,
        standings: &inputs.standings,
    };
    let (ratings, stages) = apply_all(base, &ctx);

    let probs = ratings_to_probs(ratings.home, ratings.away, ratings.draw_boost)?;
    let prediction = classify(&probs);
    let label = prediction.render(&fixture.home_name, &fixture.away_name);

    debug!(
        fixture_id = fixture.id,
        home_rating = ratings.home,
        away_rating = ratings.away,
        p_home = probs.home,
        p_draw = probs.draw,
        p_away = probs.away,
        %label,
        "scored fixture"
    );

    Ok(PredictionReport {
        fixture: fixture.clone(),
        home_stats,
        away_stats,
        base,
        stages,
        ratings,
        head_to_head: inputs.head_to_head.clone(),
        probs,
        prediction,
        label,
    })
}

/// Fetches the data one fixture needs. Failed fetches degrade to empty inputs.
pub fn gather_inputs(
    provider: &dyn FixtureProvider,
    fixture: &Fixture,
    standings: &Standings,
    history_limit: usize,
) -> FixtureInputs {
    FixtureInputs {
        fixture: fixture.clone(),
        home_history: team_matches_or_empty(provider, fixture.home_id, Venue::Home, history_limit),
        away_history: team_matches_or_empty(provider, fixture.away_id, Venue::Away, history_limit),
        head_to_head: head_to_head_or_empty(provider, fixture.id),
        standings: standings.clone(),
    }
}

/// Gathers inputs (standings fetched once) and scores a single fixture.
pub fn predict_with_provider(
    provider: &dyn FixtureProvider,
    fixture: &Fixture,
    teams: &TeamsConfig,
    history_limit: usize,
) -> Result<PredictionReport, PipelineError> {
    let standings = standings_or_empty(provider);
    let inputs = gather_inputs(provider, fixture, &standings, history_limit);
    predict(&inputs, teams)
}
