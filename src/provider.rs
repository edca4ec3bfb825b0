use anyhow::Result;
use tracing::warn;

use crate::adjustments::H2H_WINDOW;
use crate::model::{Fixture, MatchRecord, Standings, Venue};

/// Source of fixtures, per-team history, head-to-head meetings and the league table.
pub trait FixtureProvider {
    /// Scheduled fixtures, earliest first, at most `limit`.
    fn upcoming(&self, limit: usize) -> Result<Vec<Fixture>>;

    /// Finished matches for `team_id` at `venue`, in the order the source returns them.
    fn team_matches(&self, team_id: u32, venue: Venue, limit: usize) -> Result<Vec<MatchRecord>>;

    /// Previous meetings of the two sides of `fixture_id`, as ordered by the source.
    fn head_to_head(&self, fixture_id: u64, limit: usize) -> Result<Vec<MatchRecord>>;

    fn standings(&self) -> Result<Standings>;
}

/// History for one side, or empty (neutral stats) when the fetch fails.
pub fn team_matches_or_empty(
    provider: &dyn FixtureProvider,
    team_id: u32,
    venue: Venue,
    limit: usize,
) -> Vec<MatchRecord> {
    provider
        .team_matches(team_id, venue, limit)
        .unwrap_or_else(|err| {
            warn!(team_id, venue = venue.as_query(), "team history unavailable: {err:#}");
            Vec::new()
        })
}

pub fn head_to_head_or_empty(provider: &dyn FixtureProvider, fixture_id: u64) -> Vec<MatchRecord> {
    provider
        .head_to_head(fixture_id, H2H_WINDOW)
        .unwrap_or_else(|err| {
            warn!(fixture_id, "head-to-head unavailable: {err:#}");
            Vec::new()
        })
}

pub fn standings_or_empty(provider: &dyn FixtureProvider) -> Standings {
    provider.standings().unwrap_or_else(|err| {
        warn!("could not fetch standings: {err:#}");
        Standings::new()
    })
}
