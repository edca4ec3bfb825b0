//! Shared test doubles backed by the recorded payloads in `tests/fixtures`.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use league_predictor::config::TeamsConfig;
use league_predictor::football_data::{
    parse_fixtures_json, parse_matches_json, parse_standings_json,
};
use league_predictor::model::{Fixture, MatchRecord, Standings, Venue};
use league_predictor::provider::FixtureProvider;

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Serves the recorded payloads: Liverpool's home history, nothing for anyone else.
pub struct RecordedProvider {
    pub fixtures: Vec<Fixture>,
    pub liverpool_home: Vec<MatchRecord>,
    pub head_to_head: Vec<MatchRecord>,
    pub standings: Standings,
}

impl RecordedProvider {
    pub fn load() -> Self {
        Self {
            fixtures: parse_fixtures_json(&read_fixture("scheduled_matches.json")).unwrap(),
            liverpool_home: parse_matches_json(&read_fixture("team_matches.json")).unwrap(),
            head_to_head: parse_matches_json(&read_fixture("head2head.json")).unwrap(),
            standings: parse_standings_json(&read_fixture("standings.json")).unwrap(),
        }
    }
}

impl FixtureProvider for RecordedProvider {
    fn upcoming(&self, limit: usize) -> Result<Vec<Fixture>> {
        Ok(self.fixtures.iter().take(limit).cloned().collect())
    }

    fn team_matches(&self, team_id: u32, venue: Venue, limit: usize) -> Result<Vec<MatchRecord>> {
        if team_id == 64 && venue == Venue::Home {
            Ok(self.liverpool_home.iter().take(limit).cloned().collect())
        } else {
            Ok(Vec::new())
        }
    }

    fn head_to_head(&self, fixture_id: u64, limit: usize) -> Result<Vec<MatchRecord>> {
        if fixture_id == 537900 {
            Ok(self.head_to_head.iter().take(limit).cloned().collect())
        } else {
            Ok(Vec::new())
        }
    }

    fn standings(&self) -> Result<Standings> {
        Ok(self.standings.clone())
    }
}

pub struct OfflineProvider;

impl FixtureProvider for OfflineProvider {
    fn upcoming(&self, _limit: usize) -> Result<Vec<Fixture>> {
        Err(anyhow!("connection refused"))
    }

    fn team_matches(
        &self,
        _team_id: u32,
        _venue: Venue,
        _limit: usize,
    ) -> Result<Vec<MatchRecord>> {
        Err(anyhow!("connection refused"))
    }

    fn head_to_head(&self, _fixture_id: u64, _limit: usize) -> Result<Vec<MatchRecord>> {
        Err(anyhow!("connection refused"))
    }

    fn standings(&self) -> Result<Standings> {
        Err(anyhow!("connection refused"))
    }
}

pub fn teams() -> TeamsConfig {
    TeamsConfig::from_json(
        r#"{
            "big": ["Liverpool FC", "Arsenal FC"],
            "mid": ["Crystal Palace FC"],
            "low": ["Everton FC"],
            "rivalries": {"Liverpool FC": ["Arsenal FC", "Everton FC"]}
        }"#,
    )
    .unwrap()
}
