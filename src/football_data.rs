//! football-data.org v4 client and response parsing.

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info};

use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::model::{Fixture, MatchRecord, Standings, StandingsEntry, Venue};
use crate::provider::FixtureProvider;
use crate::retry::{RetryConfig, retry};

const BASE_URL: &str = "https://api.football-data.org/v4";
const AUTH_HEADER: &str = "X-Auth-Token";

pub struct FootballDataClient {
    api_key: String,
    competition: String,
    retry: RetryConfig,
}

impl FootballDataClient {
    pub fn new(api_key: impl Into<String>, competition: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            competition: competition.into(),
            retry: RetryConfig::network(),
        }
    }

    pub fn competition(&self) -> &str {
        &self.competition
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = build_url(path, query)?;
        let client = http_client()?;
        let headers = [(AUTH_HEADER, self.api_key.as_str())];
        debug!(%url, "GET");
        retry(&self.retry, path, || fetch_json_cached(client, url.as_str(), &headers))
            .with_context(|| format!("GET {url}"))
    }
}

impl FixtureProvider for FootballDataClient {
    fn upcoming(&self, limit: usize) -> Result<Vec<Fixture>> {
        let body = self.get(
            &format!("competitions/{}/matches", self.competition),
            &[("status", "SCHEDULED".to_string())],
        )?;
        let mut fixtures = parse_fixtures_json(&body)?;
        fixtures.sort_by(|a, b| a.utc_date.cmp(&b.utc_date));
        fixtures.truncate(limit);
        info!(
            competition = %self.competition,
            count = fixtures.len(),
            "fetched upcoming fixtures"
        );
        Ok(fixtures)
    }

    fn team_matches(&self, team_id: u32, venue: Venue, limit: usize) -> Result<Vec<MatchRecord>> {
        let body = self.get(
            &format!("teams/{team_id}/matches"),
            &[
                ("status", "FINISHED".to_string()),
                ("competitions", self.competition.clone()),
                ("venue", venue.as_query().to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        let matches = parse_matches_json(&body)?;
        debug!(team_id, venue = venue.as_query(), count = matches.len(), "team history");
        Ok(matches)
    }

    fn head_to_head(&self, fixture_id: u64, limit: usize) -> Result<Vec<MatchRecord>> {
        let body = self.get(
            &format!("matches/{fixture_id}/head2head"),
            &[("limit", limit.to_string())],
        )?;
        parse_matches_json(&body)
    }

    fn standings(&self) -> Result<Standings> {
        let body = self.get(&format!("competitions/{}/standings", self.competition), &[])?;
        parse_standings_json(&body)
    }
}

/// Joins `path` onto the API root; query values are form-encoded.
fn build_url(path: &str, query: &[(&str, String)]) -> Result<Url> {
    let base = format!("{BASE_URL}/{}", path.trim_start_matches('/'));
    let url = if query.is_empty() {
        Url::parse(&base)
    } else {
        Url::parse_with_params(&base, query.iter().map(|(k, v)| (*k, v.as_str())))
    };
    url.with_context(|| format!("invalid request url {base}"))
}

fn parse_root(raw: &str) -> Result<Option<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid provider json")?;
    if let Some(message) = v.get("message").and_then(|m| m.as_str())
        && v.get("errorCode").is_some()
    {
        return Err(anyhow!("provider error: {message}"));
    }
    Ok(Some(v))
}

fn match_array(v: &Value) -> impl Iterator<Item = &Value> {
    v.get("matches")
        .and_then(|m| m.as_array())
        .into_iter()
        .flatten()
}

/// Parses a `{"matches": [...]}` payload into scheduled fixtures.
pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let Some(v) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    Ok(match_array(&v).filter_map(parse_fixture).collect())
}

/// Parses a `{"matches": [...]}` payload (team history or head2head) into records,
/// keeping the source order.
pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchRecord>> {
    let Some(v) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    Ok(match_array(&v).filter_map(parse_match_record).collect())
}

/// Parses the competition standings, preferring the `TOTAL` table.
pub fn parse_standings_json(raw: &str) -> Result<Standings> {
    let mut out = Standings::new();
    let Some(v) = parse_root(raw)? else {
        return Ok(out);
    };
    let Some(groups) = v.get("standings").and_then(|s| s.as_array()) else {
        return Ok(out);
    };
    let group = groups
        .iter()
        .find(|g| g.get("type").and_then(|t| t.as_str()) == Some("TOTAL"))
        .or_else(|| groups.first());
    let Some(table) = group.and_then(|g| g.get("table")).and_then(|t| t.as_array()) else {
        return Ok(out);
    };

    for row in table {
        let Some(name) = row
            .get("team")
            .and_then(|t| t.get("name"))
            .and_then(|n| n.as_str())
        else {
            continue;
        };
        let Some(position) = row
            .get("position")
            .and_then(|p| p.as_u64())
            .and_then(|p| u32::try_from(p).ok())
        else {
            continue;
        };
        out.insert(
            name.to_string(),
            StandingsEntry {
                position,
                points: int_field(row, "points"),
                goal_difference: int_field(row, "goalDifference"),
            },
        );
    }
    Ok(out)
}

fn int_field(v: &Value, key: &str) -> i32 {
    v.get(key)
        .and_then(|x| x.as_i64())
        .and_then(|x| i32::try_from(x).ok())
        .unwrap_or(0)
}

fn team_ref(v: &Value, key: &str) -> Option<(u32, String)> {
    let team = v.get(key)?;
    let id = u32::try_from(team.get("id")?.as_u64()?).ok()?;
    let name = team
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or_default()
        .to_string();
    Some((id, name))
}

fn goals(score: Option<&Value>, key: &str) -> Option<u8> {
    score?
        .get(key)?
        .as_u64()
        .and_then(|g| u8::try_from(g).ok())
}

fn utc_date(v: &Value) -> String {
    v.get("utcDate")
        .and_then(|d| d.as_str())
        .unwrap_or_default()
        .to_string()
}

fn parse_fixture(v: &Value) -> Option<Fixture> {
    let id = v.get("id")?.as_u64()?;
    let (home_id, home_name) = team_ref(v, "homeTeam")?;
    let (away_id, away_name) = team_ref(v, "awayTeam")?;
    let matchday = v
        .get("matchday")
        .and_then(|m| m.as_u64())
        .and_then(|m| u32::try_from(m).ok());
    Some(Fixture {
        id,
        utc_date: utc_date(v),
        matchday,
        home_id,
        away_id,
        home_name,
        away_name,
    })
}

fn parse_match_record(v: &Value) -> Option<MatchRecord> {
    let id = v.get("id")?.as_u64()?;
    let (home_id, home_name) = team_ref(v, "homeTeam")?;
    let (away_id, away_name) = team_ref(v, "awayTeam")?;
    let full_time = v.get("score").and_then(|s| s.get("fullTime"));
    Some(MatchRecord {
        id,
        utc_date: utc_date(v),
        home_id,
        away_id,
        home_name,
        away_name,
        home_goals: goals(full_time, "home"),
        away_goals: goals(full_time, "away"),
    })
}
