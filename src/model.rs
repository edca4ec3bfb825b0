use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// A finished or scheduled match as returned by the data provider.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: u64,
    pub utc_date: String,
    pub home_id: u32,
    pub away_id: u32,
    pub home_name: String,
    pub away_name: String,
    pub home_goals: Option<u8>,
    pub away_goals: Option<u8>,
}

impl MatchRecord {
    /// Full-time score, only when both sides have a value.
    pub fn score(&self) -> Option<(u8, u8)> {
        match (self.home_goals, self.away_goals) {
            (Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }

    /// Goals for and against from `team_id`'s point of view. `None` when the record is
    /// unscored or the team did not play in it.
    pub fn goals_for_against(&self, team_id: u32) -> Option<(u8, u8)> {
        let (h, a) = self.score()?;
        if self.home_id == team_id {
            Some((h, a))
        } else if self.away_id == team_id {
            Some((a, h))
        } else {
            None
        }
    }

    pub fn winner_id(&self) -> Option<u32> {
        let (h, a) = self.score()?;
        if h > a {
            Some(self.home_id)
        } else if a > h {
            Some(self.away_id)
        } else {
            None
        }
    }

    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        parse_utc(&self.utc_date)
    }
}

/// An upcoming fixture to be predicted.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub id: u64,
    pub utc_date: String,
    pub matchday: Option<u32>,
    pub home_id: u32,
    pub away_id: u32,
    pub home_name: String,
    pub away_name: String,
}

impl Fixture {
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        parse_utc(&self.utc_date)
    }

    pub fn kickoff_label(&self) -> String {
        match self.kickoff() {
            Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            None => self.utc_date.clone(),
        }
    }
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn as_query(self) -> &'static str {
        match self {
            Venue::Home => "HOME",
            Venue::Away => "AWAY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamTier {
    Big,
    Mid,
    Low,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingsEntry {
    pub position: u32,
    pub points: i32,
    pub goal_difference: i32,
}

/// League table snapshot keyed by team name.
pub type Standings = HashMap<String, StandingsEntry>;

/// The artifact handed to the prediction store.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub match_id: u64,
    pub utc_date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_rating: f64,
    pub away_rating: f64,
    pub p_home: f64,
    pub p_draw: f64,
    pub p_away: f64,
    pub prediction: String,
}
