use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::{info, warn};

use crate::model::TeamTier;
use crate::stats::DEFAULT_HISTORY_LIMIT;

const DEFAULT_COMPETITION: &str = "PL";
const DEFAULT_UPCOMING_LIMIT: usize = 20;
const DEFAULT_TEAMS_FILE: &str = "teams.json";

/// Static team tables: tier membership and rivalries, keyed by team name as the
/// provider spells it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamsConfig {
    #[serde(default)]
    pub big: HashSet<String>,
    #[serde(default)]
    pub mid: HashSet<String>,
    #[serde(default)]
    pub low: HashSet<String>,
    /// Home team -> away teams it considers rivals. Not symmetric.
    #[serde(default)]
    pub rivalries: HashMap<String, HashSet<String>>,
}

impl TeamsConfig {
    pub fn tier(&self, team: &str) -> TeamTier {
        if self.big.contains(team) {
            TeamTier::Big
        } else if self.mid.contains(team) {
            TeamTier::Mid
        } else if self.low.contains(team) {
            TeamTier::Low
        } else {
            TeamTier::Unknown
        }
    }

    pub fn is_rivalry(&self, home: &str, away: &str) -> bool {
        self.rivalries
            .get(home)
            .is_some_and(|rivals| rivals.contains(away))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid teams config json")
    }

    /// Missing file means empty tables; a file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => {
                let cfg = Self::from_json(&raw)
                    .with_context(|| format!("load teams config {}", path.display()))?;
                info!(
                    path = %path.display(),
                    big = cfg.big.len(),
                    mid = cfg.mid.len(),
                    low = cfg.low.len(),
                    rivalries = cfg.rivalries.len(),
                    "loaded teams config"
                );
                Ok(cfg)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    "teams config not found; every team is unclassified and no rivalries apply"
                );
                Ok(Self::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("read teams config {}", path.display()))
            }
        }
    }
}

/// Runtime settings resolved from the environment (after `.env` loading).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub competition: String,
    pub history_limit: usize,
    pub upcoming_limit: usize,
    pub teams_file: PathBuf,
    pub db_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let competition = non_empty("PREDICTOR_COMPETITION")
            .map(|v| v.to_uppercase())
            .unwrap_or_else(|| DEFAULT_COMPETITION.to_string());
        let history_limit = non_empty("PREDICTOR_HISTORY_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .max(1);
        let upcoming_limit = non_empty("PREDICTOR_UPCOMING_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_UPCOMING_LIMIT)
            .max(1);
        let teams_file = non_empty("PREDICTOR_TEAMS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEAMS_FILE));
        let db_path = non_empty("PREDICTOR_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_db_path(&competition));

        Self {
            api_key: non_empty("FOOTBALL_DATA_API_KEY"),
            competition,
            history_limit,
            upcoming_limit,
            teams_file,
            db_path,
        }
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("FOOTBALL_DATA_API_KEY is not set"))
    }
}

pub fn default_db_path(competition: &str) -> PathBuf {
    PathBuf::from(format!("{}_predictions.db", competition.to_lowercase()))
}

pub fn default_export_path(competition: &str) -> PathBuf {
    PathBuf::from(format!("{}_predictions.xlsx", competition.to_lowercase()))
}

/// Reads `--name value` or `--name=value` from the process arguments.
pub fn path_arg(name: &str) -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    path_arg_from(&args, name)
}

pub fn path_arg_from(args: &[String], name: &str) -> Option<PathBuf> {
    let flag = format!("--{name}");
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if *arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(PathBuf::from(next));
        }
    }
    None
}
