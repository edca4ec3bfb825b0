//! Contextual adjustments applied to the two base ratings.
//!
//! Stages run in [`ADJUSTMENT_ORDER`]; each one receives the [`Ratings`] produced by the
//! previous stage and returns a new value, so later stages see earlier adjustments.

use std::ops::RangeInclusive;

use crate::config::TeamsConfig;
use crate::model::{MatchRecord, Side, Standings, TeamTier};

const TIER_BIG: f64 = 0.05;
const TIER_MID: f64 = 0.00;
const TIER_LOW: f64 = -0.05;
const TIER_UNKNOWN: f64 = -0.10;

pub const RIVALRY_DRAW_BOOST: f64 = 0.08;
pub const RIVALRY_UNDERDOG_BOOST: f64 = 0.10;

pub const H2H_WINDOW: usize = 5;
const H2H_PER_WIN: f64 = 0.04;

const EUROPEAN_ZONE: RangeInclusive<u32> = 1..=8;
const RELEGATION_ZONE: RangeInclusive<u32> = 16..=20;
const CLOSE_GAP: RangeInclusive<u32> = 2..=3;
const SAME_ZONE_BIAS: f64 = 0.05;
const CLOSE_GAP_BIAS: f64 = 0.03;

pub const STANDINGS_UNAVAILABLE: &str = "Standings unavailable.";
const NO_TABLE_BIAS: &str = "No table-based boost applied.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratings {
    pub home: f64,
    pub away: f64,
    pub draw_boost: f64,
}

impl Ratings {
    pub fn new(home: f64, away: f64) -> Self {
        Self {
            home,
            away,
            draw_boost: 0.0,
        }
    }
}

/// Everything the stages may read besides the ratings themselves.
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentContext<'a> {
    pub home_id: u32,
    pub away_id: u32,
    pub home_name: &'a str,
    pub away_name: &'a str,
    pub teams: &'a TeamsConfig,
    pub head_to_head: &'a [MatchRecord],
    pub standings: &'a Standings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    TierBonus,
    Rivalry,
    HeadToHead,
    TablePosition,
}

pub const ADJUSTMENT_ORDER: [Adjustment; 4] = [
    Adjustment::TierBonus,
    Adjustment::Rivalry,
    Adjustment::HeadToHead,
    Adjustment::TablePosition,
];

/// Ratings after one stage plus a readable account of what the stage did.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    pub stage: Adjustment,
    pub ratings: Ratings,
    pub note: String,
}

impl Adjustment {
    pub fn title(self) -> &'static str {
        match self {
            Adjustment::TierBonus => "Tier",
            Adjustment::Rivalry => "Rivalry",
            Adjustment::HeadToHead => "H2H",
            Adjustment::TablePosition => "Table",
        }
    }

    pub fn apply(self, r: Ratings, ctx: &AdjustmentContext<'_>) -> StageOutcome {
        let (ratings, note) = match self {
            Adjustment::TierBonus => {
                let home = tier_bonus(ctx.teams.tier(ctx.home_name));
                let away = tier_bonus(ctx.teams.tier(ctx.away_name));
                let note = format!(
                    "{} {home:+.2}, {} {away:+.2}",
                    ctx.home_name, ctx.away_name
                );
                (
                    Ratings {
                        home: r.home + home,
                        away: r.away + away,
                        ..r
                    },
                    note,
                )
            }
            Adjustment::Rivalry => match rivalry_bonus(ctx.teams, ctx.home_name, ctx.away_name) {
                Some(bonus) => {
                    let underdog = underdog(r.home, r.away);
                    let mut next = Ratings {
                        draw_boost: bonus.draw_boost,
                        ..r
                    };
                    let boosted = match underdog {
                        Side::Home => {
                            next.home += bonus.underdog_boost;
                            ctx.home_name
                        }
                        Side::Away => {
                            next.away += bonus.underdog_boost;
                            ctx.away_name
                        }
                    };
                    let note = format!(
                        "Rivalry detected, draw boost {:+.2}; underdog {boosted} {:+.2}",
                        bonus.draw_boost, bonus.underdog_boost
                    );
                    (next, note)
                }
                None => (
                    Ratings {
                        draw_boost: 0.0,
                        ..r
                    },
                    "No rivalry.".to_string(),
                ),
            },
            Adjustment::HeadToHead => {
                let (home, away) = head_to_head_boost(ctx.head_to_head, ctx.home_id, ctx.away_id);
                let note = if ctx.head_to_head.is_empty() {
                    "No H2H data available.".to_string()
                } else {
                    format!("{} {home:+.3}, {} {away:+.3}", ctx.home_name, ctx.away_name)
                };
                (
                    Ratings {
                        home: r.home + home,
                        away: r.away + away,
                        ..r
                    },
                    note,
                )
            }
            Adjustment::TablePosition => {
                let bias = table_bias(ctx.standings, ctx.home_name, ctx.away_name);
                (
                    Ratings {
                        home: r.home + bias.home,
                        away: r.away + bias.away,
                        ..r
                    },
                    bias.reason,
                )
            }
        };
        StageOutcome {
            stage: self,
            ratings,
            note,
        }
    }
}

/// Runs every stage in order, returning the final ratings and the per-stage trace.
pub fn apply_all(base: Ratings, ctx: &AdjustmentContext<'_>) -> (Ratings, Vec<StageOutcome>) {
    ADJUSTMENT_ORDER.iter().fold(
        (base, Vec::with_capacity(ADJUSTMENT_ORDER.len())),
        |(ratings, mut trace), stage| {
            let outcome = stage.apply(ratings, ctx);
            let next = outcome.ratings;
            trace.push(outcome);
            (next, trace)
        },
    )
}

pub fn tier_bonus(tier: TeamTier) -> f64 {
    match tier {
        TeamTier::Big => TIER_BIG,
        TeamTier::Mid => TIER_MID,
        TeamTier::Low => TIER_LOW,
        TeamTier::Unknown => TIER_UNKNOWN,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RivalryBonus {
    pub draw_boost: f64,
    pub underdog_boost: f64,
}

pub fn rivalry_bonus(teams: &TeamsConfig, home: &str, away: &str) -> Option<RivalryBonus> {
    teams.is_rivalry(home, away).then_some(RivalryBonus {
        draw_boost: RIVALRY_DRAW_BOOST,
        underdog_boost: RIVALRY_UNDERDOG_BOOST,
    })
}

/// The lower-rated side. Exact ties go to the away side.
pub fn underdog(home: f64, away: f64) -> Side {
    if home < away { Side::Home } else { Side::Away }
}

/// Home/away boost from the first [`H2H_WINDOW`] meetings, in the order given. Each win
/// is worth [`H2H_PER_WIN`]; draws, unscored records and wins by other ids count for
/// nobody.
pub fn head_to_head_boost(matches: &[MatchRecord], home_id: u32, away_id: u32) -> (f64, f64) {
    let mut home_wins = 0i32;
    let mut away_wins = 0i32;

    for winner in matches.iter().take(H2H_WINDOW).filter_map(MatchRecord::winner_id) {
        if winner == home_id {
            home_wins += 1;
        } else if winner == away_id {
            away_wins += 1;
        }
    }

    let home_boost = f64::from(home_wins - away_wins) * H2H_PER_WIN;
    (home_boost, -home_boost)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBias {
    pub home: f64,
    pub away: f64,
    pub reason: String,
}

impl TableBias {
    fn none(reason: &str) -> Self {
        Self {
            home: 0.0,
            away: 0.0,
            reason: reason.to_string(),
        }
    }
}

fn same_zone(home_pos: u32, away_pos: u32) -> bool {
    [EUROPEAN_ZONE, RELEGATION_ZONE]
        .iter()
        .any(|zone| zone.contains(&home_pos) && zone.contains(&away_pos))
}

/// Boost for the lower-ranked side (larger position number) when the two teams sit two or
/// three places apart; larger when both are in the same competitive zone. Equal positions
/// would boost the away side, but a zero gap never qualifies.
pub fn table_bias(standings: &Standings, home: &str, away: &str) -> TableBias {
    let (Some(h), Some(a)) = (standings.get(home), standings.get(away)) else {
        return TableBias::none(STANDINGS_UNAVAILABLE);
    };

    let gap = h.position.abs_diff(a.position);
    if !CLOSE_GAP.contains(&gap) {
        return TableBias::none(NO_TABLE_BIAS);
    }

    let (amount, why) = if same_zone(h.position, a.position) {
        (SAME_ZONE_BIAS, "lower-ranked inside competitive zone")
    } else {
        (CLOSE_GAP_BIAS, "lower-ranked but outside competitive zone")
    };

    if h.position > a.position {
        TableBias {
            home: amount,
            away: 0.0,
            reason: format!("{home} boosted ({amount:+.2}): {why}."),
        }
    } else {
        TableBias {
            home: 0.0,
            away: amount,
            reason: format!("{away} boosted ({amount:+.2}): {why}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StandingsEntry;

    const HOME_ID: u32 = 64;
    const AWAY_ID: u32 = 62;
    const HOME: &str = "Liverpool FC";
    const AWAY: &str = "Everton FC";

    fn h2h(home_id: u32, away_id: u32, hg: Option<u8>, ag: Option<u8>) -> MatchRecord {
        MatchRecord {
            id: 1,
            utc_date: "2024-04-24T19:00:00Z".to_string(),
            home_id,
            away_id,
            home_name: String::new(),
            away_name: String::new(),
            home_goals: hg,
            away_goals: ag,
        }
    }

    fn standings(home_pos: u32, away_pos: u32) -> Standings {
        let mut table = Standings::new();
        for (name, position) in [(HOME, home_pos), (AWAY, away_pos)] {
            table.insert(
                name.to_string(),
                StandingsEntry {
                    position,
                    points: 40,
                    goal_difference: 0,
                },
            );
        }
        table
    }

    fn rivals() -> TeamsConfig {
        TeamsConfig::from_json(r#"{"rivalries": {"Liverpool FC": ["Everton FC"]}}"#).unwrap()
    }

    fn ctx<'a>(
        teams: &'a TeamsConfig,
        head_to_head: &'a [MatchRecord],
        standings: &'a Standings,
    ) -> AdjustmentContext<'a> {
        AdjustmentContext {
            home_id: HOME_ID,
            away_id: AWAY_ID,
            home_name: HOME,
            away_name: AWAY,
            teams,
            head_to_head,
            standings,
        }
    }

    #[test]
    fn tier_bonus_table() {
        assert_eq!(tier_bonus(TeamTier::Big), 0.05);
        assert_eq!(tier_bonus(TeamTier::Mid), 0.0);
        assert_eq!(tier_bonus(TeamTier::Low), -0.05);
        assert_eq!(tier_bonus(TeamTier::Unknown), -0.10);
    }

    #[test]
    fn rivalry_boosts_underdog_and_draw() {
        let teams = rivals();
        let table = Standings::new();
        let out = Adjustment::Rivalry.apply(Ratings::new(1.0, 0.5), &ctx(&teams, &[], &table));
        assert_eq!(out.ratings.draw_boost, 0.08);
        assert_eq!(out.ratings.home, 1.0);
        assert!((out.ratings.away - 0.6).abs() < 1e-12);
    }

    #[test]
    fn rivalry_boosts_home_when_home_is_lower() {
        let teams = rivals();
        let table = Standings::new();
        let out = Adjustment::Rivalry.apply(Ratings::new(0.3, 0.5), &ctx(&teams, &[], &table));
        assert!((out.ratings.home - 0.4).abs() < 1e-12);
        assert_eq!(out.ratings.away, 0.5);
    }

    #[test]
    fn rivalry_tie_boosts_away() {
        let teams = rivals();
        let table = Standings::new();
        let out = Adjustment::Rivalry.apply(Ratings::new(0.5, 0.5), &ctx(&teams, &[], &table));
        assert_eq!(out.ratings.home, 0.5);
        assert!((out.ratings.away - 0.6).abs() < 1e-12);
    }

    #[test]
    fn no_rivalry_leaves_ratings() {
        let teams = TeamsConfig::default();
        let table = Standings::new();
        let out = Adjustment::Rivalry.apply(Ratings::new(1.0, 0.5), &ctx(&teams, &[], &table));
        assert_eq!(out.ratings, Ratings::new(1.0, 0.5));
        assert_eq!(out.note, "No rivalry.");
    }

    #[test]
    fn h2h_three_wins_two_losses_nets_one() {
        let matches = vec![
            h2h(HOME_ID, AWAY_ID, Some(2), Some(0)),
            h2h(AWAY_ID, HOME_ID, Some(0), Some(1)),
            h2h(HOME_ID, AWAY_ID, Some(3), Some(1)),
            h2h(AWAY_ID, HOME_ID, Some(2), Some(1)),
            h2h(HOME_ID, AWAY_ID, Some(0), Some(1)),
        ];
        let (home, away) = head_to_head_boost(&matches, HOME_ID, AWAY_ID);
        assert!((home - 0.04).abs() < 1e-12);
        assert!((away + 0.04).abs() < 1e-12);
    }

    #[test]
    fn h2h_three_wins_two_draws() {
        let matches = vec![
            h2h(HOME_ID, AWAY_ID, Some(2), Some(0)),
            h2h(AWAY_ID, HOME_ID, Some(1), Some(1)),
            h2h(AWAY_ID, HOME_ID, Some(0), Some(2)),
            h2h(HOME_ID, AWAY_ID, Some(0), Some(0)),
            h2h(HOME_ID, AWAY_ID, Some(1), Some(0)),
        ];
        let (home, away) = head_to_head_boost(&matches, HOME_ID, AWAY_ID);
        assert!((home - 0.12).abs() < 1e-12);
        assert!((away + 0.12).abs() < 1e-12);
    }

    #[test]
    fn h2h_ignores_draws_unscored_and_beyond_window() {
        let matches = vec![
            h2h(HOME_ID, AWAY_ID, Some(1), Some(1)),
            h2h(HOME_ID, AWAY_ID, None, Some(1)),
            h2h(AWAY_ID, HOME_ID, Some(2), Some(0)),
            h2h(HOME_ID, AWAY_ID, None, None),
            h2h(HOME_ID, AWAY_ID, Some(1), Some(1)),
            h2h(HOME_ID, AWAY_ID, Some(4), Some(0)),
        ];
        let (home, away) = head_to_head_boost(&matches, HOME_ID, AWAY_ID);
        assert!((home + 0.04).abs() < 1e-12);
        assert!((away - 0.04).abs() < 1e-12);
        assert_eq!(head_to_head_boost(&[], HOME_ID, AWAY_ID), (0.0, 0.0));
    }

    #[test]
    fn table_bias_same_european_zone() {
        let bias = table_bias(&standings(3, 5), HOME, AWAY);
        assert_eq!(bias.home, 0.0);
        assert_eq!(bias.away, 0.05);
        assert!(bias.reason.starts_with("Everton FC boosted"));
    }

    #[test]
    fn table_bias_same_relegation_zone_home_lower() {
        let bias = table_bias(&standings(19, 16), HOME, AWAY);
        assert_eq!(bias.home, 0.05);
        assert_eq!(bias.away, 0.0);
    }

    #[test]
    fn table_bias_outside_zone() {
        let bias = table_bias(&standings(10, 12), HOME, AWAY);
        assert_eq!((bias.home, bias.away), (0.0, 0.03));
        // Straddling the European zone boundary is not the same zone.
        let bias = table_bias(&standings(9, 7), HOME, AWAY);
        assert_eq!((bias.home, bias.away), (0.03, 0.0));
    }

    #[test]
    fn table_bias_requires_close_gap() {
        for (h, a) in [(3, 4), (3, 7), (5, 5)] {
            let bias = table_bias(&standings(h, a), HOME, AWAY);
            assert_eq!((bias.home, bias.away), (0.0, 0.0));
        }
    }

    #[test]
    fn table_bias_without_standings() {
        let mut table = standings(3, 5);
        table.remove(AWAY);
        let bias = table_bias(&table, HOME, AWAY);
        assert_eq!((bias.home, bias.away), (0.0, 0.0));
        assert_eq!(bias.reason, STANDINGS_UNAVAILABLE);
    }

    #[test]
    fn stages_see_earlier_adjustments() {
        // Tier flips the underdog: base home 0.50 vs away 0.45, but home is unclassified
        // (-0.10) and away is big (+0.05), so rivalry must boost home.
        let teams = TeamsConfig::from_json(
            r#"{"big": ["Everton FC"], "rivalries": {"Liverpool FC": ["Everton FC"]}}"#,
        )
        .unwrap();
        let table = Standings::new();
        let (final_ratings, trace) = apply_all(Ratings::new(0.50, 0.45), &ctx(&teams, &[], &table));

        assert_eq!(trace.len(), 4);
        assert_eq!(
            trace.iter().map(|s| s.stage).collect::<Vec<_>>(),
            ADJUSTMENT_ORDER.to_vec()
        );
        assert!((final_ratings.home - 0.50).abs() < 1e-12);
        assert!((final_ratings.away - 0.50).abs() < 1e-12);
        assert_eq!(final_ratings.draw_boost, 0.08);
        assert_eq!(trace[3].note, STANDINGS_UNAVAILABLE);
    }
}
