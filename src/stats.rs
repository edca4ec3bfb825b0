//! Venue-restricted form signals for one team.

use crate::model::MatchRecord;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;
const MOMENTUM_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VenueStats {
    /// Points per game over 3, in [0, 1].
    pub form_index: f64,
    /// Mean goals scored.
    pub attack: f64,
    /// Mean goals conceded.
    pub defense: f64,
    /// Points share of the last five entries, draws count half.
    pub momentum: f64,
}

impl VenueStats {
    /// Prior used when a team has no scored matches at the venue.
    pub const NEUTRAL: VenueStats = VenueStats {
        form_index: 0.5,
        attack: 1.0,
        defense: 1.0,
        momentum: 0.5,
    };
}

impl Default for VenueStats {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Reduces `matches` (already restricted to one venue and capped by the caller) to
/// [`VenueStats`] from `team_id`'s point of view.
///
/// Unscored or half-scored records and records the team did not play in are left out of
/// the aggregates. Momentum looks at the last five raw entries of `matches`, so an
/// unscored entry there still takes a slot and earns nothing.
pub fn compute_venue_stats(matches: &[MatchRecord], team_id: u32) -> VenueStats {
    let mut wins = 0u32;
    let mut draws = 0u32;
    let mut played = 0u32;
    let mut goals_for = 0u32;
    let mut goals_against = 0u32;

    for m in matches {
        let Some((gf, ga)) = m.goals_for_against(team_id) else {
            continue;
        };
        played += 1;
        goals_for += u32::from(gf);
        goals_against += u32::from(ga);
        if gf > ga {
            wins += 1;
        } else if gf == ga {
            draws += 1;
        }
    }

    if played == 0 {
        return VenueStats::NEUTRAL;
    }

    let played_f = f64::from(played);
    let form_index = f64::from(3 * wins + draws) / (3.0 * played_f);

    let window_start = matches.len().saturating_sub(MOMENTUM_WINDOW);
    let points: f64 = matches[window_start..]
        .iter()
        .map(|m| momentum_points(m, team_id))
        .sum();

    VenueStats {
        form_index,
        attack: f64::from(goals_for) / played_f,
        defense: f64::from(goals_against) / played_f,
        momentum: points / MOMENTUM_WINDOW as f64,
    }
}

fn momentum_points(m: &MatchRecord, team_id: u32) -> f64 {
    let Some((h, a)) = m.score() else {
        return 0.0;
    };
    let (gf, ga) = if m.home_id == team_id { (h, a) } else { (a, h) };
    if gf > ga {
        1.0
    } else if gf == ga {
        0.5
    } else {
        0.0
    }
}
