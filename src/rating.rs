use crate::model::Venue;
use crate::stats::VenueStats;

const W_FORM: f64 = 0.45;
const W_ATTACK: f64 = 0.30;
const W_DEFENSE: f64 = 0.25;
const W_MOMENTUM: f64 = 0.20;
pub const HOME_ADVANTAGE: f64 = 0.12;

/// Base strength of one team from its venue stats. The home-advantage term only applies
/// to ratings built from home stats.
pub fn base_rating(stats: &VenueStats, venue: Venue) -> f64 {
    let rating = W_FORM * stats.form_index + W_ATTACK * stats.attack
        - W_DEFENSE * stats.defense
        + W_MOMENTUM * (stats.momentum - 0.5);

    match venue {
        Venue::Home => rating + HOME_ADVANTAGE,
        Venue::Away => rating,
    }
}
