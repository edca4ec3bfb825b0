use crate::error::PipelineError;

const STEEPNESS: f64 = 2.5;
const BASE_DRAW: f64 = 0.22;
const CLOSE_DRAW_BONUS: f64 = 0.15;
const CLOSE_DRAW_DECAY: f64 = 0.1;
const SUM_TOLERANCE: f64 = 1e-9;

/// Home/draw/away probabilities on the 0..1 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl OutcomeProbs {
    pub fn sum(&self) -> f64 {
        self.home + self.draw + self.away
    }

    pub fn percentages(&self) -> (f64, f64, f64) {
        (self.home * 100.0, self.draw * 100.0, self.away * 100.0)
    }
}

/// Draw probability before renormalization: a fixed floor, a bonus that fades as the
/// ratings drift apart, and the rivalry boost.
pub fn raw_draw_probability(diff: f64, draw_boost: f64) -> f64 {
    BASE_DRAW + (CLOSE_DRAW_BONUS - diff.abs() * CLOSE_DRAW_DECAY).max(0.0) + draw_boost
}

/// Logistic home/away split of the rating gap, with the draw share carved out and the
/// three values renormalized. The result is checked: finite, non-negative, summing to 1.
pub fn ratings_to_probs(
    home_rating: f64,
    away_rating: f64,
    draw_boost: f64,
) -> Result<OutcomeProbs, PipelineError> {
    ensure_finite("home rating", home_rating)?;
    ensure_finite("away rating", away_rating)?;
    ensure_finite("draw boost", draw_boost)?;

    let diff = home_rating - away_rating;
    let p_home_raw = 1.0 / (1.0 + (-STEEPNESS * diff).exp());
    let p_away_raw = 1.0 - p_home_raw;

    let p_draw = raw_draw_probability(diff, draw_boost);
    let scale = 1.0 - p_draw;
    let p_home = p_home_raw * scale;
    let p_away = p_away_raw * scale;

    let total = p_home + p_draw + p_away;
    ensure_finite("probability total", total)?;
    if total <= 0.0 {
        return Err(PipelineError::Unnormalized { sum: total });
    }

    let probs = OutcomeProbs {
        home: p_home / total,
        draw: p_draw / total,
        away: p_away / total,
    };
    check_normalized(&probs)?;
    Ok(probs)
}

pub fn check_normalized(probs: &OutcomeProbs) -> Result<(), PipelineError> {
    for (outcome, value) in [
        ("home", probs.home),
        ("draw", probs.draw),
        ("away", probs.away),
    ] {
        ensure_finite("probability", value)?;
        if value < 0.0 {
            return Err(PipelineError::NegativeProbability { outcome, value });
        }
    }
    let sum = probs.sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(PipelineError::Unnormalized { sum });
    }
    Ok(())
}

fn ensure_finite(what: &'static str, value: f64) -> Result<(), PipelineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PipelineError::NonFinite { what, value })
    }
}
