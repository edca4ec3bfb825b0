use crate::model::Side;
use crate::probability::OutcomeProbs;

/// Percentage points within which the leader and the draw are considered too close to call.
const CLOSE_CALL_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    /// "<team> Win"
    Win(Side),
    /// "<team> OR Draw": a side leads, the draw is within the margin.
    SideOrDraw(Side),
    /// "Draw OR <team>": the draw leads, the named side is the closer of the two.
    DrawOrSide(Side),
    /// "Draw"
    Draw,
}

impl Prediction {
    pub fn render(self, home: &str, away: &str) -> String {
        let name = |side: Side| match side {
            Side::Home => home,
            Side::Away => away,
        };
        match self {
            Prediction::Win(side) => format!("{} Win", name(side)),
            Prediction::SideOrDraw(side) => format!("{} OR Draw", name(side)),
            Prediction::DrawOrSide(side) => format!("Draw OR {}", name(side)),
            Prediction::Draw => "Draw".to_string(),
        }
    }
}

/// Classifies percentages (0..100). The home side wins ties for the maximum, then away;
/// when the draw leads, the side nearer the draw is named and exact ties name away.
pub fn classify_percentages(home: f64, draw: f64, away: f64) -> Prediction {
    let winner = home.max(draw).max(away);

    if (winner - draw).abs() <= CLOSE_CALL_MARGIN {
        if winner == home {
            Prediction::SideOrDraw(Side::Home)
        } else if winner == away {
            Prediction::SideOrDraw(Side::Away)
        } else if (draw - home).abs() < (draw - away).abs() {
            Prediction::DrawOrSide(Side::Home)
        } else {
            Prediction::DrawOrSide(Side::Away)
        }
    } else if winner == home {
        Prediction::Win(Side::Home)
    } else if winner == away {
        Prediction::Win(Side::Away)
    } else {
        Prediction::Draw
    }
}

pub fn classify(probs: &OutcomeProbs) -> Prediction {
    let (home, draw, away) = probs.percentages();
    classify_percentages(home, draw, away)
}

/// Label string built from team names, e.g. "Arsenal FC OR Draw".
pub fn prediction_label(probs: &OutcomeProbs, home: &str, away: &str) -> String {
    classify(probs).render(home, away)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_home_lead_is_home_or_draw() {
        let p = classify_percentages(48.0, 44.0, 8.0);
        assert_eq!(p, Prediction::SideOrDraw(Side::Home));
        assert_eq!(p.render("Arsenal FC", "Chelsea FC"), "Arsenal FC OR Draw");
    }

    #[test]
    fn close_away_lead_is_away_or_draw() {
        let p = classify_percentages(20.0, 38.0, 42.0);
        assert_eq!(p.render("A", "B"), "B OR Draw");
    }

    #[test]
    fn margin_is_inclusive() {
        assert_eq!(
            classify_percentages(45.0, 40.0, 15.0),
            Prediction::SideOrDraw(Side::Home)
        );
        assert_eq!(classify_percentages(45.1, 40.0, 14.9), Prediction::Win(Side::Home));
    }

    #[test]
    fn clear_winners() {
        assert_eq!(
            classify_percentages(60.0, 25.0, 15.0).render("A", "B"),
            "A Win"
        );
        assert_eq!(
            classify_percentages(15.0, 25.0, 60.0).render("A", "B"),
            "B Win"
        );
    }

    #[test]
    fn leading_draw_names_nearer_side() {
        assert_eq!(
            classify_percentages(35.0, 38.0, 27.0).render("A", "B"),
            "Draw OR A"
        );
        assert_eq!(
            classify_percentages(27.0, 38.0, 35.0).render("A", "B"),
            "Draw OR B"
        );
        // Equidistant sides name the away team.
        assert_eq!(
            classify_percentages(31.0, 38.0, 31.0).render("A", "B"),
            "Draw OR B"
        );
    }

    #[test]
    fn dominant_draw_is_draw() {
        assert_eq!(classify_percentages(20.0, 60.0, 20.0), Prediction::Draw);
    }

    #[test]
    fn classify_from_unit_probabilities() {
        let probs = OutcomeProbs {
            home: 0.48,
            draw: 0.44,
            away: 0.08,
        };
        assert_eq!(prediction_label(&probs, "H", "A"), "H OR Draw");
    }
}
