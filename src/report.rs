use std::fmt::Write;

use crate::adjustments::H2H_WINDOW;
use crate::model::MatchRecord;
use crate::pipeline::PredictionReport;

const RULE: &str = "============================================================";

/// Human-readable analysis for one prediction, section by section.
pub fn render_report(report: &PredictionReport) -> String {
    let f = &report.fixture;
    let (home, away) = (f.home_name.as_str(), f.away_name.as_str());
    let mut out = String::new();

    let _ = writeln!(out, "====================== MATCH ANALYSIS ======================");
    let _ = writeln!(out, "Selected: {home} vs {away} ({})", f.kickoff_label());
    let _ = writeln!(out, "{RULE}\n");

    let _ = writeln!(out, "Venue-Specific Form, Attack, Defense");
    for (name, venue, s) in [
        (home, "HOME", &report.home_stats),
        (away, "AWAY", &report.away_stats),
    ] {
        let _ = writeln!(
            out,
            "- {name} ({venue}) -> Form={:.2}, Attack={:.2}, Defense={:.2}, Momentum={:.2}",
            s.form_index, s.attack, s.defense, s.momentum
        );
    }
    let _ = writeln!(out);
    write_ratings(
        &mut out,
        "Base ratings from form/stats",
        home,
        away,
        report.base.home,
        report.base.away,
    );

    for stage in &report.stages {
        let _ = writeln!(out, "{}: {}", stage.stage.title(), stage.note);
        write_ratings(
            &mut out,
            &format!("Ratings after {}", stage.stage.title()),
            home,
            away,
            stage.ratings.home,
            stage.ratings.away,
        );
    }

    let _ = writeln!(out, "Last H2H Matches:");
    if report.head_to_head.is_empty() {
        let _ = writeln!(out, "  No H2H data available.");
    }
    for m in report.head_to_head.iter().take(H2H_WINDOW) {
        let _ = writeln!(out, "  {}", h2h_line(m));
    }
    let _ = writeln!(out);

    let (p_home, p_draw, p_away) = report.probs.percentages();
    let _ = writeln!(out, "Convert Ratings -> Probabilities");
    let _ = writeln!(out, "- Home win: {p_home:.1}%");
    let _ = writeln!(out, "- Draw:     {p_draw:.1}%");
    let _ = writeln!(out, "- Away win: {p_away:.1}%\n");
    let _ = writeln!(out, "Prediction: {}", report.label);
    let _ = writeln!(out, "{RULE}");
    out
}

fn write_ratings(out: &mut String, title: &str, home: &str, away: &str, h: f64, a: f64) {
    let _ = writeln!(out, "-> {title}:");
    let _ = writeln!(out, "   {home}: {h:.3}");
    let _ = writeln!(out, "   {away}: {a:.3}\n");
}

/// "2024-04-24: Everton FC 2-0 Liverpool FC -> Everton FC WON"
pub fn h2h_line(m: &MatchRecord) -> String {
    let date = m.utc_date.get(..10).unwrap_or(m.utc_date.as_str());
    let show = |g: Option<u8>| g.map(|g| g.to_string()).unwrap_or_else(|| "?".to_string());
    let result = match m.score() {
        Some((h, a)) if h > a => format!("{} WON", m.home_name),
        Some((h, a)) if a > h => format!("{} WON", m.away_name),
        Some(_) => "DRAW".to_string(),
        None => "Unknown result".to_string(),
    };
    format!(
        "{date}: {} {}-{} {} -> {result}",
        m.home_name,
        show(m.home_goals),
        show(m.away_goals),
        m.away_name
    )
}

/// One-line summary used by batch mode.
pub fn summary_line(report: &PredictionReport) -> String {
    let (h, d, a) = report.probs.percentages();
    format!(
        "{} | {} vs {} | H {h:.1}% D {d:.1}% A {a:.1}% | {}",
        report.fixture.kickoff_label(),
        report.fixture.home_name,
        report.fixture.away_name,
        report.label
    )
}
