use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use league_predictor::config::TeamsConfig;
use league_predictor::football_data::{
    parse_fixtures_json, parse_matches_json, parse_standings_json,
};
use league_predictor::model::Fixture;
use league_predictor::pipeline::{FixtureInputs, predict};
use league_predictor::runner::score_all;

fn sample_inputs() -> FixtureInputs {
    let fixture = parse_fixtures_json(SCHEDULED_JSON)
        .expect("valid fixture json")
        .remove(0);
    FixtureInputs {
        fixture,
        home_history: parse_matches_json(TEAM_MATCHES_JSON).expect("valid fixture json"),
        away_history: Vec::new(),
        head_to_head: parse_matches_json(HEAD2HEAD_JSON).expect("valid fixture json"),
        standings: parse_standings_json(STANDINGS_JSON).expect("valid fixture json"),
    }
}

fn sample_teams() -> TeamsConfig {
    TeamsConfig::from_json(
        r#"{"big": ["Liverpool FC", "Arsenal FC"], "rivalries": {"Liverpool FC": ["Arsenal FC"]}}"#,
    )
    .expect("valid teams json")
}

fn bench_predict_single(c: &mut Criterion) {
    let inputs = sample_inputs();
    let teams = sample_teams();
    c.bench_function("predict_single", |b| {
        b.iter(|| {
            let report = predict(black_box(&inputs), &teams).unwrap();
            black_box(report.probs.home);
        })
    });
}

fn bench_predict_batch(c: &mut Criterion) {
    let base = sample_inputs();
    let teams = sample_teams();
    let batch: Vec<FixtureInputs> = (0..380u64)
        .map(|i| FixtureInputs {
            fixture: Fixture {
                id: 600_000 + i,
                ..base.fixture.clone()
            },
            ..base.clone()
        })
        .collect();

    c.bench_function("predict_batch_par", |b| {
        b.iter(|| {
            let scored = score_all(black_box(&batch), &teams);
            black_box(scored.len());
        })
    });
}

fn bench_matches_parse(c: &mut Criterion) {
    c.bench_function("matches_parse", |b| {
        b.iter(|| {
            let rows = parse_matches_json(black_box(TEAM_MATCHES_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_standings_parse(c: &mut Criterion) {
    c.bench_function("standings_parse", |b| {
        b.iter(|| {
            let table = parse_standings_json(black_box(STANDINGS_JSON)).unwrap();
            black_box(table.len());
        })
    });
}

criterion_group!(
    perf,
    bench_predict_single,
    bench_predict_batch,
    bench_matches_parse,
    bench_standings_parse
);
criterion_main!(perf);

static SCHEDULED_JSON: &str = include_str!("../tests/fixtures/scheduled_matches.json");
static TEAM_MATCHES_JSON: &str = include_str!("../tests/fixtures/team_matches.json");
static HEAD2HEAD_JSON: &str = include_str!("../tests/fixtures/head2head.json");
static STANDINGS_JSON: &str = include_str!("../tests/fixtures/standings.json");
