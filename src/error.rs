use std::time::Duration;

use thiserror::Error;

/// Invariant violations that abandon a single prediction run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("negative {outcome} probability: {value}")]
    NegativeProbability { outcome: &'static str, value: f64 },

    #[error("probabilities sum to {sum}, expected 1")]
    Unnormalized { sum: f64 },
}

/// Failure of a single HTTP attempt against the data provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rate limited by provider")]
    RateLimited { wait: Option<Duration> },

    #[error("http {status}: {body}")]
    Server { status: u16, body: String },

    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

impl FetchError {
    pub fn suggested_wait(&self) -> Option<Duration> {
        match self {
            FetchError::RateLimited { wait } => *wait,
            _ => None,
        }
    }
}
