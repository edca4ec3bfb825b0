pub mod adjustments;
pub mod config;
pub mod error;
pub mod export;
pub mod football_data;
pub mod http_cache;
pub mod http_client;
pub mod label;
pub mod logging;
pub mod model;
pub mod picker;
pub mod pipeline;
pub mod probability;
pub mod provider;
pub mod rating;
pub mod report;
pub mod retry;
pub mod runner;
pub mod stats;
pub mod store;
