pub mod config;
pub mod ingest;
pub mod logging;
pub mod output;
pub mod scoring;
