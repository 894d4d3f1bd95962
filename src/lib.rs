//! # Rift Insight
//!
//! Player-performance analytics over completed ranked matches and their
//! timelines.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, timelines, analyses, reports)
//! - **calculate**: Role classification, per-game metrics and aggregate statistics
//! - **timeline**: Gold, loss, movement and fight analysis from match timelines
//! - **pipeline**: Batch entry point folding per-match results into one report
//! - **storage**: JSONL input and JSON report output
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod timeline;

#[cfg(test)]
mod test_support;

pub use models::*;
pub use pipeline::{analyze_match, analyze_player};
