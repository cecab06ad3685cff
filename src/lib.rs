// Rust Summary Engine
// Author: Gabriel Demetrios Lafis

//! # Rust Summary Engine
//!
//! Dataset summarization for analytics dashboards: reduce an arbitrary table of
//! loosely-typed records to a bounded representative sample, then describe it
//! with per-column statistics, correlations and data-quality metrics.
//!
//! ## Features
//!
//! - Stratified, time-based or random sampling, chosen by column inspection
//! - Numeric and categorical column statistics
//! - Pearson correlations between numeric columns
//! - Missing values, duplicates and inferred column types
//! - Background worker with a degraded fallback
//! - REST API for remote access
//!
//! ## Example
//!
//! ```rust
//! use rust_summary_engine::{
//!     data::{DataSet, Row},
//!     processing::{ColumnType, SummaryPipeline},
//! };
//!
//! let dataset: DataSet = (0..10)
//!     .map(|i| Row::new().with("id", i).with("group", if i < 7 { "a" } else { "b" }))
//!     .collect();
//!
//! let pipeline = SummaryPipeline::new(1000).unwrap();
//! let mut seen = Vec::new();
//! let analysis = pipeline.execute(&dataset, &mut |p: u8| seen.push(p));
//!
//! assert_eq!(analysis.sample.len(), 10);
//! assert_eq!(analysis.summary.overview.total_rows, 10);
//! assert_eq!(analysis.summary.data_quality.data_types["id"], ColumnType::Numeric);
//! assert_eq!(seen, vec![20, 40, 60, 80, 100]);
//! ```

pub mod data;
pub mod processing;
pub mod worker;
pub mod api;
pub mod utils;

// Re-export main types
pub use data::{DataSet, Row, Value};
pub use processing::{Analysis, Summary, SummaryPipeline};
pub use worker::{run_with_fallback, SummaryWorker};
pub use api::Server;
pub use utils::Config;
