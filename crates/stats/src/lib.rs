//! # FIM Stats
//!
//! How well does each automatic metric track human judgement? This crate
//! answers that for an annotated dataset with Pearson and Spearman
//! correlations, each paired with a two-sided p-value from the t
//! distribution.
//!
//! ```
//! use fim_stats::spearman;
//!
//! let c = spearman(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 30.0, 40.0]).unwrap();
//! assert!((c.statistic - 1.0).abs() < 1e-12);
//! ```
//!
//! Inputs where one side is constant have no defined correlation; they come
//! back as NaN rather than an error so that one degenerate metric does not
//! hide the rest of the report.

mod correlation;
pub mod distribution;
mod error;
mod report;

pub use correlation::{pearson, rank, spearman, Correlation};
pub use error::{Result, StatsError};
pub use report::{
    collect_series, correlate, fixed, scientific, CorrelationReport, MetricCorrelation, Series,
};
