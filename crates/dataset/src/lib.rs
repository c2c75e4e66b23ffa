//! # FIM Dataset
//!
//! Record shapes exchanged between the evaluation stages.
//!
//! ```text
//! sample ──> dataset.json ──> run ──> output.json ──> annotate ──> annotated.json ──> correlate
//!            (middle spans)          (+generation,            (+annotations,
//!                                      +metrics)                +label)
//! ```
//!
//! Every stage reads the whole JSON array of [`SourceFile`] records, adds
//! fields to the samples it touches and writes the array back out. Optional
//! fields are omitted from the JSON until the stage that owns them has run,
//! so field presence is the pipeline progress marker.
//!
//! Offsets (`middle_start`, `middle_end`) count Unicode scalar values, not
//! bytes; use the helpers in [`span`] to slice text with them.

mod error;
mod io;
pub mod span;
mod types;

pub use error::{DatasetError, Result};
pub use io::{load_dataset, parse_dataset, save_dataset, serialize_dataset};
pub use types::{ChrfScore, ExactMatch, MetricKind, Metrics, Sample, SourceFile};
