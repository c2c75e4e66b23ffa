//! # FIM Sampler
//!
//! Picks cursor positions in source files and cuts out the "middle" a
//! fill-in-the-middle model should reproduce.
//!
//! ```text
//! lines ──> LineIndex (prefix sums of line lengths)
//!   │
//!   ├──> seeded draw of distinct char offsets
//!   │
//!   └──> per offset: (line, column) ──> bracket scan ──> Sample { middle, start, end }
//! ```
//!
//! A span always stays on the line of its start offset. It stops before the
//! first closing bracket that has no opener inside the span, otherwise at the
//! last char of the line, so the newline (or the final char of an
//! unterminated last line) is always left to the suffix.
//!
//! ## Example
//!
//! ```rust
//! use fim_sampler::SourceText;
//!
//! let source = SourceText::from_lines("demo.py", &["foo(bar, baz)\n"]);
//! let sample = source.span_at(9).unwrap();
//! assert_eq!(sample.middle, "baz");
//! assert_eq!((sample.middle_start, sample.middle_end), (9, 12));
//! ```

mod boundary;
mod config;
mod error;
mod line_index;
mod sampler;
mod source;

pub use boundary::suffix_position;
pub use config::SamplerConfig;
pub use error::{Result, SamplerError};
pub use line_index::LineIndex;
pub use sampler::{file_seed, sample_paths, sample_spans, SourceText};
pub use source::{normalize_newlines, read_source_lines, split_lines};
