//! # FIM Metrics
//!
//! Scores a model completion against the masked middle it was asked to
//! reproduce.
//!
//! | field                   | measure                                              |
//! |-------------------------|------------------------------------------------------|
//! | `chrf`                  | character n-gram F-score, word order 0               |
//! | `chrf++`                | chrF with word unigrams and bigrams                  |
//! | `exact_match`           | 1.0 when completion and middle are identical         |
//! | `syntactic_correctness` | 1 when the file with the completion spliced in parses |
//! | `levenshtein`           | InDel-normalized similarity ratio                    |
//! | `lcs`                   | longest common contiguous substring length           |
//! | `lcs_normalized`        | `lcs / len(middle)`, 0 for an empty middle           |
//!
//! Syntax checking is pluggable through [`SyntaxChecker`]; the built-in
//! [`TreeSitterChecker`] covers Rust, Python, JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```rust
//! use fim_dataset::Sample;
//! use fim_metrics::{evaluate, TreeSitterChecker};
//!
//! let text = "def f(x):\n    return x\n";
//! let mut sample = Sample::new("return x", 14, 22);
//! sample.generation_result = Some("return x".to_string());
//!
//! let checker = TreeSitterChecker::for_path("f.py").unwrap();
//! let metrics = evaluate(&sample, text, &checker).unwrap();
//! assert_eq!(metrics.lcs, 8);
//! ```

mod chrf;
mod error;
mod evaluator;
mod language;
mod similarity;
mod syntax;

pub use chrf::{chrf, chrf_plus_plus, ChrfParams};
pub use error::{MetricsError, Result};
pub use evaluator::{evaluate, evaluate_dataset, evaluate_file};
pub use language::Language;
pub use similarity::{indel_distance, levenshtein_ratio, longest_common_substring, LongestMatch};
pub use syntax::{CheckerFactory, SyntaxChecker, TreeSitterChecker, TreeSitterFactory};
