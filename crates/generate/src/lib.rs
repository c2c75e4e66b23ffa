//! # FIM Generate
//!
//! The model boundary of the evaluation pipeline. A [`Completer`] turns a
//! prefix/suffix pair into a predicted middle; everything model-specific
//! (prompt layout, end-of-sequence handling, transport) lives behind it.
//!
//! ```text
//! SourceFile.text ──split at span──> (prefix, suffix)
//!     │                                   │
//!     │                 InputBudget::check (warn only)
//!     │                                   │
//!     │                      Completer::complete
//!     │                                   │
//!     └────────── evaluate(sample) <── generation_result
//! ```
//!
//! Closures `FnMut(&str, &str) -> Result<String>` are completers, which is
//! how tests and embedders inject their own model.

mod budget;
mod completer;
mod error;
mod http;
mod pipeline;
mod prompt;

pub use budget::{BudgetCheck, InputBudget, TokenCounter};
pub use completer::{Completer, StubCompleter};
pub use error::{GenerateError, Result};
pub use http::{HttpCompleter, HttpCompleterConfig};
pub use pipeline::{run_generation, GenerationSummary};
pub use prompt::{extract_middle, FimPrompt, FIM_MIDDLE, FIM_PREFIX, FIM_SUFFIX};
