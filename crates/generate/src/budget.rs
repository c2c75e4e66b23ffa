use crate::error::{GenerateError, Result};
use std::path::Path;
use tokenizers::Tokenizer;

/// Counts prompt tokens
pub enum TokenCounter {
    /// Exact count from a `tokenizer.json`
    Tokenizer(Box<Tokenizer>),
    /// Rough count: ~4 chars per token
    Estimate,
}

impl TokenCounter {
    /// Load a Hugging Face `tokenizer.json`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|err| {
            GenerateError::tokenizer(format!("failed to load {}: {err}", path.display()))
        })?;
        Ok(Self::Tokenizer(Box::new(tokenizer)))
    }

    /// Number of tokens in `text`
    pub fn count(&self, text: &str) -> Result<usize> {
        match self {
            Self::Tokenizer(tokenizer) => tokenizer
                .encode(text, false)
                .map(|encoding| encoding.len())
                .map_err(|err| GenerateError::tokenizer(err.to_string())),
            Self::Estimate => Ok((text.chars().count() / 4).max(1)),
        }
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokenizer(_) => f.write_str("TokenCounter::Tokenizer"),
            Self::Estimate => f.write_str("TokenCounter::Estimate"),
        }
    }
}

/// Outcome of a budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCheck {
    pub tokens: usize,
    pub limit: usize,
}

impl BudgetCheck {
    #[must_use]
    pub const fn fits(&self) -> bool {
        self.tokens <= self.limit
    }
}

/// Room left in the model context for a prompt once generation is reserved
#[derive(Debug)]
pub struct InputBudget {
    counter: TokenCounter,
    max_position_embeddings: usize,
    max_new_tokens: usize,
}

impl InputBudget {
    pub fn new(
        counter: TokenCounter,
        max_position_embeddings: usize,
        max_new_tokens: usize,
    ) -> Result<Self> {
        if max_new_tokens == 0 {
            return Err(GenerateError::invalid_config("max_new_tokens must be > 0"));
        }
        if max_new_tokens >= max_position_embeddings {
            return Err(GenerateError::invalid_config(format!(
                "max_new_tokens ({max_new_tokens}) must be below max_position_embeddings ({max_position_embeddings})"
            )));
        }
        Ok(Self {
            counter,
            max_position_embeddings,
            max_new_tokens,
        })
    }

    /// Largest prompt, in tokens, that leaves room for generation
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.max_position_embeddings - self.max_new_tokens
    }

    /// Count the prompt and warn when it does not fit; never fails on size
    pub fn check(&self, prompt: &str) -> Result<BudgetCheck> {
        let check = BudgetCheck {
            tokens: self.counter.count(prompt)?,
            limit: self.limit(),
        };
        if !check.fits() {
            log::warn!(
                "The input is too big: {} tokens, limit {} ({} positions - {} new tokens)",
                check.tokens,
                check.limit,
                self.max_position_embeddings,
                self.max_new_tokens
            );
        }
        Ok(check)
    }
}
