use crate::error::{Result, SamplerError};
use serde::{Deserialize, Serialize};

/// Configuration for span sampling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SamplerConfig {
    /// Seed mixed into every per-file generator
    pub seed: u64,

    /// Spans to draw per file (fewer when the file has fewer chars)
    pub num_samples: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_samples: 25,
        }
    }
}

impl SamplerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_samples == 0 {
            return Err(SamplerError::invalid_config("num_samples must be > 0"));
        }
        Ok(())
    }
}
