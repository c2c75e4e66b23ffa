use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use fim_sampler::SamplerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "fim-eval.toml";

/// Settings shared by every subcommand; flags override file values
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FimEvalConfig {
    pub sampling: SamplingSection,
    pub generation: GenerationSection,
    pub files: FilesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingSection {
    pub seed: u64,
    pub num_samples: usize,
    pub output: PathBuf,
}

impl Default for SamplingSection {
    fn default() -> Self {
        let sampler = SamplerConfig::default();
        Self {
            seed: sampler.seed,
            num_samples: sampler.num_samples,
            output: PathBuf::from("dataset.json"),
        }
    }
}

impl SamplingSection {
    #[must_use]
    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            seed: self.seed,
            num_samples: self.num_samples,
        }
    }
}

/// Which completion backend `run` talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Remote text-generation server
    #[default]
    Http,
    /// Empty completions, no model required
    Stub,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSection {
    pub backend: Backend,
    pub endpoint: String,
    pub max_new_tokens: usize,
    pub max_position_embeddings: usize,
    pub eos_token: String,
    /// `tokenizer.json` used to count prompt tokens; estimated when unset
    pub tokenizer: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            backend: Backend::Http,
            endpoint: "http://127.0.0.1:8080/generate".to_string(),
            max_new_tokens: 25,
            max_position_embeddings: 8192,
            eos_token: "<|endoftext|>".to_string(),
            tokenizer: None,
            timeout_secs: 120,
        }
    }
}

/// Default file names for each pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FilesSection {
    pub dataset: PathBuf,
    pub output: PathBuf,
    pub annotated: PathBuf,
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("dataset.json"),
            output: PathBuf::from("output.json"),
            annotated: PathBuf::from("annotated.json"),
        }
    }
}

impl FimEvalConfig {
    /// Reject settings no stage can run with
    pub fn validate(&self) -> Result<()> {
        if self.sampling.num_samples == 0 {
            bail!("sampling.num_samples must be > 0");
        }
        let generation = &self.generation;
        if generation.max_new_tokens == 0 {
            bail!("generation.max_new_tokens must be > 0");
        }
        if generation.max_new_tokens >= generation.max_position_embeddings {
            bail!(
                "generation.max_new_tokens ({}) must be below generation.max_position_embeddings ({})",
                generation.max_new_tokens,
                generation.max_position_embeddings
            );
        }
        if generation.backend == Backend::Http && generation.endpoint.trim().is_empty() {
            bail!("generation.endpoint is required for the http backend");
        }
        Ok(())
    }
}

/// Parse config bytes as JSON, falling back to TOML
pub fn parse_config(bytes: &[u8]) -> Result<FimEvalConfig> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML config to JSON: {err}"))?
        }
    };
    serde_json::from_value(value).map_err(|err| anyhow!("Config parse error: {err}"))
}

/// Load the config named by `--config`, or `fim-eval.toml` when it exists.
///
/// An explicit path must exist; a missing default file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<FimEvalConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                return Ok(FimEvalConfig::default());
            }
            default
        }
    };
    let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config =
        parse_config(&bytes).with_context(|| format!("Invalid config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
