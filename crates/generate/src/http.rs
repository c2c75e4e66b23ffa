use crate::completer::Completer;
use crate::error::{GenerateError, Result};
use crate::prompt::{extract_middle, FimPrompt};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for a text-generation-inference style `/generate` endpoint
#[derive(Debug, Clone)]
pub struct HttpCompleterConfig {
    /// Full URL of the generate route
    pub endpoint: String,
    pub max_new_tokens: usize,
    /// Completion is cut at the first occurrence of this token
    pub eos_token: String,
    pub timeout: Duration,
}

/// Greedy FIM completions from a remote generation server
pub struct HttpCompleter {
    config: HttpCompleterConfig,
    client: Client,
}

impl HttpCompleter {
    pub fn new(config: HttpCompleterConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(GenerateError::invalid_config("generation endpoint is empty"));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn request_body<'p>(&self, prompt: &'p str) -> GenerateRequest<'p> {
        GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: self.config.max_new_tokens,
                do_sample: false,
                return_full_text: false,
            },
        }
    }
}

impl Completer for HttpCompleter {
    fn complete(&mut self, prefix: &str, suffix: &str) -> Result<String> {
        let prompt = FimPrompt::new(prefix, suffix).render();
        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request_body(&prompt))
            .send()?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(GenerateError::Status { status, body });
        }
        let parsed: GenerateResponse = resp.json()?;
        let raw = parsed
            .into_text()
            .ok_or_else(|| GenerateError::backend("generation response had no generated_text"))?;
        Ok(extract_middle(&raw, &self.config.eos_token).to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: usize,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// `/generate` answers with an object, the root route with a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Single(item) => Some(item.generated_text),
            Self::Batch(items) => items.into_iter().next().map(|item| item.generated_text),
        }
    }
}
