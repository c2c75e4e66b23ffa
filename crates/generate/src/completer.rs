use crate::error::Result;

/// The model capability: fill the gap between `prefix` and `suffix`
pub trait Completer {
    fn complete(&mut self, prefix: &str, suffix: &str) -> Result<String>;
}

impl<F> Completer for F
where
    F: FnMut(&str, &str) -> Result<String>,
{
    fn complete(&mut self, prefix: &str, suffix: &str) -> Result<String> {
        self(prefix, suffix)
    }
}

/// Offline backend that always predicts an empty middle
#[derive(Debug, Clone, Copy, Default)]
pub struct StubCompleter;

impl Completer for StubCompleter {
    fn complete(&mut self, _prefix: &str, _suffix: &str) -> Result<String> {
        Ok(String::new())
    }
}
