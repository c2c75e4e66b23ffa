//! Fill-in-the-middle prompt layout.

pub const FIM_PREFIX: &str = "<fim_prefix>";
pub const FIM_SUFFIX: &str = "<fim_suffix>";
pub const FIM_MIDDLE: &str = "<fim_middle>";

/// Prefix/suffix pair rendered in prefix-suffix-middle order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FimPrompt<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
}

impl<'a> FimPrompt<'a> {
    #[must_use]
    pub const fn new(prefix: &'a str, suffix: &'a str) -> Self {
        Self { prefix, suffix }
    }

    /// `<fim_prefix>{prefix}<fim_suffix>{suffix}<fim_middle>`
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            FIM_PREFIX.len()
                + self.prefix.len()
                + FIM_SUFFIX.len()
                + self.suffix.len()
                + FIM_MIDDLE.len(),
        );
        out.push_str(FIM_PREFIX);
        out.push_str(self.prefix);
        out.push_str(FIM_SUFFIX);
        out.push_str(self.suffix);
        out.push_str(FIM_MIDDLE);
        out
    }
}

/// Cut the predicted middle out of raw model output.
///
/// Keeps what follows the last `<fim_middle>` marker (all of `raw` when the
/// marker is absent) up to the first end-of-sequence token.
#[must_use]
pub fn extract_middle<'r>(raw: &'r str, eos_token: &str) -> &'r str {
    let generated = raw
        .rsplit_once(FIM_MIDDLE)
        .map_or(raw, |(_, tail)| tail);
    if eos_token.is_empty() {
        return generated;
    }
    generated
        .split_once(eos_token)
        .map_or(generated, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EOS: &str = "<|endoftext|>";

    #[test]
    fn renders_psm_order() {
        let prompt = FimPrompt::new("def f(", "):\n    pass\n");
        assert_eq!(
            prompt.render(),
            "<fim_prefix>def f(<fim_suffix>):\n    pass\n<fim_middle>"
        );
    }

    #[test]
    fn extracts_text_after_middle_marker() {
        let raw = "<fim_prefix>a<fim_suffix>c<fim_middle>b<|endoftext|>junk";
        assert_eq!(extract_middle(raw, EOS), "b");
    }

    #[test]
    fn completion_only_output_is_kept() {
        assert_eq!(extract_middle("x + 1<|endoftext|>", EOS), "x + 1");
        assert_eq!(extract_middle("x + 1", EOS), "x + 1");
    }

    #[test]
    fn last_marker_wins() {
        let raw = "<fim_middle>one<fim_middle>two";
        assert_eq!(extract_middle(raw, EOS), "two");
    }

    #[test]
    fn empty_eos_disables_truncation() {
        assert_eq!(extract_middle("a<|endoftext|>b", ""), "a<|endoftext|>b");
    }
}
