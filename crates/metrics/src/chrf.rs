//! chrF and chrF++ character n-gram F-scores.
//!
//! Follows the sacreBLEU formulation with its default (non-smoothed)
//! averaging: per-order precision and recall are averaged over the orders
//! where both sides produced n-grams, then combined into an F-beta score
//! on a 0-100 scale.

use fim_dataset::ChrfScore;
use std::collections::HashMap;

pub const CHAR_ORDER: usize = 6;
pub const BETA: u32 = 2;
/// Word order that turns chrF into chrF++
pub const CHRF_PLUS_PLUS_WORD_ORDER: usize = 2;

const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// chrF parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChrfParams {
    pub char_order: usize,
    pub word_order: usize,
    pub beta: u32,
}

impl ChrfParams {
    /// Plain chrF: character n-grams only
    #[must_use]
    pub const fn chrf() -> Self {
        Self {
            char_order: CHAR_ORDER,
            word_order: 0,
            beta: BETA,
        }
    }

    /// chrF++: character n-grams plus word unigrams and bigrams
    #[must_use]
    pub const fn chrf_plus_plus() -> Self {
        Self {
            word_order: CHRF_PLUS_PLUS_WORD_ORDER,
            ..Self::chrf()
        }
    }

    /// Score a hypothesis against a single reference
    #[must_use]
    pub fn score(&self, hypothesis: &str, reference: &str) -> ChrfScore {
        let mut stats = Vec::with_capacity(self.char_order + self.word_order);

        let hyp_chars = strip_whitespace(hypothesis);
        let ref_chars = strip_whitespace(reference);
        for n in 1..=self.char_order {
            stats.push(NgramStats::compare(
                &char_ngrams(&hyp_chars, n),
                &char_ngrams(&ref_chars, n),
            ));
        }

        if self.word_order > 0 {
            let hyp_words = split_words(hypothesis);
            let ref_words = split_words(reference);
            for n in 1..=self.word_order {
                stats.push(NgramStats::compare(
                    &word_ngrams(&hyp_words, n),
                    &word_ngrams(&ref_words, n),
                ));
            }
        }

        ChrfScore {
            score: f_score(&stats, self.beta),
            char_order: self.char_order,
            word_order: self.word_order,
            beta: self.beta,
        }
    }
}

/// chrF with default parameters
#[must_use]
pub fn chrf(hypothesis: &str, reference: &str) -> ChrfScore {
    ChrfParams::chrf().score(hypothesis, reference)
}

/// chrF++ with default parameters
#[must_use]
pub fn chrf_plus_plus(hypothesis: &str, reference: &str) -> ChrfScore {
    ChrfParams::chrf_plus_plus().score(hypothesis, reference)
}

#[derive(Debug, Clone, Copy, Default)]
struct NgramStats {
    hyp_total: usize,
    ref_total: usize,
    matches: usize,
}

impl NgramStats {
    fn compare(hyp: &HashMap<String, usize>, reference: &HashMap<String, usize>) -> Self {
        let matches = hyp
            .iter()
            .filter_map(|(gram, &count)| reference.get(gram).map(|&r| count.min(r)))
            .sum();
        Self {
            hyp_total: hyp.values().sum(),
            ref_total: reference.values().sum(),
            matches,
        }
    }
}

fn f_score(stats: &[NgramStats], beta: u32) -> f64 {
    let factor = f64::from(beta * beta);
    let mut precision = 0.0;
    let mut recall = 0.0;
    let mut effective_order = 0usize;

    for s in stats {
        if s.hyp_total > 0 && s.ref_total > 0 {
            precision += s.matches as f64 / s.hyp_total as f64;
            recall += s.matches as f64 / s.ref_total as f64;
            effective_order += 1;
        }
    }
    if effective_order == 0 {
        return 0.0;
    }
    precision /= effective_order as f64;
    recall /= effective_order as f64;

    let denom = factor * precision + recall;
    if denom <= 0.0 {
        return 0.0;
    }
    100.0 * (1.0 + factor) * precision * recall / denom
}

fn strip_whitespace(text: &str) -> Vec<char> {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn char_ngrams(chars: &[char], n: usize) -> HashMap<String, usize> {
    let mut grams = HashMap::new();
    if n == 0 || chars.len() < n {
        return grams;
    }
    for window in chars.windows(n) {
        *grams.entry(window.iter().collect::<String>()).or_insert(0) += 1;
    }
    grams
}

/// Whitespace tokens with one leading or trailing punctuation char split off
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for token in text.split_whitespace() {
        let mut chars = token.chars();
        let first = chars.next();
        let last = chars.next_back();
        match (first, last) {
            (Some(_), Some(end)) if PUNCTUATION.contains(end) => {
                let cut = token.len() - end.len_utf8();
                words.push(&token[..cut]);
                words.push(&token[cut..]);
            }
            (Some(start), Some(_)) if PUNCTUATION.contains(start) => {
                let cut = start.len_utf8();
                words.push(&token[..cut]);
                words.push(&token[cut..]);
            }
            _ => words.push(token),
        }
    }
    words
}

fn word_ngrams(words: &[&str], n: usize) -> HashMap<String, usize> {
    let mut grams = HashMap::new();
    if n == 0 || words.len() < n {
        return grams;
    }
    for window in words.windows(n) {
        *grams.entry(window.join(" ")).or_insert(0) += 1;
    }
    grams
}
