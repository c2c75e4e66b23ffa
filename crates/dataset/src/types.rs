use crate::error::{DatasetError, Result};
use crate::span;
use serde::{Deserialize, Serialize};

/// One source file together with the spans sampled from it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceFile {
    /// Path the text was read from
    pub filename: String,

    /// Full file text, the concatenation of its newline-terminated lines
    pub text: String,

    /// Sampled spans in draw order
    pub samples: Vec<Sample>,
}

impl SourceFile {
    /// Create a file record
    #[must_use]
    pub fn new(filename: impl Into<String>, text: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            samples,
        }
    }

    /// Check that every sample span lies inside the text and matches its `middle`
    pub fn validate(&self) -> Result<()> {
        let len = span::char_len(&self.text);
        for (index, sample) in self.samples.iter().enumerate() {
            let (start, end) = (sample.middle_start, sample.middle_end);
            if start > end || end > len {
                return Err(DatasetError::InvalidSpan {
                    filename: self.filename.clone(),
                    index,
                    start,
                    end,
                    len,
                });
            }
            if span::slice_chars(&self.text, start, end) != Some(sample.middle.as_str()) {
                return Err(DatasetError::MiddleMismatch {
                    filename: self.filename.clone(),
                    index,
                    start,
                    end,
                });
            }
        }
        Ok(())
    }

    /// Text before and after a sample's span
    #[must_use]
    pub fn context_of(&self, sample: &Sample) -> Option<(&str, &str)> {
        span::split_around(&self.text, sample.middle_start, sample.middle_end)
    }
}

/// A masked span and everything later stages attach to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    /// Ground-truth text of the span
    pub middle: String,

    /// Char offset of the span start in the file text
    pub middle_start: usize,

    /// Char offset one past the span end
    pub middle_end: usize,

    /// Completion produced by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_result: Option<String>,

    /// Scores of `generation_result` against `middle`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,

    /// Free-text annotator notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<String>,

    /// Human quality label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<f64>,
}

impl Sample {
    /// Create a freshly sampled span with no downstream fields
    #[must_use]
    pub fn new(middle: impl Into<String>, middle_start: usize, middle_end: usize) -> Self {
        Self {
            middle: middle.into(),
            middle_start,
            middle_end,
            generation_result: None,
            metrics: None,
            annotations: None,
            label: None,
        }
    }
}

/// chrF / chrF++ result, in the layout the scoring tools emit it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChrfScore {
    /// F-score on the 0-100 scale
    pub score: f64,
    pub char_order: usize,
    pub word_order: usize,
    pub beta: u32,
}

/// Exact-match result wrapped the way the scoring tools emit it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExactMatch {
    pub exact_match: f64,
}

/// Automatic metrics for one sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    pub chrf: ChrfScore,
    pub exact_match: ExactMatch,
    /// 1 when the spliced file parses, 0 otherwise
    pub syntactic_correctness: u8,
    pub levenshtein: f64,
    pub lcs: usize,
    pub lcs_normalized: f64,
    #[serde(rename = "chrf++")]
    pub chrf_plus_plus: ChrfScore,
}

impl Metrics {
    /// Scalar value of one metric
    #[must_use]
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::ExactMatch => self.exact_match.exact_match,
            MetricKind::Chrf => self.chrf.score,
            MetricKind::ChrfPlusPlus => self.chrf_plus_plus.score,
            MetricKind::SyntacticCorrectness => f64::from(self.syntactic_correctness),
            MetricKind::Levenshtein => self.levenshtein,
            MetricKind::Lcs => self.lcs as f64,
            MetricKind::LcsNormalized => self.lcs_normalized,
        }
    }
}

/// Metric identifiers, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    ExactMatch,
    Chrf,
    #[serde(rename = "chrf++")]
    ChrfPlusPlus,
    SyntacticCorrectness,
    Levenshtein,
    Lcs,
    LcsNormalized,
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::ExactMatch,
        MetricKind::Chrf,
        MetricKind::ChrfPlusPlus,
        MetricKind::SyntacticCorrectness,
        MetricKind::Levenshtein,
        MetricKind::Lcs,
        MetricKind::LcsNormalized,
    ];

    /// Name used in the dataset JSON and in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricKind::ExactMatch => "exact_match",
            MetricKind::Chrf => "chrf",
            MetricKind::ChrfPlusPlus => "chrf++",
            MetricKind::SyntacticCorrectness => "syntactic_correctness",
            MetricKind::Levenshtein => "levenshtein",
            MetricKind::Lcs => "lcs",
            MetricKind::LcsNormalized => "lcs_normalized",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chrf(score: f64, word_order: usize) -> ChrfScore {
        ChrfScore {
            score,
            char_order: 6,
            word_order,
            beta: 2,
        }
    }

    #[test]
    fn fresh_sample_omits_downstream_fields() {
        let sample = Sample::new("baz", 9, 12);
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"middle": "baz", "middle_start": 9, "middle_end": 12})
        );
    }

    #[test]
    fn metrics_use_scoring_tool_layout() {
        let metrics = Metrics {
            chrf: chrf(100.0, 0),
            exact_match: ExactMatch { exact_match: 1.0 },
            syntactic_correctness: 1,
            levenshtein: 1.0,
            lcs: 3,
            lcs_normalized: 1.0,
            chrf_plus_plus: chrf(100.0, 2),
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["chrf++"]["word_order"], 2);
        assert_eq!(json["exact_match"]["exact_match"], 1.0);
        assert_eq!(json["syntactic_correctness"], 1);

        let back: Metrics = serde_json::from_value(json).unwrap();
        assert_eq!(back, metrics);
    }

    #[test]
    fn metric_values_flatten_nested_scores() {
        let metrics = Metrics {
            chrf: chrf(42.5, 0),
            exact_match: ExactMatch { exact_match: 0.0 },
            syntactic_correctness: 0,
            levenshtein: 0.5,
            lcs: 4,
            lcs_normalized: 0.25,
            chrf_plus_plus: chrf(40.0, 2),
        };
        let values: Vec<f64> = MetricKind::ALL.iter().map(|k| metrics.value(*k)).collect();
        assert_eq!(values, vec![0.0, 42.5, 40.0, 0.0, 0.5, 4.0, 0.25]);
    }

    #[test]
    fn validate_rejects_out_of_range_span() {
        let file = SourceFile::new("a.py", "x = 1\n", vec![Sample::new("", 3, 10)]);
        assert!(matches!(
            file.validate(),
            Err(DatasetError::InvalidSpan { end: 10, len: 6, .. })
        ));
    }

    #[test]
    fn validate_rejects_mismatched_middle() {
        let file = SourceFile::new("a.py", "x = 1\n", vec![Sample::new("2", 4, 5)]);
        assert!(matches!(
            file.validate(),
            Err(DatasetError::MiddleMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn context_splits_text_at_span() {
        let file = SourceFile::new("a.py", "print(x)\n", vec![Sample::new("x", 6, 7)]);
        let (prefix, suffix) = file.context_of(&file.samples[0]).unwrap();
        assert_eq!(prefix, "print(");
        assert_eq!(suffix, ")\n");
    }
}
