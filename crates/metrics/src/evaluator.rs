use crate::chrf::{chrf, chrf_plus_plus};
use crate::error::{MetricsError, Result};
use crate::similarity::{levenshtein_ratio, longest_common_substring};
use crate::syntax::{CheckerFactory, SyntaxChecker};
use fim_dataset::{span, ExactMatch, Metrics, Sample, SourceFile};

/// Score a sample's completion against its ground-truth middle.
///
/// `syntactic_correctness` splices the completion into `full_text` at the
/// sample span and asks `checker` whether the result parses. Checker
/// failures other than a plain syntax error propagate.
pub fn evaluate(sample: &Sample, full_text: &str, checker: &dyn SyntaxChecker) -> Result<Metrics> {
    let generated = sample
        .generation_result
        .as_deref()
        .ok_or(MetricsError::MissingGeneration)?;
    let reference = sample.middle.as_str();

    let spliced = span::splice(full_text, sample.middle_start, sample.middle_end, generated)
        .ok_or_else(|| MetricsError::InvalidSpan {
            start: sample.middle_start,
            end: sample.middle_end,
            len: span::char_len(full_text),
        })?;
    let syntactic_correctness = u8::from(checker.check(&spliced)?);

    let lcs = longest_common_substring(generated, reference).size;
    let reference_len = reference.chars().count();
    let lcs_normalized = if reference_len == 0 {
        0.0
    } else {
        lcs as f64 / reference_len as f64
    };

    Ok(Metrics {
        chrf: chrf(generated, reference),
        exact_match: ExactMatch {
            exact_match: if generated == reference { 1.0 } else { 0.0 },
        },
        syntactic_correctness,
        levenshtein: levenshtein_ratio(generated, reference),
        lcs,
        lcs_normalized,
        chrf_plus_plus: chrf_plus_plus(generated, reference),
    })
}

/// Attach metrics to every sample of `file` that has a completion.
///
/// Returns the number of samples scored.
pub fn evaluate_file(file: &mut SourceFile, checker: &dyn SyntaxChecker) -> Result<usize> {
    let SourceFile {
        filename,
        text,
        samples,
    } = file;
    let mut scored = 0;
    for sample in samples.iter_mut() {
        if sample.generation_result.is_none() {
            continue;
        }
        sample.metrics = Some(evaluate(sample, text, checker)?);
        scored += 1;
    }
    log::debug!("{filename}: scored {scored} samples");
    Ok(scored)
}

/// Re-score every generated sample in a dataset
pub fn evaluate_dataset(files: &mut [SourceFile], factory: &dyn CheckerFactory) -> Result<usize> {
    let mut scored = 0;
    for file in files.iter_mut() {
        if file.samples.iter().all(|s| s.generation_result.is_none()) {
            continue;
        }
        let checker = factory.checker_for(&file.filename)?;
        scored += evaluate_file(file, checker.as_ref())?;
    }
    log::info!("Scored {scored} samples");
    Ok(scored)
}
