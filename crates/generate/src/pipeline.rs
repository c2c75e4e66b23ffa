use crate::budget::InputBudget;
use crate::completer::Completer;
use crate::error::Result;
use crate::prompt::FimPrompt;
use fim_dataset::{span, DatasetError, SourceFile};
use fim_metrics::{evaluate, CheckerFactory};

/// Counters reported by a generation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub files: usize,
    pub generated: usize,
    /// Prompts that exceeded the input budget (warned, still generated)
    pub oversized: usize,
}

/// Fill every sample with a completion and score it.
///
/// Samples are processed one at a time in dataset order. The syntax
/// checker for a file is resolved before its first model call, so an
/// unsupported language fails before any generation is spent on it.
pub fn run_generation(
    files: &mut [SourceFile],
    completer: &mut dyn Completer,
    budget: &InputBudget,
    checkers: &dyn CheckerFactory,
) -> Result<GenerationSummary> {
    let mut summary = GenerationSummary::default();
    for file in files.iter_mut() {
        summary.files += 1;
        if file.samples.is_empty() {
            continue;
        }
        let checker = checkers.checker_for(&file.filename)?;
        let SourceFile {
            filename,
            text,
            samples,
        } = file;

        for (index, sample) in samples.iter_mut().enumerate() {
            let (prefix, suffix) = span::split_around(text, sample.middle_start, sample.middle_end)
                .ok_or_else(|| DatasetError::InvalidSpan {
                    filename: filename.clone(),
                    index,
                    start: sample.middle_start,
                    end: sample.middle_end,
                    len: span::char_len(text),
                })?;

            if !budget.check(&FimPrompt::new(prefix, suffix).render())?.fits() {
                summary.oversized += 1;
            }

            let completion = completer.complete(prefix, suffix)?;
            log::debug!("{filename} #{index}: {:?} -> {completion:?}", sample.middle);
            sample.generation_result = Some(completion);
            sample.metrics = Some(evaluate(sample, text, checker.as_ref())?);
            summary.generated += 1;
        }
    }
    log::info!(
        "Generated {} completions across {} files ({} over the input budget)",
        summary.generated,
        summary.files,
        summary.oversized
    );
    Ok(summary)
}
