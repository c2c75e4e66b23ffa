use crate::boundary::suffix_position;
use crate::config::SamplerConfig;
use crate::error::Result;
use crate::line_index::LineIndex;
use crate::source::read_source_lines;
use fim_dataset::{Sample, SourceFile};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use std::path::Path;

/// A file's lines prepared for span lookups
#[derive(Debug, Clone)]
pub struct SourceText {
    filename: String,
    lines: Vec<Vec<char>>,
    index: LineIndex,
}

impl SourceText {
    /// Index a file given as newline-terminated lines
    pub fn from_lines<S: AsRef<str>>(filename: impl Into<String>, lines: &[S]) -> Self {
        Self {
            filename: filename.into(),
            lines: lines.iter().map(|l| l.as_ref().chars().collect()).collect(),
            index: LineIndex::new(lines),
        }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Total chars, i.e. the number of valid sample offsets
    #[must_use]
    pub fn total_chars(&self) -> usize {
        self.index.total_chars()
    }

    /// Concatenated file text
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.iter().flatten().collect()
    }

    /// Derive the span that starts at a global char offset
    #[must_use]
    pub fn span_at(&self, offset: usize) -> Option<Sample> {
        let (line, column) = self.index.locate(offset)?;
        let chars = &self.lines[line];
        let end_column = suffix_position(chars, column);
        let middle: String = chars[column..end_column].iter().collect();
        let middle_end = self.index.line_start(line) + end_column;
        Some(Sample::new(middle, offset, middle_end))
    }

    /// Distinct offsets drawn uniformly from `0..total_chars`, in draw order.
    ///
    /// ChaCha8 is a fixed algorithm, so a seed keeps producing the same
    /// offsets across `rand` releases.
    #[must_use]
    pub fn draw_offsets(&self, seed: u64, num_samples: usize) -> Vec<usize> {
        let total = self.total_chars();
        let amount = num_samples.min(total);
        if amount == 0 {
            return Vec::new();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(file_seed(seed, &self.text()));
        rand::seq::index::sample(&mut rng, total, amount).into_vec()
    }

    /// Draw spans and package them as a dataset record
    #[must_use]
    pub fn sample(&self, seed: u64, num_samples: usize) -> SourceFile {
        let samples: Vec<Sample> = self
            .draw_offsets(seed, num_samples)
            .into_iter()
            .filter_map(|offset| self.span_at(offset))
            .collect();
        log::debug!(
            "{}: {} samples from {} chars",
            self.filename,
            samples.len(),
            self.total_chars()
        );
        SourceFile::new(self.filename.clone(), self.text(), samples)
    }
}

/// Seed for one file's generator: SHA-256 over the user seed and the file text.
///
/// Depends only on content, so reordering or adding files never changes the
/// spans drawn from an unchanged file.
#[must_use]
pub fn file_seed(seed: u64, text: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

/// Sample every `(filename, lines)` pair
pub fn sample_spans<N, S>(files: &[(N, Vec<S>)], seed: u64, num_samples: usize) -> Vec<SourceFile>
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    files
        .iter()
        .map(|(name, lines)| SourceText::from_lines(name.as_ref(), lines).sample(seed, num_samples))
        .collect()
}

/// Read and sample files from disk
pub fn sample_paths<P: AsRef<Path>>(paths: &[P], config: &SamplerConfig) -> Result<Vec<SourceFile>> {
    config.validate()?;
    let mut dataset = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let lines = read_source_lines(path)?;
        let source = SourceText::from_lines(path.to_string_lossy(), &lines);
        if source.total_chars() == 0 {
            log::warn!("{} is empty, no samples drawn", source.filename());
        }
        dataset.push(source.sample(config.seed, config.num_samples));
    }
    log::info!(
        "Sampled {} spans from {} files (seed={}, num_samples={})",
        dataset.iter().map(|f| f.samples.len()).sum::<usize>(),
        dataset.len(),
        config.seed,
        config.num_samples
    );
    Ok(dataset)
}
