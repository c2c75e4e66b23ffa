/// Prefix sums of line lengths, in chars
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_ends: Vec<usize>,
}

impl LineIndex {
    /// Build the index for a sequence of lines
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut total = 0usize;
        let line_ends = lines
            .iter()
            .map(|line| {
                total += line.as_ref().chars().count();
                total
            })
            .collect();
        Self { line_ends }
    }

    /// Total number of chars across all lines
    #[must_use]
    pub fn total_chars(&self) -> usize {
        self.line_ends.last().copied().unwrap_or(0)
    }

    /// Char offset where `line` starts
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        match line {
            0 => 0,
            _ => self.line_ends[line - 1],
        }
    }

    /// Line holding `offset`: the first line whose end is past the offset
    #[must_use]
    pub fn line_of(&self, offset: usize) -> Option<usize> {
        if offset >= self.total_chars() {
            return None;
        }
        Some(self.line_ends.partition_point(|&end| end <= offset))
    }

    /// `(line, column)` of a global char offset
    #[must_use]
    pub fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        let line = self.line_of(offset)?;
        Some((line, offset - self.line_start(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_offsets() {
        let index = LineIndex::new(&["ab\n", "c\n", "def"]);
        assert_eq!(index.total_chars(), 8);
        assert_eq!(index.locate(0), Some((0, 0)));
        assert_eq!(index.locate(2), Some((0, 2)));
        assert_eq!(index.locate(3), Some((1, 0)));
        assert_eq!(index.locate(5), Some((2, 0)));
        assert_eq!(index.locate(7), Some((2, 2)));
        assert_eq!(index.locate(8), None);
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let index = LineIndex::new(&["", "x\n", ""]);
        assert_eq!(index.locate(0), Some((1, 0)));
        assert_eq!(index.locate(1), Some((1, 1)));
        assert_eq!(index.locate(2), None);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let index = LineIndex::new(&["λ\n", "é"]);
        assert_eq!(index.total_chars(), 3);
        assert_eq!(index.locate(2), Some((1, 0)));
    }

    #[test]
    fn test_empty_index() {
        let index = LineIndex::new::<&str>(&[]);
        assert_eq!(index.total_chars(), 0);
        assert_eq!(index.line_of(0), None);
    }
}
