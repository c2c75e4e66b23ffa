use anyhow::{Context, Result};
use console::{style, Term};
use dialoguer::Input;
use fim_dataset::{MetricKind, Sample, SourceFile};
use std::fmt::{Display, Write as _};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Where annotator input comes from
pub trait LineSource {
    /// Show `prompt` and read one line without its terminator
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Print a message for the annotator
    fn notice(&mut self, message: &str) -> io::Result<()>;

    /// Wipe the screen before the next sample
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Interactive terminal input
pub struct TerminalSource {
    term: Term,
}

impl TerminalSource {
    #[must_use]
    pub fn new(term: Term) -> Self {
        Self { term }
    }
}

impl LineSource for TerminalSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        // the default theme appends its own ": "
        Input::<String>::new()
            .with_prompt(prompt.trim_end_matches(": "))
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(io::Error::other)
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        self.term.write_line(message)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.term.clear_screen()
    }
}

/// Line-by-line input from a reader, for piped stdin and tests
pub struct StreamSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> LineSource for StreamSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before annotation finished",
            ));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{message}")
    }
}

/// Ask for `key`, keeping `existing` on empty input.
///
/// Only an exactly empty line keeps the previous value. Without one every
/// input is parsed, so an empty line only succeeds for types that parse from
/// `""`. Parse failures re-prompt until a valid value arrives; running out of
/// input is an error.
pub fn prompt_with_default<T>(
    source: &mut dyn LineSource,
    key: &str,
    existing: Option<T>,
) -> io::Result<T>
where
    T: FromStr + Display,
{
    let prompt = match &existing {
        Some(previous) => {
            source.notice(&format!("Previous value is: {previous}"))?;
            format!("{key}: Input new value or press enter to keep: ")
        }
        None => format!("{key}: "),
    };

    let mut existing = existing;
    loop {
        let input = source.read_line(&prompt)?;
        if input.is_empty() {
            if let Some(previous) = existing.take() {
                return Ok(previous);
            }
        }
        // text is kept as typed; numbers may carry surrounding spaces
        match input.parse::<T>().or_else(|_| input.trim().parse::<T>()) {
            Ok(value) => return Ok(value),
            Err(_) => source.notice("Incorrect value type, enter again")?,
        }
    }
}

/// Code with the middle and the candidate highlighted, then the metrics
#[must_use]
pub fn render_sample(file: &SourceFile, sample: &Sample) -> String {
    let mut out = String::new();
    let (prefix, suffix) = file.context_of(sample).unwrap_or((file.text.as_str(), ""));

    out.push_str(prefix);
    let _ = write!(out, "{}", style(&sample.middle).cyan().bright());
    if let Some(generated) = &sample.generation_result {
        let _ = writeln!(out, "{}", style(generated).green().bright());
    }
    out.push_str(suffix);
    out.push('\n');

    if let Some(metrics) = &sample.metrics {
        for kind in MetricKind::ALL {
            let _ = writeln!(out, "{kind}: {}", metrics.value(kind));
        }
    }
    out
}

/// Walk every sample, collecting annotations and labels
pub fn annotate_dataset(files: &mut [SourceFile], source: &mut dyn LineSource) -> Result<usize> {
    let total: usize = files.iter().map(|f| f.samples.len()).sum();
    let mut done = 0;

    for file_idx in 0..files.len() {
        for sample_idx in 0..files[file_idx].samples.len() {
            let file = &files[file_idx];
            let sample = &file.samples[sample_idx];
            source.clear()?;
            source.notice(&format!(
                "[{}/{}] {}",
                done + 1,
                total,
                style(&file.filename).bold()
            ))?;
            source.notice(&render_sample(file, sample))?;

            let annotations = prompt_with_default(source, "annotations", sample.annotations.clone())
                .with_context(|| format!("{} sample #{sample_idx}", file.filename))?;
            let label = prompt_with_default(source, "label", sample.label)
                .with_context(|| format!("{} sample #{sample_idx}", file.filename))?;

            let sample = &mut files[file_idx].samples[sample_idx];
            sample.annotations = Some(annotations);
            sample.label = Some(label);
            done += 1;
        }
    }
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn source(input: &str) -> StreamSource<Cursor<Vec<u8>>, Vec<u8>> {
        StreamSource::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(source: StreamSource<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(source.into_writer()).unwrap()
    }

    #[test]
    fn test_empty_input_keeps_previous_value() {
        let mut src = source("\n");
        let value = prompt_with_default(&mut src, "label", Some(3.5)).unwrap();
        assert_eq!(value, 3.5);
        let out = transcript(src);
        assert!(out.starts_with("Previous value is: 3.5\n"));
        assert!(out.contains("label: Input new value or press enter to keep: "));
    }

    #[test]
    fn test_parse_failure_reprompts() {
        let mut src = source("good\n\n4\n");
        let value: f64 = prompt_with_default(&mut src, "label", None).unwrap();
        assert_eq!(value, 4.0);
        let out = transcript(src);
        assert_eq!(out.matches("Incorrect value type, enter again").count(), 2);
        assert_eq!(out.matches("label: ").count(), 3);
    }

    #[test]
    fn test_new_value_replaces_previous() {
        let mut src = source("2\n");
        assert_eq!(prompt_with_default(&mut src, "label", Some(5.0)).unwrap(), 2.0);
    }

    #[test]
    fn test_empty_annotation_is_accepted() {
        let mut src = source("\n");
        let value: String = prompt_with_default(&mut src, "annotations", None).unwrap();
        assert_eq!(value, "");
    }

    #[test]
    fn test_annotation_text_is_kept_as_typed() {
        let mut src = source("   indented note  \n");
        let value: String = prompt_with_default(&mut src, "annotations", None).unwrap();
        assert_eq!(value, "   indented note  ");

        let mut src = source(" \n");
        let value = prompt_with_default(&mut src, "annotations", Some("old".to_string())).unwrap();
        assert_eq!(value, " ");
    }

    #[test]
    fn test_label_tolerates_surrounding_spaces() {
        let mut src = source(" 4 \n");
        assert_eq!(prompt_with_default(&mut src, "label", Some(1.0)).unwrap(), 4.0);

        let mut src = source("  \n2\n");
        let value: f64 = prompt_with_default(&mut src, "label", Some(1.0)).unwrap();
        assert_eq!(value, 2.0);
        assert!(transcript(src).contains("Incorrect value type, enter again"));
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut src = source("oops\n");
        let err = prompt_with_default::<f64>(&mut src, "label", None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_render_shows_prefix_middle_candidate_and_metrics() {
        console::set_colors_enabled(false);
        let mut sample = Sample::new("x", 6, 7);
        sample.generation_result = Some("y".to_string());
        let file = SourceFile::new("a.py", "print(x)\n", vec![sample]);
        let rendered = render_sample(&file, &file.samples[0]);
        assert_eq!(rendered, "print(xy\n)\n\n");
    }

    #[test]
    fn test_annotate_fills_every_sample() {
        console::set_colors_enabled(false);
        let mut files = vec![SourceFile::new(
            "a.py",
            "a = 1\nb = 2\n",
            vec![Sample::new("1", 4, 5), Sample::new("2", 10, 11)],
        )];
        files[0].samples[1].label = Some(1.0);
        let mut src = source("looks fine\n5\nwrong\n\n");
        let done = annotate_dataset(&mut files, &mut src).unwrap();

        assert_eq!(done, 2);
        assert_eq!(files[0].samples[0].annotations.as_deref(), Some("looks fine"));
        assert_eq!(files[0].samples[0].label, Some(5.0));
        assert_eq!(files[0].samples[1].annotations.as_deref(), Some("wrong"));
        assert_eq!(files[0].samples[1].label, Some(1.0));
        assert!(transcript(src).contains("[2/2] a.py"));
    }
}
