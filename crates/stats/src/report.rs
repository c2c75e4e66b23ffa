use crate::correlation::{pearson, spearman, Correlation};
use crate::error::Result;
use fim_dataset::{DatasetError, MetricKind, SourceFile};
use serde::Serialize;
use std::fmt::Write as _;

/// Label and metric columns gathered from an annotated dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub labels: Vec<f64>,
    /// One column per metric, in [`MetricKind::ALL`] order
    pub metrics: Vec<(MetricKind, Vec<f64>)>,
}

impl Series {
    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Gather labels and metric values from every sample.
///
/// Fails on the first sample without metrics or label.
pub fn collect_series(files: &[SourceFile]) -> Result<Series> {
    let mut labels = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); MetricKind::ALL.len()];

    for file in files {
        for (index, sample) in file.samples.iter().enumerate() {
            let metrics = sample
                .metrics
                .as_ref()
                .ok_or_else(|| DatasetError::missing(&file.filename, index, "metrics"))?;
            let label = sample
                .label
                .ok_or_else(|| DatasetError::missing(&file.filename, index, "label"))?;

            labels.push(label);
            for (column, kind) in columns.iter_mut().zip(MetricKind::ALL) {
                column.push(metrics.value(kind));
            }
        }
    }

    Ok(Series {
        labels,
        metrics: MetricKind::ALL.into_iter().zip(columns).collect(),
    })
}

/// Correlation of one metric with the human labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricCorrelation {
    pub metric: MetricKind,
    #[serde(flatten)]
    pub correlation: Correlation,
}

/// Pearson and Spearman correlations of every metric against the labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub samples: usize,
    pub pearson: Vec<MetricCorrelation>,
    pub spearman: Vec<MetricCorrelation>,
}

impl CorrelationReport {
    /// Plain-text table: a `Pearson` block, a blank line, then a `Spearman` block
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (block, (title, rows)) in [("Pearson", &self.pearson), ("Spearman", &self.spearman)]
            .into_iter()
            .enumerate()
        {
            if block > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{title}");
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:<25}\tstatistic={},   p_value={}",
                    row.metric.as_str(),
                    fixed(row.correlation.statistic),
                    scientific(row.correlation.p_value)
                );
            }
        }
        out
    }
}

/// Correlate every metric with the labels of an annotated dataset
pub fn correlate(files: &[SourceFile]) -> Result<CorrelationReport> {
    let series = collect_series(files)?;
    log::info!("Correlating {} labelled samples", series.len());

    let mut report = CorrelationReport {
        samples: series.len(),
        pearson: Vec::with_capacity(series.metrics.len()),
        spearman: Vec::with_capacity(series.metrics.len()),
    };
    for (metric, values) in &series.metrics {
        report.pearson.push(MetricCorrelation {
            metric: *metric,
            correlation: pearson(&series.labels, values)?,
        });
        report.spearman.push(MetricCorrelation {
            metric: *metric,
            correlation: spearman(&series.labels, values)?,
        });
    }
    Ok(report)
}

/// Two decimals; non-finite values print as `nan`, `inf` or `-inf`
#[must_use]
pub fn fixed(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        non_finite(value)
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Two-decimal scientific notation with a signed, two-digit exponent (`1.24e-01`)
#[must_use]
pub fn scientific(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    let raw = format!("{value:.2e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}
