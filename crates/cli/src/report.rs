use fim_stats::{scientific, CorrelationReport, MetricCorrelation};
use std::path::Path;

pub fn render_correlation_report(dataset: &Path, report: &CorrelationReport) -> String {
    let mut md = String::new();
    md.push_str("# FIM metric correlation report\n\n");
    md.push_str(&format!("- Dataset: `{}`\n", dataset.display()));
    md.push_str(&format!("- Samples: `{}`\n\n", report.samples));

    md.push_str("| metric | pearson | pearson_p | spearman | spearman_p |\n");
    md.push_str("|---|---:|---:|---:|---:|\n");
    for (pearson, spearman) in report.pearson.iter().zip(&report.spearman) {
        md.push_str(&format!(
            "| `{}` | `{}` | `{}` | `{}` | `{}` |\n",
            pearson.metric,
            statistic(pearson),
            scientific(pearson.correlation.p_value),
            statistic(spearman),
            scientific(spearman.correlation.p_value),
        ));
    }
    md.push('\n');

    let undefined: Vec<String> = report
        .pearson
        .iter()
        .filter(|row| row.correlation.is_undefined())
        .map(|row| format!("`{}`", row.metric))
        .collect();
    if !undefined.is_empty() {
        md.push_str(&format!(
            "Constant across all samples (no correlation): {}\n",
            undefined.join(", ")
        ));
    }

    md
}

fn statistic(row: &MetricCorrelation) -> String {
    if row.correlation.is_undefined() {
        "n/a".to_string()
    } else {
        format!("{:.3}", row.correlation.statistic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fim_dataset::MetricKind;
    use fim_stats::Correlation;

    fn row(metric: MetricKind, statistic: f64, p_value: f64) -> MetricCorrelation {
        MetricCorrelation {
            metric,
            correlation: Correlation { statistic, p_value },
        }
    }

    #[test]
    fn correlation_report_renders_table() {
        let report = CorrelationReport {
            samples: 12,
            pearson: vec![
                row(MetricKind::ExactMatch, f64::NAN, f64::NAN),
                row(MetricKind::Chrf, 0.8123, 0.0012),
            ],
            spearman: vec![
                row(MetricKind::ExactMatch, f64::NAN, f64::NAN),
                row(MetricKind::Chrf, 0.75, 0.005),
            ],
        };
        let md = render_correlation_report(Path::new("annotated.json"), &report);
        assert!(md.contains("# FIM metric correlation report"));
        assert!(md.contains("- Samples: `12`"));
        assert!(md.contains("| `chrf` | `0.812` | `1.20e-03` | `0.750` | `5.00e-03` |"));
        assert!(md.contains("| `exact_match` | `n/a` | `nan` | `n/a` | `nan` |"));
        assert!(md.contains("Constant across all samples (no correlation): `exact_match`"));
    }
}
