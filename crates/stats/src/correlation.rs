use crate::distribution::correlation_p_value;
use crate::error::{Result, StatsError};
use serde::Serialize;

/// Correlation coefficient with its two-sided p-value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    pub statistic: f64,
    pub p_value: f64,
}

impl Correlation {
    const UNDEFINED: Self = Self {
        statistic: f64::NAN,
        p_value: f64::NAN,
    };

    /// True when one of the inputs was constant
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.statistic.is_nan()
    }
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<usize> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatsError::TooFewSamples(x.len()));
    }
    Ok(x.len())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson product-moment correlation.
///
/// A constant input has no defined correlation; both fields are NaN then.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation> {
    let n = check_lengths(x, y)?;
    let (mx, my) = (mean(x), mean(y));

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        log::warn!("Correlation is undefined for a constant input");
        return Ok(Correlation::UNDEFINED);
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    Ok(Correlation {
        statistic: r,
        p_value: correlation_p_value(r, n),
    })
}

/// Spearman rank correlation: Pearson over average ranks
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation> {
    check_lengths(x, y)?;
    pearson(&rank(x), &rank(y))
}

/// 1-based ranks; tied values share the mean of the ranks they span
#[must_use]
pub fn rank(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let shared = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }
    ranks
}
