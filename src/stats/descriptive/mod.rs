// Slice-level kernels behind the table operations in `stats`

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::stats::SummaryStats;

/// Summary statistics of the present values of one column
pub(crate) fn describe_impl(column: &str, data: &[f64]) -> Result<SummaryStats> {
    if data.is_empty() {
        return Err(Error::InsufficientData {
            column: column.to_string(),
            required: 1,
            actual: 0,
        });
    }

    let count = data.len();
    let mean = mean(data);
    let std = sample_std(data, mean);

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Ok(SummaryStats {
        count,
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: median_sorted(&sorted),
        q3: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Arithmetic mean; 0.0 for an empty slice
///
/// Accumulated as offsets from the first value, so a constant slice yields
/// that value exactly and its deviations are all zero.
pub(crate) fn mean(data: &[f64]) -> f64 {
    let Some(&first) = data.first() else {
        return 0.0;
    };
    first + data.iter().map(|&x| x - first).sum::<f64>() / data.len() as f64
}

/// Sample standard deviation (n - 1 denominator), undefined below two values
pub(crate) fn sample_std(data: &[f64], mean: f64) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let sum_squared_diff = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
    Some((sum_squared_diff / (data.len() - 1) as f64).sqrt())
}

/// Middle value of sorted data, mean of the two middle values for even counts
pub(crate) fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Linear interpolation between closest ranks
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;

    if lo == hi {
        return sorted[lo];
    }

    let weight_hi = idx - lo as f64;
    sorted[lo] * (1.0 - weight_hi) + sorted[hi] * weight_hi
}

fn check_pair_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.is_empty() {
        return Err(Error::EmptyData("no paired values".into()));
    }
    Ok(())
}

/// Sample covariance (n - 1 denominator)
pub(crate) fn covariance_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair_lengths(x, y)?;

    let n = x.len();
    if n < 2 {
        return Err(Error::InsufficientData {
            column: "covariance".into(),
            required: 2,
            actual: n,
        });
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let cov = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>()
        / (n - 1) as f64;

    Ok(cov)
}

/// Sample Pearson correlation.
///
/// Returns exactly 0.0 when either side has zero variance, so a correlation
/// matrix never has undefined cells.
pub(crate) fn pearson_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair_lengths(x, y)?;

    let mean_x = mean(x);
    let mean_y = mean(y);

    // Σ(xi - x̄)(yi - ȳ)
    let numerator = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    let ss_x = x.iter().map(|&xi| (xi - mean_x).powi(2)).sum::<f64>();
    let ss_y = y.iter().map(|&yi| (yi - mean_y).powi(2)).sum::<f64>();

    if ss_x == 0.0 || ss_y == 0.0 {
        return Ok(0.0);
    }

    Ok(numerator / (ss_x * ss_y).sqrt())
}
