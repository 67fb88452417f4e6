// File: src/core/stats.rs
use crate::core::error::{AlphabetError, Axis, Result};
use crate::core::special::student_t_two_sided;
use crate::core::types::{CorrelationResult, PositionPair, RegressionResult};

/// Minimum number of aligned pairs for a fit.
pub const MIN_PAIRS: usize = 2;

/// Fits the OLS line and the Spearman correlation over the pairs.
/// x = source position, y = target position.
pub fn fit(pairs: &[PositionPair]) -> Result<(RegressionResult, CorrelationResult)> {
    if pairs.len() < MIN_PAIRS {
        return Err(AlphabetError::InsufficientData { found: pairs.len() });
    }
    let xs: Vec<f64> = pairs.iter().map(|p| p.source as f64).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.target as f64).collect();
    Ok((linear_regression(&xs, &ys)?, spearman(&xs, &ys)?))
}

/// Both coordinate slices must have the same length and at least
/// `MIN_PAIRS` entries.
fn check_lengths(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(AlphabetError::LengthMismatch { source_len: xs.len(), target_len: ys.len() });
    }
    if xs.len() < MIN_PAIRS {
        return Err(AlphabetError::InsufficientData { found: xs.len() });
    }
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Closed-form least squares of `ys` on `xs`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<RegressionResult> {
    check_lengths(xs, ys)?;
    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }
    if sxx == 0.0 {
        return Err(AlphabetError::ConstantInput { axis: Axis::Source });
    }
    let slope = sxy / sxx;
    Ok(RegressionResult { slope, intercept: mean_y - slope * mean_x })
}

/// 1-based ranks; tied values share the mean of the ranks they span.
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < indexed.len() {
        let start = i;
        let mut end = i + 1;
        while end < indexed.len() && indexed[end].1 == indexed[start].1 {
            end += 1;
        }
        let rank = (start + end - 1) as f64 * 0.5 + 1.0;
        for &(original, _) in &indexed[start..end] {
            ranks[original] = rank;
        }
        i = end;
    }
    ranks
}

/// Pearson correlation, or `None` when either input has zero variance.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }
    let den = (den_x * den_y).sqrt();
    (den > 0.0).then(|| (num / den).clamp(-1.0, 1.0))
}

/// Spearman rank correlation and its two-sided p-value from the
/// t-approximation with n - 2 degrees of freedom.
pub fn spearman(xs: &[f64], ys: &[f64]) -> Result<CorrelationResult> {
    check_lengths(xs, ys)?;
    let n = xs.len();
    let rx = ranks(xs);
    let ry = ranks(ys);
    let statistic = match pearson(&rx, &ry) {
        Some(rho) => rho,
        None => {
            let axis = if rx.iter().all(|&r| r == rx[0]) { Axis::Source } else { Axis::Target };
            return Err(AlphabetError::ConstantInput { axis });
        }
    };

    let df = (n - 2) as f64;
    let p_value = if n == 2 {
        1.0
    } else if statistic.abs() >= 1.0 {
        0.0
    } else {
        let t = statistic * (df / ((1.0 - statistic) * (1.0 + statistic))).sqrt();
        student_t_two_sided(t, df)
    };
    Ok(CorrelationResult { statistic, p_value })
}
