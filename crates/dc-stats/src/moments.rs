//! Descriptive moments shared by the test routines.

use dc_core::{Error, Result};

/// Arithmetic mean.
///
/// Errors on an empty slice (every caller needs at least 2 observations
/// anyway, but the mean itself only requires 1).
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::Computation("mean of empty sample".to_string()));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Unbiased sample variance (denominator n - 1).
pub fn variance(data: &[f64]) -> Result<f64> {
    let n = data.len();
    if n < 2 {
        return Err(Error::Computation(format!(
            "variance requires at least 2 observations, got {}",
            n
        )));
    }
    let m = mean(data)?;
    Ok(data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64)
}

/// Unbiased sample standard deviation.
pub fn std_dev(data: &[f64]) -> Result<f64> {
    Ok(variance(data)?.sqrt())
}

/// Biased sample skewness g1 = m3 / m2^(3/2) (moment definition).
///
/// This is the quantity the D'Agostino skewness transform expects.
pub fn skewness(data: &[f64]) -> Result<f64> {
    let n = data.len() as f64;
    let m = mean(data)?;
    let m2 = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n;
    let m3 = data.iter().map(|&x| (x - m).powi(3)).sum::<f64>() / n;
    if m2 < 1e-300 {
        return Err(Error::Computation("skewness of zero-variance sample".to_string()));
    }
    Ok(m3 / m2.powf(1.5))
}

/// Biased sample kurtosis b2 = m4 / m2^2 (Pearson definition, not excess).
///
/// The Anscombe-Glynn kurtosis transform expects this form; subtract 3
/// for excess kurtosis.
pub fn kurtosis(data: &[f64]) -> Result<f64> {
    let n = data.len() as f64;
    let m = mean(data)?;
    let m2 = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n;
    let m4 = data.iter().map(|&x| (x - m).powi(4)).sum::<f64>() / n;
    if m2 < 1e-300 {
        return Err(Error::Computation("kurtosis of zero-variance sample".to_string()));
    }
    Ok(m4 / (m2 * m2))
}

/// Validate that every observation is finite.
pub fn require_finite(data: &[f64], name: &str) -> Result<()> {
    if data.iter().any(|v| !v.is_finite()) {
        return Err(Error::Validation(format!("sample '{}' contains non-finite values", name)));
    }
    Ok(())
}
