//! D'Agostino K-squared normality test.
//!
//! Combines a skewness z-test (D'Agostino 1970) and a kurtosis z-test
//! (Anscombe & Glynn 1983) into K² = Z₁² + Z₂², which is χ²(2) under the
//! null of normality. Needs n >= 8 for the skewness transform to hold.

use dc_core::{Error, Result, TestOutcome};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::moments::{kurtosis, require_finite, skewness};

/// Run the K-squared test, returning (K², p).
pub fn dagostino_k2(data: &[f64]) -> Result<TestOutcome> {
    let n = data.len();
    if n < 8 {
        return Err(Error::Computation(format!(
            "D'Agostino K-squared requires n >= 8, got {}",
            n
        )));
    }
    require_finite(data, "dagostino")?;

    let z_skew = skewness_z(data)?;
    let z_kurt = kurtosis_z(data)?;
    let k2 = z_skew * z_skew + z_kurt * z_kurt;

    let chi2 = ChiSquared::new(2.0)
        .map_err(|e| Error::Computation(format!("chi-squared(2) unavailable: {}", e)))?;
    let p = 1.0 - chi2.cdf(k2);

    Ok(TestOutcome { statistic: k2, p_value: p.clamp(0.0, 1.0) })
}

// D'Agostino (1970) transformation of g1 to an approximate standard normal.
fn skewness_z(data: &[f64]) -> Result<f64> {
    let n = data.len() as f64;
    let g1 = skewness(data)?;

    let y = g1 * (((n + 1.0) * (n + 3.0)) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    let y = if y == 0.0 { 1.0 } else { y };

    Ok(delta * (y / alpha + ((y / alpha).powi(2) + 1.0).sqrt()).ln())
}

// Anscombe & Glynn (1983) transformation of b2 to an approximate standard normal.
fn kurtosis_z(data: &[f64]) -> Result<f64> {
    let n = data.len() as f64;
    let b2 = kurtosis(data)?;

    let e = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 = 24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0).powi(2) * (n + 3.0) * (n + 5.0));
    let x = (b2 - e) / var_b2.sqrt();

    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * ((6.0 * (n + 3.0) * (n + 5.0)) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0 + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());

    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return Err(Error::Computation("kurtosis z-transform degenerate".to_string()));
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();

    Ok((term1 - term2) / (2.0 / (9.0 * a)).sqrt())
}
