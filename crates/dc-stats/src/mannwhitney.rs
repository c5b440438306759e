//! Mann-Whitney U rank-sum test.
//!
//! Non-parametric two-sample comparison: no normality assumption. Tied
//! observations receive the average of the ranks they span, which keeps
//! the test fully deterministic; the variance of U carries the matching
//! tie correction. Two-sided p via the normal approximation.

use dc_core::{Error, Result, TestOutcome};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::moments::require_finite;

/// Run the U test, returning (U₁, two-sided p).
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> Result<TestOutcome> {
    let n1 = a.len();
    let n2 = b.len();
    if n1 < 2 || n2 < 2 {
        return Err(Error::Computation(
            "Mann-Whitney requires at least 2 observations per sample".to_string(),
        ));
    }
    require_finite(a, "mann-whitney lhs")?;
    require_finite(b, "mann-whitney rhs")?;

    let n = n1 + n2;
    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let nf = n as f64;

    // group 0 = a, group 1 = b
    let mut combined: Vec<(f64, u8)> = Vec::with_capacity(n);
    combined.extend(a.iter().map(|&v| (v, 0u8)));
    combined.extend(b.iter().map(|&v| (v, 1u8)));
    combined.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));

    let ranks = average_ranks(&combined);

    let r1: f64 = combined
        .iter()
        .zip(ranks.iter())
        .filter(|((_, g), _)| *g == 0)
        .map(|(_, &r)| r)
        .sum();
    let u1 = r1 - n1f * (n1f + 1.0) / 2.0;

    let tie_correction = tie_correction(&combined);
    let mu = n1f * n2f / 2.0;
    let sigma_sq = n1f * n2f / 12.0 * (nf + 1.0 - tie_correction / (nf * (nf - 1.0)));
    if sigma_sq <= 0.0 {
        return Err(Error::Computation(
            "Mann-Whitney variance collapsed (all observations tied)".to_string(),
        ));
    }

    let z = (u1 - mu) / sigma_sq.sqrt();
    let norm = Normal::new(0.0, 1.0).expect("standard normal should be constructible");
    let p = 2.0 * (1.0 - norm.cdf(z.abs()));

    Ok(TestOutcome { statistic: u1, p_value: p.clamp(0.0, 1.0) })
}

// Average ranks over runs of tied values (1-based).
fn average_ranks(sorted: &[(f64, u8)]) -> Vec<f64> {
    let n = sorted.len();
    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && (sorted[j].0 - sorted[i].0).abs() < 1e-12 {
            j += 1;
        }
        let avg = (i + 1 + j) as f64 / 2.0;
        for rank in ranks.iter_mut().take(j).skip(i) {
            *rank = avg;
        }
        i = j;
    }
    ranks
}

// Σ tₖ(tₖ² − 1) over tie groups, for the variance correction.
fn tie_correction(sorted: &[(f64, u8)]) -> f64 {
    let n = sorted.len();
    let mut correction = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && (sorted[j].0 - sorted[i].0).abs() < 1e-12 {
            j += 1;
        }
        let t = (j - i) as f64;
        if t > 1.0 {
            correction += t * (t * t - 1.0);
        }
        i = j;
    }
    correction
}
