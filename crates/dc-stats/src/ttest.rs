//! Two-sample t-tests (Student's pooled and Welch's).

use dc_core::{Error, Result, TestOutcome};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::moments::{mean, require_finite, variance};

/// Independent two-sample t-test, returning (t, two-sided p).
///
/// `equal_var = true` pools the variances (Student, df = n₁+n₂−2);
/// `false` uses the Welch-Satterthwaite degrees of freedom.
pub fn two_sample_t_test(a: &[f64], b: &[f64], equal_var: bool) -> Result<TestOutcome> {
    if a.len() < 2 || b.len() < 2 {
        return Err(Error::Computation(
            "t-test requires at least 2 observations per sample".to_string(),
        ));
    }
    require_finite(a, "t-test lhs")?;
    require_finite(b, "t-test rhs")?;

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let mean1 = mean(a)?;
    let mean2 = mean(b)?;
    let var1 = variance(a)?;
    let var2 = variance(b)?;

    let (se, df) = if equal_var {
        let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0);
        ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), n1 + n2 - 2.0)
    } else {
        let se = (var1 / n1 + var2 / n2).sqrt();
        let df = (var1 / n1 + var2 / n2).powi(2)
            / ((var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0));
        (se, df)
    };

    if se < 1e-300 {
        return Err(Error::Computation(
            "t-test undefined when both samples have zero variance".to_string(),
        ));
    }

    let t = (mean1 - mean2) / se;
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| Error::Computation(format!("t-distribution unavailable: {}", e)))?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));

    Ok(TestOutcome { statistic: t, p_value: p.clamp(0.0, 1.0) })
}
