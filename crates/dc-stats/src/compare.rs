//! Distribution comparison selector.
//!
//! Per pair: classify both samples, then branch. Both Gaussian → check
//! variance equality and run the matching t-test; otherwise go straight
//! to Mann-Whitney. The variance check never runs on the non-parametric
//! branch.

use dc_core::{
    ComparisonMethod, ComparisonVerdict, DiagnosticSink, NormalityTest, Result, Sample,
};

use crate::classify::classify_normality;
use crate::mannwhitney::mann_whitney_u;
use crate::ttest::two_sample_t_test;
use crate::variance::variance_ratio_test;

/// Knobs shared by every column comparison.
#[derive(Debug, Clone, Copy)]
pub struct CompareConfig {
    /// Significance level for the variance check and the final verdict.
    pub significance_level: f64,
    /// Force a particular normality test instead of size-based selection.
    pub normality_override: Option<NormalityTest>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self { significance_level: 0.05, normality_override: None }
    }
}

/// Compare two samples end to end, returning the full decision path.
///
/// Pure given its inputs: same samples and config always produce the
/// same verdict and p-values.
pub fn compare_distributions(
    a: &Sample,
    b: &Sample,
    config: &CompareConfig,
    mut sink: Option<&mut (dyn DiagnosticSink + '_)>,
) -> Result<ComparisonVerdict> {
    let normality_a = classify_normality(a, config.normality_override, sink.as_deref_mut())?;
    let normality_b = classify_normality(b, config.normality_override, sink.as_deref_mut())?;

    let alpha = config.significance_level;

    if normality_a.is_gaussian && normality_b.is_gaussian {
        let variance_check = variance_ratio_test(&a.values, &b.values)?;
        let equal_var = variance_check.p_value > alpha;
        let method = if equal_var { ComparisonMethod::StudentT } else { ComparisonMethod::WelchT };
        let outcome = two_sample_t_test(&a.values, &b.values, equal_var)?;

        tracing::debug!(
            method = %method,
            t = outcome.statistic,
            p_value = outcome.p_value,
            "parametric comparison complete"
        );

        Ok(ComparisonVerdict {
            same_distribution: outcome.p_value > alpha,
            method,
            outcome,
            normality_a,
            normality_b,
            variance_check: Some(variance_check),
        })
    } else {
        let outcome = mann_whitney_u(&a.values, &b.values)?;

        tracing::debug!(u = outcome.statistic, p_value = outcome.p_value, "rank comparison complete");

        Ok(ComparisonVerdict {
            same_distribution: outcome.p_value > alpha,
            method: ComparisonMethod::MannWhitney,
            outcome,
            normality_a,
            normality_b,
            variance_check: None,
        })
    }
}
