//! Normality classifier: picks a test by override or sample size.

use dc_core::{DiagnosticSink, NormalityTest, NormalityVerdict, Result, Sample};

use crate::anderson::anderson_darling;
use crate::dagostino::dagostino_k2;
use crate::shapiro::shapiro_wilk;

/// Fixed threshold for the Gaussian verdict.
///
/// Deliberately independent of the configured comparison significance
/// level: "is it normal" and "is it the same distribution" are separate
/// questions with separate thresholds.
pub const NORMALITY_ALPHA: f64 = 0.05;

/// Pick which normality test to run.
///
/// An explicit override wins at any sample size; otherwise Shapiro-Wilk
/// up to 20 observations, D'Agostino up to 50, Anderson-Darling above.
pub fn select_test(n: usize, override_method: Option<NormalityTest>) -> NormalityTest {
    if let Some(method) = override_method {
        return method;
    }
    if n <= 20 {
        NormalityTest::Shapiro
    } else if n <= 50 {
        NormalityTest::Dagostino
    } else {
        NormalityTest::Anderson
    }
}

// Strict inequality: p exactly at the threshold is not Gaussian.
fn gaussian_verdict(p_value: f64) -> bool {
    p_value > NORMALITY_ALPHA
}

/// Classify `sample` as Gaussian / non-Gaussian.
///
/// Runs the selected test and, when a sink is present, emits a Q-Q
/// diagnostic for the sample. A test that cannot run on the data
/// (too small, constant) propagates its error; nothing is emitted then.
pub fn classify_normality(
    sample: &Sample,
    override_method: Option<NormalityTest>,
    sink: Option<&mut (dyn DiagnosticSink + '_)>,
) -> Result<NormalityVerdict> {
    let test = select_test(sample.len(), override_method);
    let outcome = match test {
        NormalityTest::Shapiro => shapiro_wilk(&sample.values)?,
        NormalityTest::Dagostino => dagostino_k2(&sample.values)?,
        NormalityTest::Anderson => anderson_darling(&sample.values)?,
    };

    tracing::debug!(
        sample = %sample.name,
        test = %test,
        statistic = outcome.statistic,
        p_value = outcome.p_value,
        "normality test complete"
    );

    if let Some(sink) = sink {
        sink.emit(sample)?;
    }

    Ok(NormalityVerdict { is_gaussian: gaussian_verdict(outcome.p_value), test, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_based_selection_boundaries() {
        assert_eq!(select_test(3, None), NormalityTest::Shapiro);
        assert_eq!(select_test(20, None), NormalityTest::Shapiro);
        assert_eq!(select_test(21, None), NormalityTest::Dagostino);
        assert_eq!(select_test(50, None), NormalityTest::Dagostino);
        assert_eq!(select_test(51, None), NormalityTest::Anderson);
        assert_eq!(select_test(5000, None), NormalityTest::Anderson);
    }

    #[test]
    fn test_override_wins_at_any_size() {
        assert_eq!(select_test(10, Some(NormalityTest::Anderson)), NormalityTest::Anderson);
        assert_eq!(select_test(200, Some(NormalityTest::Shapiro)), NormalityTest::Shapiro);
        assert_eq!(select_test(10, Some(NormalityTest::Dagostino)), NormalityTest::Dagostino);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!gaussian_verdict(0.05));
        assert!(gaussian_verdict(0.050000001));
        assert!(!gaussian_verdict(0.01));
    }

    #[test]
    fn test_classifier_reports_which_test_ran() {
        let small = Sample::new("small", vec![1.1, 2.0, 2.9, 4.2, 5.0, 5.9, 7.1, 8.0, 9.2, 10.0]);
        let v = classify_normality(&small, None, None).unwrap();
        assert_eq!(v.test, NormalityTest::Shapiro);

        let v = classify_normality(&small, Some(NormalityTest::Anderson), None).unwrap();
        assert_eq!(v.test, NormalityTest::Anderson);
    }

    #[test]
    fn test_degenerate_sample_propagates_error() {
        let constant = Sample::new("flat", vec![5.0; 12]);
        assert!(classify_normality(&constant, None, None).is_err());
    }

    struct CountingSink(usize);

    impl DiagnosticSink for CountingSink {
        fn emit(&mut self, _sample: &Sample) -> Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_sink_invoked_once_per_classification() {
        let sample = Sample::new("s", vec![1.0, 2.2, 2.8, 4.1, 5.3, 5.8, 7.2, 8.1]);
        let mut sink = CountingSink(0);
        classify_normality(&sample, None, Some(&mut sink)).unwrap();
        assert_eq!(sink.0, 1);
    }
}
