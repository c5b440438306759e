//! Console rendering of a comparison report.

use std::fmt::Write;

use dc_core::{ComparisonMethod, NormalityVerdict, Report};

fn push_normality(out: &mut String, which: &str, verdict: &NormalityVerdict) {
    writeln!(
        out,
        "\t[INFO] {} is used for Normality Test: stat={:.3}, p={:.3}",
        verdict.test, verdict.outcome.statistic, verdict.outcome.p_value
    )
    .unwrap();
    writeln!(out, "\t[INFO] normality of {which}: {}.", verdict.is_gaussian).unwrap();
}

/// The opening banner. Printed before any analysis runs, so it shows
/// up even when a later column aborts the report.
pub fn banner(significance_level: f64) -> String {
    format!("[INFO] The Significance Level: {significance_level}\n")
}

/// Render the full narration the way the console report reads:
/// a per-column trace of every test that ran, then the verdict table.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    for entry in &report.columns {
        let v = &entry.verdict;
        writeln!(out, "[Test for {}]", entry.column).unwrap();
        push_normality(&mut out, "data", &v.normality_a);
        push_normality(&mut out, "other data", &v.normality_b);

        if let Some(var) = &v.variance_check {
            let label = if v.method == ComparisonMethod::StudentT {
                "Equal variance."
            } else {
                "Unequal variance."
            };
            writeln!(out, "\t[INFO] F-test for variance test: (p value = {}) {label}", var.p_value)
                .unwrap();
        }

        let conclusion =
            if v.same_distribution { "Same distribution." } else { "Different distribution." };
        writeln!(
            out,
            "\t[INFO] {} will be progressed: (p value = {}) {conclusion}",
            v.method, v.outcome.p_value
        )
        .unwrap();
        out.push('\n');
    }

    writeln!(out, "[Total result]").unwrap();
    for (column, same) in report.summary() {
        writeln!(out, "{column}: {}", if same { "Same" } else { "Different" }).unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::{ComparisonVerdict, NormalityTest, TestOutcome};

    fn verdict(same: bool, method: ComparisonMethod) -> ComparisonVerdict {
        let nv = NormalityVerdict {
            is_gaussian: method != ComparisonMethod::MannWhitney,
            test: NormalityTest::Shapiro,
            outcome: TestOutcome { statistic: 0.97, p_value: 0.41 },
        };
        ComparisonVerdict {
            same_distribution: same,
            method,
            outcome: TestOutcome { statistic: 1.2, p_value: if same { 0.3 } else { 0.002 } },
            normality_a: nv.clone(),
            normality_b: nv,
            variance_check: (method != ComparisonMethod::MannWhitney)
                .then_some(TestOutcome { statistic: 0.8, p_value: 0.2 }),
        }
    }

    #[test]
    fn test_banner_format() {
        assert_eq!(banner(0.05), "[INFO] The Significance Level: 0.05\n");
        assert_eq!(banner(0.01), "[INFO] The Significance Level: 0.01\n");
    }

    #[test]
    fn test_parametric_narration() {
        let mut report = Report::default();
        report.push("height", verdict(true, ComparisonMethod::StudentT));
        let text = render_report(&report);
        assert!(text.starts_with("[Test for height]"));
        assert!(text.contains("Shapiro-Wilk Test is used for Normality Test"));
        assert!(text.contains("F-test for variance test"));
        assert!(text.contains("Equal variance."));
        assert!(text.contains("Student's T-test will be progressed"));
        assert!(text.contains("Same distribution."));
        assert!(text.contains("[Total result]\nheight: Same\n"));
    }

    #[test]
    fn test_rank_narration_skips_variance_line() {
        let mut report = Report::default();
        report.push("skewed", verdict(false, ComparisonMethod::MannWhitney));
        let text = render_report(&report);
        assert!(!text.contains("F-test"));
        assert!(text.contains("Mann-Whitney U-Test will be progressed"));
        assert!(text.contains("skewed: Different"));
    }

    #[test]
    fn test_welch_reports_unequal_variance() {
        let mut report = Report::default();
        report.push("w", verdict(true, ComparisonMethod::WelchT));
        let text = render_report(&report);
        assert!(text.contains("Unequal variance."));
        assert!(text.contains("Welch's T-test will be progressed"));
    }
}
