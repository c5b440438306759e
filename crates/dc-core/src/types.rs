//! Common data types for distcheck

use serde::{Deserialize, Serialize};

/// A named column of finite real observations.
///
/// `values` keeps the input row order. Statistical routines require at
/// least 2 observations to be meaningful; individual tests impose their
/// own (stricter) minimums and fail with `Error::Computation` below them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Originating column name, possibly qualified by dataset label.
    pub name: String,
    /// Observations in input order.
    pub values: Vec<f64>,
}

impl Sample {
    /// Create a sample from a name and raw values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the sample holds no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Which normality test ran (or was requested as an override).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalityTest {
    /// Shapiro-Wilk (default for n <= 20).
    Shapiro,
    /// D'Agostino K-squared (default for 20 < n <= 50).
    Dagostino,
    /// Anderson-Darling (default for n > 50).
    Anderson,
}

impl std::fmt::Display for NormalityTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalityTest::Shapiro => write!(f, "Shapiro-Wilk Test"),
            NormalityTest::Dagostino => write!(f, "D'Agostino's K-squared Test"),
            NormalityTest::Anderson => write!(f, "Anderson-Darling Test"),
        }
    }
}

/// Which two-sample comparison test produced the final verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMethod {
    /// Student's t-test (both samples Gaussian, equal variances).
    StudentT,
    /// Welch's t-test (both samples Gaussian, unequal variances).
    WelchT,
    /// Mann-Whitney U rank test (at least one sample non-Gaussian).
    MannWhitney,
}

impl std::fmt::Display for ComparisonMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMethod::StudentT => write!(f, "Student's T-test"),
            ComparisonMethod::WelchT => write!(f, "Welch's T-test"),
            ComparisonMethod::MannWhitney => write!(f, "Mann-Whitney U-Test"),
        }
    }
}

/// Statistic and p-value from a single test invocation. Immutable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Test statistic (W, K², A², ratio, t, or U depending on the test).
    pub statistic: f64,
    /// Two-sided p-value (or the test's native p-value convention).
    pub p_value: f64,
}

/// Result of classifying one sample as Gaussian / non-Gaussian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalityVerdict {
    /// True iff the chosen test's p-value exceeded the fixed 0.05 threshold.
    pub is_gaussian: bool,
    /// Which normality test ran.
    pub test: NormalityTest,
    /// The test's statistic and p-value.
    pub outcome: TestOutcome,
}

/// Final same/different-distribution verdict for one column pair.
///
/// Carries the intermediate normality verdicts and the optional
/// variance-ratio outcome so the reporting layer can narrate the full
/// decision path without re-running anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonVerdict {
    /// True iff the comparison test's p-value exceeded the significance level.
    pub same_distribution: bool,
    /// Which comparison test decided the verdict.
    pub method: ComparisonMethod,
    /// Statistic and p-value of the deciding test.
    pub outcome: TestOutcome,
    /// Normality classification of the first sample.
    pub normality_a: NormalityVerdict,
    /// Normality classification of the second sample.
    pub normality_b: NormalityVerdict,
    /// Variance-ratio check outcome. `None` unless both samples were Gaussian.
    pub variance_check: Option<TestOutcome>,
}

/// Per-column verdicts, in input column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// One entry per compared column, insertion order = input column order.
    pub columns: Vec<ColumnVerdict>,
}

/// One column's entry in the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnVerdict {
    /// Column name.
    pub column: String,
    /// Full verdict for the column pair.
    pub verdict: ComparisonVerdict,
}

impl Report {
    /// Append a column verdict, preserving encounter order.
    pub fn push(&mut self, column: impl Into<String>, verdict: ComparisonVerdict) {
        self.columns.push(ColumnVerdict { column: column.into(), verdict });
    }

    /// Iterate `(column, same_distribution)` in report order.
    pub fn summary(&self) -> impl Iterator<Item = (&str, bool)> {
        self.columns.iter().map(|c| (c.column.as_str(), c.verdict.same_distribution))
    }
}
