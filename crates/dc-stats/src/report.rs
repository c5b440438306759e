//! Column iterator and report aggregation.

use dc_core::{DiagnosticSink, Error, Report, Result, Sample};

use crate::compare::{CompareConfig, compare_distributions};

/// A loaded tabular dataset: named columns in file order.
///
/// Column-name agreement between two datasets is the loader's contract;
/// the iterator here re-checks only the shape (column count and zipped
/// column lengths) and fails loudly on divergence.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Label for diagnostics (usually the source file name).
    pub label: String,
    /// Columns in input order.
    pub columns: Vec<Sample>,
}

impl Dataset {
    /// Create a dataset from a label and columns.
    pub fn new(label: impl Into<String>, columns: Vec<Sample>) -> Self {
        Self { label: label.into(), columns }
    }
}

/// Compare every column pair and aggregate verdicts in column order.
///
/// Any single column's failure (shape divergence, degenerate test)
/// aborts the whole run; there is no per-column recovery.
pub fn run_report(
    a: &Dataset,
    b: &Dataset,
    config: &CompareConfig,
    mut sink: Option<&mut (dyn DiagnosticSink + '_)>,
) -> Result<Report> {
    if a.columns.len() != b.columns.len() {
        return Err(Error::ShapeMismatch(format!(
            "'{}' has {} columns but '{}' has {}",
            a.label,
            a.columns.len(),
            b.label,
            b.columns.len()
        )));
    }

    // Labels must stay distinct or diagnostics for the two sides of a
    // column would collide on the same key.
    let label_a = a.label.clone();
    let label_b = if b.label == a.label { format!("{}-2", b.label) } else { b.label.clone() };

    let mut report = Report::default();
    for (col_a, col_b) in a.columns.iter().zip(b.columns.iter()) {
        if col_a.len() != col_b.len() {
            return Err(Error::ShapeMismatch(format!(
                "column '{}': {} rows in '{}' vs {} rows in '{}'",
                col_a.name,
                col_a.len(),
                a.label,
                col_b.len(),
                b.label
            )));
        }

        tracing::debug!(column = %col_a.name, rows = col_a.len(), "comparing column");
        // Qualify names with the dataset label so downstream diagnostics
        // (QQ plots in particular) key on column AND dataset identity.
        let side_a =
            Sample::new(format!("{} ({})", col_a.name, label_a), col_a.values.clone());
        let side_b =
            Sample::new(format!("{} ({})", col_b.name, label_b), col_b.values.clone());
        let verdict = compare_distributions(&side_a, &side_b, config, sink.as_deref_mut())?;
        report.push(col_a.name.clone(), verdict);
    }

    Ok(report)
}
