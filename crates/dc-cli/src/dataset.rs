//! CSV dataset loading and header reconciliation.

use std::path::Path;

use anyhow::{Context, Result};
use dc_core::Sample;
use dc_stats::Dataset;

/// Read a headered CSV file into named numeric columns.
///
/// Every cell must parse as a finite float; the first offending cell
/// fails the load with its row and column in the message.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .context("failed to read CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        anyhow::bail!("{} has no columns", path.display());
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (row_idx, record) in rdr.records().enumerate() {
        let record =
            record.with_context(|| format!("failed to read row {} of {}", row_idx + 2, label))?;
        if record.len() != headers.len() {
            anyhow::bail!(
                "{label} row {}: expected {} fields, found {}",
                row_idx + 2,
                headers.len(),
                record.len()
            );
        }
        for (col_idx, field) in record.iter().enumerate() {
            let value: f64 = field.trim().parse().with_context(|| {
                format!(
                    "{label} row {} column '{}': cannot parse '{}' as a number",
                    row_idx + 2,
                    headers[col_idx],
                    field
                )
            })?;
            if !value.is_finite() {
                anyhow::bail!(
                    "{label} row {} column '{}': non-finite value",
                    row_idx + 2,
                    headers[col_idx]
                );
            }
            columns[col_idx].push(value);
        }
    }

    let samples = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Sample::new(name, values))
        .collect();
    Ok(Dataset::new(label, samples))
}

/// Both files must carry the same column names in the same order.
pub fn check_headers_match(a: &Dataset, b: &Dataset) -> Result<()> {
    let names_a: Vec<&str> = a.columns.iter().map(|c| c.name.as_str()).collect();
    let names_b: Vec<&str> = b.columns.iter().map(|c| c.name.as_str()).collect();
    if names_a == names_b {
        return Ok(());
    }

    let mut sorted_a = names_a.clone();
    let mut sorted_b = names_b.clone();
    sorted_a.sort_unstable();
    sorted_b.sort_unstable();
    if sorted_a == sorted_b {
        anyhow::bail!(
            "'{}' and '{}' list the same columns in a different order: {:?} vs {:?}",
            a.label,
            b.label,
            names_a,
            names_b
        );
    }
    anyhow::bail!(
        "'{}' and '{}' have different columns: {:?} vs {:?}",
        a.label,
        b.label,
        names_a,
        names_b
    )
}
