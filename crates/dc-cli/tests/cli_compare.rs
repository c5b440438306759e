use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use statrs::distribution::{ContinuousCDF, Normal};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_distcheck"))
}

fn tmp_path(filename: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("distcheck_cli_{}_{}_{}", std::process::id(), nanos, filename));
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn normal_quantiles(n: usize, mean: f64, sd: f64) -> Vec<f64> {
    let dist = Normal::new(mean, sd).unwrap();
    (1..=n).map(|i| dist.inverse_cdf((i as f64 - 0.5) / n as f64)).collect()
}

fn write_csv(path: &PathBuf, headers: &[&str], columns: &[Vec<f64>]) {
    assert_eq!(headers.len(), columns.len());
    let n_rows = columns[0].len();
    let mut out = headers.join(",");
    out.push('\n');
    for row in 0..n_rows {
        let fields: Vec<String> = columns.iter().map(|c| format!("{:.10}", c[row])).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    std::fs::write(path, out).unwrap();
}

#[test]
fn identical_datasets_report_same() {
    let a = tmp_path("same_a.csv");
    let b = tmp_path("same_b.csv");
    let col = normal_quantiles(30, 10.0, 2.0);
    write_csv(&a, &["x"], &[col.clone()]);
    write_csv(&b, &["x"], &[col]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
    ]);
    assert!(
        out.status.success(),
        "compare should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[INFO] The Significance Level: 0.05"), "stdout: {stdout}");
    assert!(stdout.contains("[Test for x]"), "stdout: {stdout}");
    assert!(stdout.contains("[Total result]"), "stdout: {stdout}");
    assert!(stdout.contains("x: Same"), "stdout: {stdout}");

    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn shifted_column_reports_different() {
    let a = tmp_path("shift_a.csv");
    let b = tmp_path("shift_b.csv");
    write_csv(&a, &["x", "y"], &[normal_quantiles(30, 0.0, 1.0), normal_quantiles(30, 4.0, 1.0)]);
    write_csv(&b, &["x", "y"], &[normal_quantiles(30, 0.0, 1.0), normal_quantiles(30, 9.0, 1.0)]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("x: Same"), "stdout: {stdout}");
    assert!(stdout.contains("y: Different"), "stdout: {stdout}");

    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn mismatched_columns_abort_before_any_verdict() {
    let a = tmp_path("cols_a.csv");
    let b = tmp_path("cols_b.csv");
    write_csv(&a, &["x"], &[normal_quantiles(20, 0.0, 1.0)]);
    write_csv(&b, &["z"], &[normal_quantiles(20, 0.0, 1.0)]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
    ]);
    assert!(!out.status.success(), "expected failure for mismatched columns");
    let stdout = String::from_utf8_lossy(&out.stdout);
    // The banner precedes analysis, so it survives the abort; verdicts do not.
    assert!(stdout.contains("[INFO] The Significance Level: 0.05"), "stdout: {stdout}");
    assert!(!stdout.contains("[Total result]"), "no verdicts should be printed: {stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr).to_lowercase();
    assert!(stderr.contains("column"), "unexpected stderr: {stderr}");

    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn mismatched_row_counts_abort() {
    let a = tmp_path("rows_a.csv");
    let b = tmp_path("rows_b.csv");
    write_csv(&a, &["x"], &[normal_quantiles(20, 0.0, 1.0)]);
    write_csv(&b, &["x"], &[normal_quantiles(25, 0.0, 1.0)]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
    ]);
    assert!(!out.status.success(), "expected failure for mismatched row counts");

    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn normality_override_applies_at_any_size() {
    // 10 rows would normally route to Shapiro-Wilk; the override wins.
    let a = tmp_path("ovr_a.csv");
    let b = tmp_path("ovr_b.csv");
    let col = normal_quantiles(10, 0.0, 1.0);
    write_csv(&a, &["x"], &[col.clone()]);
    write_csv(&b, &["x"], &[col]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
        "--normality-test",
        "anderson",
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Anderson-Darling Test"), "stdout: {stdout}");
    assert!(!stdout.contains("Shapiro-Wilk Test"), "stdout: {stdout}");

    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn qqplot_flag_writes_one_plot_per_sample() {
    let a = tmp_path("qq_a.csv");
    let b = tmp_path("qq_b.csv");
    let dir = tmp_path("qq_figures");
    let col = normal_quantiles(25, 0.0, 1.0);
    write_csv(&a, &["x"], &[col.clone()]);
    write_csv(&b, &["x"], &[col]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
        "--qqplot",
        "--qq-dir",
        dir.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));

    let plots: Vec<_> = std::fs::read_dir(&dir)
        .expect("qq dir should exist")
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "svg"))
        .collect();
    assert_eq!(plots.len(), 2, "one plot per dataset side: {plots:?}");

    let _ = std::fs::remove_dir_all(&dir);
    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn output_flag_writes_structured_report() {
    let a = tmp_path("json_a.csv");
    let b = tmp_path("json_b.csv");
    let output = tmp_path("report.json");
    let col = normal_quantiles(30, 0.0, 1.0);
    write_csv(&a, &["x"], &[col.clone()]);
    write_csv(&b, &["x"], &[col]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
        "--output",
        output.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(&output).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).expect("output should be JSON");
    let columns = v.get("columns").and_then(|c| c.as_array()).expect("columns array");
    assert_eq!(columns.len(), 1);
    let entry = &columns[0];
    assert_eq!(entry.get("column").and_then(|c| c.as_str()), Some("x"));
    let verdict = entry.get("verdict").expect("verdict object");
    assert_eq!(verdict.get("same_distribution").and_then(|s| s.as_bool()), Some(true));

    let _ = std::fs::remove_file(&output);
    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn rejects_out_of_range_significance_level() {
    let a = tmp_path("alpha_a.csv");
    let b = tmp_path("alpha_b.csv");
    let col = normal_quantiles(20, 0.0, 1.0);
    write_csv(&a, &["x"], &[col.clone()]);
    write_csv(&b, &["x"], &[col]);

    let out = run(&[
        "--data",
        a.to_string_lossy().as_ref(),
        "--other-data",
        b.to_string_lossy().as_ref(),
        "-a",
        "1.5",
    ]);
    assert!(!out.status.success(), "expected failure for alpha out of range");

    let _ = std::fs::remove_file(&a);
    let _ = std::fs::remove_file(&b);
}

#[test]
fn errors_on_missing_input() {
    let missing = tmp_path("does_not_exist.csv");
    let other = tmp_path("also_missing.csv");
    let out = run(&[
        "--data",
        missing.to_string_lossy().as_ref(),
        "--other-data",
        other.to_string_lossy().as_ref(),
    ]);
    assert!(!out.status.success(), "expected failure for missing input");
}
