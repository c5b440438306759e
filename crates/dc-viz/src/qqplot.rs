//! Normal quantile-quantile plots.
//!
//! Uses Filliben's order-statistic medians for the theoretical axis and
//! an ordinary least-squares fit for the reference line, matching the
//! usual probability-plot construction.

use std::fs;
use std::path::{Path, PathBuf};

use statrs::distribution::{ContinuousCDF, Normal};

use dc_core::{DiagnosticSink, Error, Result, Sample};

use crate::canvas::{Canvas, Style};

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 55.0;

/// Filliben's estimate of the i-th order-statistic median (1-based).
fn plotting_position(i: usize, n: usize) -> f64 {
    if i == 1 {
        1.0 - 0.5f64.powf(1.0 / n as f64)
    } else if i == n {
        0.5f64.powf(1.0 / n as f64)
    } else {
        (i as f64 - 0.3175) / (n as f64 + 0.365)
    }
}

/// Theoretical standard-normal quantiles for a sample of size `n`.
fn theoretical_quantiles(n: usize) -> Vec<f64> {
    let std_normal = Normal::new(0.0, 1.0).expect("standard normal should be constructible");
    (1..=n).map(|i| std_normal.inverse_cdf(plotting_position(i, n))).collect()
}

/// Least-squares slope and intercept of `y` against `x`.
fn fit_line(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sxy += (xi - mean_x) * (yi - mean_y);
        sxx += (xi - mean_x) * (xi - mean_x);
    }
    let slope = sxy / sxx;
    (slope, mean_y - slope * mean_x)
}

fn format_tick(v: f64) -> String {
    if v.abs() >= 100.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Render a normal QQ plot of `sample` as an SVG document.
pub fn render_qq_plot(sample: &Sample) -> Result<String> {
    let n = sample.len();
    if n < 3 {
        return Err(Error::Computation(format!(
            "QQ plot for '{}' needs at least 3 observations, got {n}",
            sample.name
        )));
    }

    let mut ordered = sample.values.clone();
    ordered.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let theoretical = theoretical_quantiles(n);
    let (slope, intercept) = fit_line(&theoretical, &ordered);

    let (x_min, x_max) = (theoretical[0], theoretical[n - 1]);
    let mut y_min = ordered[0].min(slope * x_min + intercept);
    let mut y_max = ordered[n - 1].max(slope * x_max + intercept);
    if y_max - y_min < f64::EPSILON {
        // Flat sample; pad so the scale stays finite.
        y_min -= 0.5;
        y_max += 0.5;
    }

    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    let to_px = |x: f64, y: f64| {
        (
            MARGIN + (x - x_min) / (x_max - x_min) * plot_w,
            HEIGHT - MARGIN - (y - y_min) / (y_max - y_min) * plot_h,
        )
    };

    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    let frame = Style::stroked("black", 1.0);
    canvas.rect(MARGIN, MARGIN, plot_w, plot_h, &frame);

    // Axis ticks and labels.
    let tick = Style::stroked("black", 0.8);
    for k in 0..=4 {
        let fx = x_min + (x_max - x_min) * k as f64 / 4.0;
        let fy = y_min + (y_max - y_min) * k as f64 / 4.0;
        let (px, _) = to_px(fx, y_min);
        let (_, py) = to_px(x_min, fy);
        canvas.line(px, HEIGHT - MARGIN, px, HEIGHT - MARGIN + 4.0, &tick);
        canvas.text(px, HEIGHT - MARGIN + 16.0, &format_tick(fx), 9.0, "middle");
        canvas.line(MARGIN - 4.0, py, MARGIN, py, &tick);
        canvas.text(MARGIN - 7.0, py + 3.0, &format_tick(fy), 9.0, "end");
    }
    canvas.text(WIDTH / 2.0, HEIGHT - 12.0, "Theoretical quantiles", 11.0, "middle");
    canvas.text(WIDTH / 2.0, 20.0, &format!("QQ plot: {}", sample.name), 12.0, "middle");

    // Reference line from the least-squares fit.
    let (lx1, ly1) = to_px(x_min, slope * x_min + intercept);
    let (lx2, ly2) = to_px(x_max, slope * x_max + intercept);
    canvas.line(lx1, ly1, lx2, ly2, &Style::stroked("firebrick", 1.2));

    // Ordered observations against theoretical quantiles.
    let dot = Style::filled("steelblue");
    for (&tq, &obs) in theoretical.iter().zip(ordered.iter()) {
        let (px, py) = to_px(tq, obs);
        canvas.circle(px, py, 2.2, &dot);
    }

    Ok(canvas.finish_svg())
}

/// File name for a sample's plot, derived from its qualified name.
fn plot_file_name(sample_name: &str) -> String {
    let stem: String = sample_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}.svg")
}

/// Diagnostic sink that writes one QQ plot per classified sample.
#[derive(Debug)]
pub struct QqPlotSink {
    dir: PathBuf,
}

impl QqPlotSink {
    /// Plots will be written under `dir`, created on first emit.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target path for a given sample.
    pub fn path_for(&self, sample_name: &str) -> PathBuf {
        self.dir.join(plot_file_name(sample_name))
    }
}

impl DiagnosticSink for QqPlotSink {
    fn emit(&mut self, sample: &Sample) -> Result<()> {
        let svg = render_qq_plot(sample)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&sample.name);
        fs::write(&path, svg)?;
        tracing::debug!(path = %path.display(), "wrote QQ plot");
        Ok(())
    }
}

/// Convenience: render and write a single plot without a sink.
pub fn write_qq_plot(sample: &Sample, dir: &Path) -> Result<PathBuf> {
    let mut sink = QqPlotSink::new(dir);
    sink.emit(sample)?;
    Ok(sink.path_for(&sample.name))
}
