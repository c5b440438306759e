//! SVG diagnostic plots for distcheck.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canvas;
pub mod qqplot;

pub use canvas::{Canvas, Style};
pub use qqplot::{render_qq_plot, write_qq_plot, QqPlotSink};
