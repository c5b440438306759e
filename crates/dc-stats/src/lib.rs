//! Statistical tests and the distribution-comparison pipeline.
//!
//! The crate is organized bottom-up: sample moments, the three
//! normality tests, the two-sample tests, then the classifier and
//! selector that tie them together, and finally the per-column report
//! driver. All routines return [`dc_core::Result`] and never panic on
//! degenerate input.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anderson;
pub mod classify;
pub mod compare;
pub mod dagostino;
pub mod mannwhitney;
pub mod moments;
pub mod report;
pub mod shapiro;
pub mod ttest;
pub mod variance;

pub use anderson::anderson_darling;
pub use classify::{classify_normality, select_test, NORMALITY_ALPHA};
pub use compare::{compare_distributions, CompareConfig};
pub use dagostino::dagostino_k2;
pub use mannwhitney::mann_whitney_u;
pub use report::{run_report, Dataset};
pub use shapiro::shapiro_wilk;
pub use ttest::two_sample_t_test;
pub use variance::variance_ratio_test;
