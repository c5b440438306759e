//! # dc-core
//!
//! Shared types and error handling for distcheck.
//!
//! This crate is dependency-light on purpose: the statistics, plotting
//! and CLI crates all meet here and nowhere else.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::DiagnosticSink;
pub use types::{
    ColumnVerdict, ComparisonMethod, ComparisonVerdict, NormalityTest, NormalityVerdict, Report,
    Sample, TestOutcome,
};
