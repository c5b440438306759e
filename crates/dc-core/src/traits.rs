//! Core traits for distcheck
//!
//! The classifier emits diagnostics through a trait so the statistics
//! crate does not depend on any rendering or filesystem code.

use crate::Result;
use crate::types::Sample;

/// Sink for per-sample diagnostic output (Q-Q plots).
///
/// Implementations own their storage location and create it on first use.
pub trait DiagnosticSink {
    /// Emit a diagnostic for `sample`, keyed by the sample's name.
    fn emit(&mut self, sample: &Sample) -> Result<()>;
}
