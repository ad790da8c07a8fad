//! Legacy swallow-to-default adapters.
//!
//! The original monitoring backend never propagated an analysis failure: the
//! water-percent path degraded to a numeric `0.0` and the pollution path to a
//! sentinel string, and the upload succeeded either way. The two paths are
//! deliberately asymmetric: a caller reading `0.0` cannot tell "no water" from
//! "classifier failed", while the sentinel label is distinguishable from every
//! genuine outcome. This module reproduces that behavior verbatim for parity;
//! new callers should use [`Analyzer`](crate::Analyzer) and handle the
//! [`Result`](crate::Result) themselves.

use crate::classify::PollutionLevel;
use crate::engine::Analyzer;

/// Sentinel label substituted when the pollution analysis fails.
pub const ANALYSIS_ERROR_LABEL: &str = "analysis error";

/// Estimate water coverage, degrading every failure to exactly `0.0`.
///
/// Indistinguishable from a genuine "no water detected" result.
#[must_use]
pub fn water_percent_or_zero(bytes: &[u8]) -> f32 {
    let analyzer = Analyzer::new();
    analyzer
        .decode(bytes)
        .and_then(|img| analyzer.water_percent(&img))
        .unwrap_or(0.0)
}

/// Classify pollution, degrading every failure to the sentinel label.
///
/// On success returns one of the five ladder labels.
#[must_use]
pub fn pollution_label_or_sentinel(bytes: &[u8]) -> &'static str {
    let analyzer = Analyzer::new();
    analyzer
        .decode(bytes)
        .and_then(|img| analyzer.pollution_level(&img))
        .map_or(ANALYSIS_ERROR_LABEL, PollutionLevel::as_label)
}
