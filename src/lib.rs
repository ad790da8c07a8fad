//! Estimate water coverage and coarse pollution levels in photos of water
//! bodies via HSV color-space heuristics.
//!
//! Crowdsourced monitoring backends attach photos to map pins; this crate is
//! the analysis core that derives two metrics from each photo: the percentage
//! of water-colored pixels (two blue bands, unioned) and a pollution label
//! from a fixed decision ladder over sediment and algae coverage.
//!
//! # Quick Start
//!
//! ```no_run
//! use aquascan::Analyzer;
//!
//! let analyzer = Analyzer::new();
//! let bytes = std::fs::read("lake.jpg").unwrap();
//! let result = analyzer.analyze_bytes(&bytes).unwrap();
//! println!("{:.1}% water, {}", result.water_percent, result.pollution);
//! ```
//!
//! # Error handling
//!
//! All analyzer operations return a typed [`Result`]; a decode failure is an
//! error, never a silent default. The original backend instead swallowed
//! failures into `0.0` / `"analysis error"` — that behavior survives behind
//! the explicit adapters in [`compat`].

#![deny(missing_docs)]

pub mod classify;
pub mod compat;
mod engine;
pub mod error;
pub mod hsv;
pub mod mask;
pub mod report;

pub use classify::{
    AnalysisResult, PollutionLevel, PollutionThresholds, WaterBands, ALGAE, SEDIMENT, WATER_DARK,
    WATER_PRIMARY,
};
pub use engine::{is_supported_image, Analyzer, ProcessOptions, ProcessResult};
pub use error::{Error, Result};
pub use report::{AnalysisRecord, Report};
