//! JSON export of analysis records.
//!
//! The authoritative store for analysis results is the caller's database; this
//! module is the explicit flat-file export path, one record per analyzed
//! image. Records mirror the image rows of the monitoring backend (integer
//! image id, foreign pin id, source, the two derived metrics) and are
//! append-only: an analysis is written once and never recomputed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::AnalysisResult;
use crate::compat::ANALYSIS_ERROR_LABEL;
use crate::error::Result;

/// One exported analysis: an image's provenance plus its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Image record id, when the caller has assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Foreign id of the map pin this image belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_id: Option<u64>,
    /// Source path or URL of the image.
    pub source: PathBuf,
    /// Image width in pixels (0 when unknown).
    pub width: u32,
    /// Image height in pixels (0 when unknown).
    pub height: u32,
    /// Estimated water coverage in `[0.0, 100.0]`.
    pub water_percent: f32,
    /// Pollution label: one of the five ladder labels, or the
    /// `"analysis error"` sentinel for a degraded compat-mode record.
    pub pollution: String,
}

impl AnalysisRecord {
    /// Build a record from a completed analysis.
    #[must_use]
    pub fn new(source: &Path, width: u32, height: u32, result: AnalysisResult) -> Self {
        Self {
            id: None,
            pin_id: None,
            source: source.to_path_buf(),
            width,
            height,
            water_percent: result.water_percent,
            pollution: result.pollution.as_label().to_string(),
        }
    }

    /// Build the legacy degraded record for a failed analysis: zero water and
    /// the sentinel label, never an error.
    #[must_use]
    pub fn degraded(source: &Path) -> Self {
        Self {
            id: None,
            pin_id: None,
            source: source.to_path_buf(),
            width: 0,
            height: 0,
            water_percent: 0.0,
            pollution: ANALYSIS_ERROR_LABEL.to_string(),
        }
    }

    /// Attach the caller-assigned image and pin ids.
    #[must_use]
    pub fn with_ids(mut self, id: u64, pin_id: u64) -> Self {
        self.id = Some(id);
        self.pin_id = Some(pin_id);
        self
    }
}

/// An ordered, append-only collection of analysis records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The exported records, in analysis order.
    pub records: Vec<AnalysisRecord>,
}

impl Report {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Existing records are never mutated.
    pub fn push(&mut self, record: AnalysisRecord) {
        self.records.push(record);
    }

    /// Number of records in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the report holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialization fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a previously saved report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
