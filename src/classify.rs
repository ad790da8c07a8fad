//! Water bands, pollution thresholds, and the classification ladder.
//!
//! Band boundaries and ladder thresholds come from the field-calibrated values
//! of the original monitoring deployment. The ladder is ordered: sediment
//! checks run before the algae check, so an image that is both heavily brown
//! and heavily green classifies by its sediment load. Reordering the rungs
//! changes the outcome for such images and is a behavior change, not a
//! refactor.

use serde::{Deserialize, Serialize};

use crate::hsv::HsvRange;

/// Primary water band: blues and turquoises.
pub const WATER_PRIMARY: HsvRange = HsvRange::new(90, 130, 50, 255, 50, 255);

/// Secondary water band: darker water and reflective patches the primary band
/// misses at low saturation and value.
pub const WATER_DARK: HsvRange = HsvRange::new(100, 120, 30, 150, 30, 150);

/// Brown/yellowish band indicating suspended sediment or contamination.
pub const SEDIMENT: HsvRange = HsvRange::new(10, 25, 100, 255, 20, 200);

/// Green band indicating excessive algae growth.
pub const ALGAE: HsvRange = HsvRange::new(40, 80, 50, 255, 50, 255);

/// The four HSV bands an [`crate::Analyzer`] masks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterBands {
    /// Blue/turquoise water.
    pub primary: HsvRange,
    /// Dark or reflective water.
    pub dark: HsvRange,
    /// Brown sediment.
    pub sediment: HsvRange,
    /// Green algae.
    pub algae: HsvRange,
}

impl Default for WaterBands {
    fn default() -> Self {
        Self {
            primary: WATER_PRIMARY,
            dark: WATER_DARK,
            sediment: SEDIMENT,
            algae: ALGAE,
        }
    }
}

/// Coverage-ratio thresholds (percentages) for the classification ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutionThresholds {
    /// Brown coverage above this is high contamination.
    pub brown_high: f32,
    /// Brown coverage above this is moderate contamination.
    pub brown_moderate: f32,
    /// Green coverage above this is a possible algae bloom.
    pub green_algae: f32,
    /// Brown coverage above this is slight turbidity.
    pub brown_turbidity: f32,
}

impl Default for PollutionThresholds {
    fn default() -> Self {
        Self {
            brown_high: 15.0,
            brown_moderate: 8.0,
            green_algae: 20.0,
            brown_turbidity: 3.0,
        }
    }
}

impl PollutionThresholds {
    /// Run the fixed-priority ladder over the two coverage ratios.
    ///
    /// Evaluated top to bottom, first match wins. Brown rungs bracket the
    /// green rung: brown at 10% with green at 25% is moderate contamination,
    /// not an algae bloom.
    #[must_use]
    pub fn classify(&self, brown_ratio: f32, green_ratio: f32) -> PollutionLevel {
        if brown_ratio > self.brown_high {
            PollutionLevel::HighContamination
        } else if brown_ratio > self.brown_moderate {
            PollutionLevel::ModerateContamination
        } else if green_ratio > self.green_algae {
            PollutionLevel::AlgaeBloom
        } else if brown_ratio > self.brown_turbidity {
            PollutionLevel::SlightTurbidity
        } else {
            PollutionLevel::ApparentlyClean
        }
    }
}

/// Coarse pollution classification of a water-body photo.
///
/// Serializes as its human-readable label, the form the surrounding
/// persistence layer stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollutionLevel {
    /// Heavy brown/sediment coverage.
    #[serde(rename = "high contamination")]
    HighContamination,
    /// Noticeable brown/sediment coverage.
    #[serde(rename = "moderate contamination")]
    ModerateContamination,
    /// Dominantly green water.
    #[serde(rename = "possible algae bloom")]
    AlgaeBloom,
    /// Minor brown/sediment coverage.
    #[serde(rename = "slight turbidity")]
    SlightTurbidity,
    /// None of the ladder rungs matched.
    #[serde(rename = "apparently clean water")]
    ApparentlyClean,
}

impl PollutionLevel {
    /// The stable label string for this level.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::HighContamination => "high contamination",
            Self::ModerateContamination => "moderate contamination",
            Self::AlgaeBloom => "possible algae bloom",
            Self::SlightTurbidity => "slight turbidity",
            Self::ApparentlyClean => "apparently clean water",
        }
    }
}

impl std::fmt::Display for PollutionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// The two derived metrics for one analyzed image.
///
/// Produced once per image by the analyzer and attached to the image record by
/// the caller; there is no recomputation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Estimated water coverage in `[0.0, 100.0]`.
    pub water_percent: f32,
    /// Pollution classification from the decision ladder.
    pub pollution: PollutionLevel,
}
