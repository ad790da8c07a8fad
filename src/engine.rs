//! Core analysis engine.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::classify::{AnalysisResult, PollutionLevel, PollutionThresholds, WaterBands};
use crate::error::{Error, Result};
use crate::mask::hsv_mask;
use crate::report::AnalysisRecord;

/// Options controlling file processing behavior.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Degrade failures to the legacy defaults (water `0.0`, label
    /// `"analysis error"`) instead of reporting them.
    pub compat: bool,
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// The analysis record, when one was produced.
    pub record: Option<AnalysisRecord>,
    /// Human-readable status message.
    pub message: String,
}

/// The analyzer holding the configured HSV bands and ladder thresholds.
///
/// Create once with [`Analyzer::new()`] and reuse for multiple images; each
/// call owns its image buffer and masks exclusively, so a shared analyzer is
/// safe under concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    bands: WaterBands,
    thresholds: PollutionThresholds,
}

impl Analyzer {
    /// Create an analyzer with the default bands and thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom bands and thresholds.
    #[must_use]
    pub fn with_config(bands: WaterBands, thresholds: PollutionThresholds) -> Self {
        Self { bands, thresholds }
    }

    /// Decode image bytes into an RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for malformed or empty bytes and
    /// [`Error::EmptyImage`] if the decoded buffer has zero pixels. A decode
    /// failure is always an error, never a zero-filled image.
    pub fn decode(&self, bytes: &[u8]) -> Result<RgbImage> {
        let img = image::load_from_memory(bytes)?.to_rgb8();
        check_non_empty(&img)?;
        Ok(img)
    }

    /// Estimate the percentage of water-colored pixels.
    ///
    /// Unions the primary blue/turquoise band with the dark/reflective band
    /// and takes the coverage ratio. The result is clamped to `[0.0, 100.0]`
    /// as a documented contract bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-pixel buffer.
    pub fn water_percent(&self, image: &RgbImage) -> Result<f32> {
        check_non_empty(image)?;
        let primary = hsv_mask(image, &self.bands.primary);
        let dark = hsv_mask(image, &self.bands.dark);
        let water = &primary | &dark;
        Ok(water.coverage_percent().clamp(0.0, 100.0))
    }

    /// Classify the pollution level from sediment and algae coverage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-pixel buffer.
    pub fn pollution_level(&self, image: &RgbImage) -> Result<PollutionLevel> {
        check_non_empty(image)?;
        let brown_ratio = hsv_mask(image, &self.bands.sediment).coverage_percent();
        let green_ratio = hsv_mask(image, &self.bands.algae).coverage_percent();
        Ok(self.thresholds.classify(brown_ratio, green_ratio))
    }

    /// Run both analyses over a decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-pixel buffer.
    pub fn analyze(&self, image: &RgbImage) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            water_percent: self.water_percent(image)?,
            pollution: self.pollution_level(image)?,
        })
    }

    /// Decode bytes and run both analyses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] or [`Error::EmptyImage`] if the bytes do not
    /// decode to a non-empty image.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult> {
        let img = self.decode(bytes)?;
        self.analyze(&img)
    }

    /// Process a single image file: load, analyze, build a record.
    ///
    /// In compat mode a failed analysis still yields a record carrying the
    /// legacy defaults, mirroring the original pipeline where a broken
    /// analysis never blocked the upload.
    #[must_use]
    pub fn process_file(&self, input: &Path, opts: &ProcessOptions) -> ProcessResult {
        let mut result = ProcessResult {
            path: input.to_path_buf(),
            success: false,
            record: None,
            message: String::new(),
        };

        let analysis = if is_supported_image(input) {
            std::fs::read(input).map_err(Error::from).and_then(|bytes| {
                let img = self.decode(&bytes)?;
                let res = self.analyze(&img)?;
                Ok((img.width(), img.height(), res))
            })
        } else {
            let ext = input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("none")
                .to_string();
            Err(Error::UnsupportedFormat(ext))
        };

        match analysis {
            Ok((w, h, res)) => {
                result.record = Some(AnalysisRecord::new(input, w, h, res));
                result.success = true;
                result.message = format!("{:.1}% water, {}", res.water_percent, res.pollution);
            }
            Err(e) if opts.compat => {
                result.record = Some(AnalysisRecord::degraded(input));
                result.success = true;
                result.message = format!("analysis degraded to defaults: {e}");
            }
            Err(e) => {
                result.message = format!("Failed to analyze: {e}");
            }
        }

        result
    }

    /// Process all supported images in a directory.
    ///
    /// Uses parallel iteration when the `cli` feature is enabled (via rayon).
    /// Files are visited in path order; returns a [`ProcessResult`] for each
    /// supported image found.
    #[must_use]
    pub fn process_directory(&self, input_dir: &Path, opts: &ProcessOptions) -> Vec<ProcessResult> {
        let mut entries: Vec<_> = match std::fs::read_dir(input_dir) {
            Ok(rd) => rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .filter(|e| is_supported_image(e.path().as_path()))
                .map(|e| e.path())
                .collect(),
            Err(e) => {
                return vec![ProcessResult {
                    path: input_dir.to_path_buf(),
                    success: false,
                    record: None,
                    message: format!("Failed to read directory: {e}"),
                }];
            }
        };
        entries.sort();

        #[cfg(feature = "cli")]
        {
            use rayon::prelude::*;
            entries
                .par_iter()
                .map(|path| self.process_file(path, opts))
                .collect()
        }

        #[cfg(not(feature = "cli"))]
        {
            entries
                .iter()
                .map(|path| self.process_file(path, opts))
                .collect()
        }
    }
}

fn check_non_empty(image: &RgbImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn uniform(w: u32, h: u32, px: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(px))
    }

    #[test]
    fn uniform_water_blue_is_full_coverage() {
        let analyzer = Analyzer::new();
        let img = uniform(16, 16, [0, 85, 255]);
        let pct = analyzer.water_percent(&img).unwrap();
        assert!((pct - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn uniform_red_is_zero_coverage() {
        let analyzer = Analyzer::new();
        let img = uniform(16, 16, [255, 0, 0]);
        let pct = analyzer.water_percent(&img).unwrap();
        assert!(pct.abs() < f32::EPSILON);
    }

    #[test]
    fn dark_band_catches_pixels_outside_the_primary_band() {
        let analyzer = Analyzer::new();
        // H=109, S=41, V=100: below the primary band's saturation floor but
        // inside the dark/reflective band.
        let img = uniform(4, 4, [84, 90, 100]);
        let pct = analyzer.water_percent(&img).unwrap();
        assert!((pct - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn water_percent_is_in_bounds_for_one_pixel_images() {
        let analyzer = Analyzer::new();
        for px in [[0u8, 85, 255], [255, 0, 0], [128, 128, 128], [0, 0, 0]] {
            let pct = analyzer.water_percent(&uniform(1, 1, px)).unwrap();
            assert!((0.0..=100.0).contains(&pct), "out of bounds: {pct}");
        }
    }

    #[test]
    fn empty_image_is_rejected_not_zeroed() {
        let analyzer = Analyzer::new();
        let img = RgbImage::new(0, 0);
        assert!(matches!(
            analyzer.water_percent(&img),
            Err(Error::EmptyImage { .. })
        ));
        assert!(matches!(
            analyzer.pollution_level(&img),
            Err(Error::EmptyImage { .. })
        ));
    }

    #[test]
    fn decode_rejects_empty_bytes() {
        let analyzer = Analyzer::new();
        assert!(matches!(analyzer.decode(&[]), Err(Error::Decode(_))));
    }

    #[test]
    fn uniform_brown_is_high_contamination() {
        let analyzer = Analyzer::new();
        let img = uniform(10, 10, [100, 61, 22]);
        let level = analyzer.pollution_level(&img).unwrap();
        assert_eq!(level, PollutionLevel::HighContamination);
    }

    #[test]
    fn ten_percent_brown_is_moderate_contamination() {
        let analyzer = Analyzer::new();
        let mut img = uniform(10, 10, [128, 128, 128]);
        for x in 0..10 {
            img.put_pixel(x, 0, Rgb([100, 61, 22]));
        }
        let level = analyzer.pollution_level(&img).unwrap();
        assert_eq!(level, PollutionLevel::ModerateContamination);
    }

    #[test]
    fn uniform_green_is_algae_bloom() {
        let analyzer = Analyzer::new();
        let img = uniform(10, 10, [43, 200, 43]);
        let level = analyzer.pollution_level(&img).unwrap();
        assert_eq!(level, PollutionLevel::AlgaeBloom);
    }

    #[test]
    fn five_percent_brown_is_slight_turbidity() {
        let analyzer = Analyzer::new();
        let mut img = uniform(10, 10, [128, 128, 128]);
        for x in 0..5 {
            img.put_pixel(x, 0, Rgb([100, 61, 22]));
        }
        let level = analyzer.pollution_level(&img).unwrap();
        assert_eq!(level, PollutionLevel::SlightTurbidity);
    }

    #[test]
    fn neutral_gray_is_apparently_clean() {
        let analyzer = Analyzer::new();
        let img = uniform(10, 10, [128, 128, 128]);
        let level = analyzer.pollution_level(&img).unwrap();
        assert_eq!(level, PollutionLevel::ApparentlyClean);
    }

    #[test]
    fn brown_outranks_green_in_mixed_images() {
        let analyzer = Analyzer::new();
        // 10% brown, 25% green: the moderate rung fires before the algae rung.
        let mut img = uniform(10, 10, [128, 128, 128]);
        for x in 0..10 {
            img.put_pixel(x, 0, Rgb([100, 61, 22]));
        }
        for x in 0..10 {
            img.put_pixel(x, 1, Rgb([43, 200, 43]));
            img.put_pixel(x, 2, Rgb([43, 200, 43]));
        }
        for x in 0..5 {
            img.put_pixel(x, 3, Rgb([43, 200, 43]));
        }
        let level = analyzer.pollution_level(&img).unwrap();
        assert_eq!(level, PollutionLevel::ModerateContamination);
    }

    #[test]
    fn water_percent_is_order_independent() {
        let analyzer = Analyzer::new();
        let mut img = uniform(10, 10, [255, 0, 0]);
        for x in 0..10 {
            for y in 0..3 {
                img.put_pixel(x, y, Rgb([0, 85, 255]));
            }
        }
        let original = analyzer.water_percent(&img).unwrap();

        // Same pixel population, shuffled into columns instead of rows.
        let mut shuffled = uniform(10, 10, [255, 0, 0]);
        for y in 0..10 {
            for x in 0..3 {
                shuffled.put_pixel(x, y, Rgb([0, 85, 255]));
            }
        }
        let permuted = analyzer.water_percent(&shuffled).unwrap();
        assert!((original - permuted).abs() < f32::EPSILON);
        assert!((original - 30.0).abs() < 1e-4);
    }

    #[test]
    fn analysis_is_idempotent_over_identical_buffers() {
        let analyzer = Analyzer::new();
        let img = uniform(12, 12, [0, 85, 255]);
        let first = analyzer.analyze(&img).unwrap();
        let second = analyzer.analyze(&img).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("photo.png")));
        assert!(is_supported_image(Path::new("photo.webp")));
        assert!(is_supported_image(Path::new("photo.bmp")));
    }

    #[test]
    fn is_supported_image_rejects_unsupported_formats() {
        assert!(!is_supported_image(Path::new("photo.gif")));
        assert!(!is_supported_image(Path::new("photo.txt")));
        assert!(!is_supported_image(Path::new("photo")));
    }

    #[test]
    fn process_file_rejects_unsupported_extensions() {
        let analyzer = Analyzer::new();
        let result = analyzer.process_file(Path::new("notes.txt"), &ProcessOptions::default());
        assert!(!result.success);
        assert!(result.message.contains("unsupported"));
    }

    #[test]
    fn process_file_reports_missing_input_in_strict_mode() {
        let analyzer = Analyzer::new();
        let result = analyzer.process_file(
            Path::new("/nonexistent/water.png"),
            &ProcessOptions::default(),
        );
        assert!(!result.success);
        assert!(result.record.is_none());
    }

    #[test]
    fn process_file_degrades_missing_input_in_compat_mode() {
        let analyzer = Analyzer::new();
        let opts = ProcessOptions {
            compat: true,
            ..ProcessOptions::default()
        };
        let result = analyzer.process_file(Path::new("/nonexistent/water.png"), &opts);
        assert!(result.success);
        let record = result.record.unwrap();
        assert!(record.water_percent.abs() < f32::EPSILON);
        assert_eq!(record.pollution, crate::compat::ANALYSIS_ERROR_LABEL);
    }
}
