use serde::{Deserialize, Serialize};

use crate::datasource::DetectionSource;
use crate::error::Error;
use crate::frame;
use crate::frame::{ImageDimensions, RawFrame};

fn default_min_confidence() -> f64 {
    0.3
}

fn default_boundary_threshold() -> f64 {
    0.05
}

fn default_off_screen_confidence() -> f64 {
    0.5
}

fn default_outlier_deviation_threshold() -> f64 {
    0.2
}

fn default_trend_window_size() -> usize {
    5
}

fn default_max_interpolation_gap() -> usize {
    5
}

/// Pipeline thresholds. Loadable from a TOML file, overridable per run, and
/// validated once at context creation before any frame is touched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessParameters {
    /// Frames with mean keypoint confidence below this are rejected outright. 0.0 - 1.0
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Keypoints closer to an image edge than this fraction of the edge length
    /// count as boundary contact. 0.0 - 0.5
    #[serde(default = "default_boundary_threshold")]
    pub boundary_threshold: f64,

    /// Boundary-contact frames below this confidence are treated as the subject
    /// leaving the frame rather than detector noise. 0.0 - 1.0
    #[serde(default = "default_off_screen_confidence")]
    pub off_screen_confidence: f64,

    /// Deviation from the trend-window expectation, as a fraction of the image
    /// diagonal, above which a frame is an outlier. 0.0 - 1.0
    #[serde(default = "default_outlier_deviation_threshold")]
    pub outlier_deviation_threshold: f64,

    /// Sliding window used to estimate expected pose. Odd, 3 - 20.
    #[serde(default = "default_trend_window_size")]
    pub trend_window_size: usize,

    /// Widest run of consecutive bad frames that may still be bridged by
    /// interpolation. 1 - 100.
    #[serde(default = "default_max_interpolation_gap")]
    pub max_interpolation_gap: usize,
}

impl Default for ProcessParameters {
    fn default() -> Self {
        ProcessParameters {
            min_confidence: default_min_confidence(),
            boundary_threshold: default_boundary_threshold(),
            off_screen_confidence: default_off_screen_confidence(),
            outlier_deviation_threshold: default_outlier_deviation_threshold(),
            trend_window_size: default_trend_window_size(),
            max_interpolation_gap: default_max_interpolation_gap(),
        }
    }
}

impl ProcessParameters {
    pub fn from_toml_file(file_path: &str) -> anyhow::Result<ProcessParameters> {
        if !std::path::Path::new(file_path).exists() {
            Err(anyhow::anyhow!("File not found: {}", file_path))
        } else {
            let t = std::fs::read_to_string(file_path)?;
            Ok(toml::from_str(&t)?)
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(Error::InvalidParameter {
                name: "min_confidence",
                value: self.min_confidence,
                expected: "0.0 to 1.0",
            });
        }
        if !(0.0..=0.5).contains(&self.boundary_threshold) {
            return Err(Error::InvalidParameter {
                name: "boundary_threshold",
                value: self.boundary_threshold,
                expected: "0.0 to 0.5",
            });
        }
        if !(0.0..=1.0).contains(&self.off_screen_confidence) {
            return Err(Error::InvalidParameter {
                name: "off_screen_confidence",
                value: self.off_screen_confidence,
                expected: "0.0 to 1.0",
            });
        }
        if !(0.0..=1.0).contains(&self.outlier_deviation_threshold) {
            return Err(Error::InvalidParameter {
                name: "outlier_deviation_threshold",
                value: self.outlier_deviation_threshold,
                expected: "0.0 to 1.0",
            });
        }
        if !(3..=20).contains(&self.trend_window_size) || self.trend_window_size % 2 == 0 {
            return Err(Error::InvalidParameter {
                name: "trend_window_size",
                value: self.trend_window_size as f64,
                expected: "odd integer, 3 to 20",
            });
        }
        if !(1..=100).contains(&self.max_interpolation_gap) {
            return Err(Error::InvalidParameter {
                name: "max_interpolation_gap",
                value: self.max_interpolation_gap as f64,
                expected: "1 to 100",
            });
        }
        Ok(())
    }
}

/// Per-video pipeline state. Each video gets its own context; the engine keeps
/// no state outside of it.
pub struct ProcessContext {
    pub parameters: ProcessParameters,
    pub video_id: String,
    pub image_dimensions: ImageDimensions,
    pub frame_records: Vec<RawFrame>,
}

impl ProcessContext {
    pub fn create(
        params: &ProcessParameters,
        video_id: &str,
        image_dimensions: ImageDimensions,
        frame_records: Vec<RawFrame>,
    ) -> Result<Self, Error> {
        params.validate()?;
        frame::validate_sequence(&frame_records)?;

        info!(
            "Created context for video {} with {} detection frames",
            video_id,
            frame_records.len()
        );

        Ok(ProcessContext {
            parameters: params.to_owned(),
            video_id: video_id.to_owned(),
            image_dimensions,
            frame_records,
        })
    }

    pub fn create_from_source<F: DetectionSource>(
        params: &ProcessParameters,
        source: &F,
    ) -> Result<Self, Error> {
        ProcessContext::create(
            params,
            &source.video_id(),
            source.image_dimensions(),
            source.frames().to_vec(),
        )
    }

    pub fn original_count(&self) -> usize {
        self.frame_records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_validate() {
        assert!(ProcessParameters::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_parameters_rejected() {
        let mut params = ProcessParameters {
            min_confidence: 1.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params.min_confidence = 0.3;
        params.trend_window_size = 4; // even
        assert!(params.validate().is_err());

        params.trend_window_size = 21;
        assert!(params.validate().is_err());

        params.trend_window_size = 5;
        params.max_interpolation_gap = 0;
        assert!(params.validate().is_err());
    }
}
