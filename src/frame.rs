use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::point::Point3;

#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Keypoint {
    pub position: Point3,
    pub confidence: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageDimensions {
    pub width: usize,
    pub height: usize,
}

impl ImageDimensions {
    pub fn new(width: usize, height: usize) -> Self {
        ImageDimensions { width, height }
    }

    pub fn diagonal(&self) -> f64 {
        let w = self.width as f64;
        let h = self.height as f64;
        (w * w + h * h).sqrt()
    }
}

/// A single raw detection emitted by the external pose estimator. Immutable once
/// produced; the pipeline only ever reads these.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawFrame {
    pub original_index: usize,
    pub timestamp: f64,
    pub keypoints: Vec<Keypoint>,
    pub mesh_vertices: Option<Vec<Point3>>,
    pub mesh_faces: Option<Vec<[usize; 3]>>,
    pub bounding_box: Option<BoundingBox>,
}

impl RawFrame {
    /// Mean keypoint confidence. A frame with no keypoints scores 0.0.
    pub fn average_confidence(&self) -> f64 {
        if self.keypoints.is_empty() {
            return 0.0;
        }
        self.keypoints.iter().map(|kp| kp.confidence).sum::<f64>() / self.keypoints.len() as f64
    }

    /// True if any keypoint sits within `threshold` (a fraction of the image
    /// edge length) of an image boundary.
    pub fn touches_boundary(&self, dimensions: &ImageDimensions, threshold: f64) -> bool {
        let margin_x = dimensions.width as f64 * threshold;
        let margin_y = dimensions.height as f64 * threshold;
        let max_x = dimensions.width as f64 - margin_x;
        let max_y = dimensions.height as f64 - margin_y;

        self.keypoints.iter().any(|kp| {
            kp.position.x < margin_x
                || kp.position.x > max_x
                || kp.position.y < margin_y
                || kp.position.y > max_y
        })
    }
}

/// Raw input must arrive 0-based, monotonic, and dense. Anything else is the
/// detector misbehaving and is surfaced rather than silently repaired.
pub fn validate_sequence(frames: &[RawFrame]) -> Result<(), Error> {
    for (i, frame) in frames.iter().enumerate() {
        if frame.original_index != i {
            return Err(Error::MalformedInput(format!(
                "expected original index {} at position {}, found {}",
                i, i, frame.original_index
            )));
        }
    }
    Ok(())
}
