use serde::{Deserialize, Serialize};

use crate::frame::{BoundingBox, Keypoint, RawFrame};
use crate::point::Point3;
use crate::stats::QualityStats;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum FrameSource {
    Detected,
    Interpolated,
}

/// Provenance of a synthesized frame: the original indices of the two anchor
/// frames it was blended from, and how far along that blend it sits.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct InterpolationInfo {
    pub source_frames: [usize; 2],
    pub factor: f64,
}

/// One frame of the final filtered/interpolated sequence. `processed_index` is
/// dense and gap-free; `original_index` values are strictly increasing across
/// the sequence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessedFrame {
    pub processed_index: usize,
    pub original_index: usize,
    pub source: FrameSource,
    pub interpolation: Option<InterpolationInfo>,
    pub timestamp: f64,
    pub keypoints: Vec<Keypoint>,
    pub mesh_vertices: Option<Vec<Point3>>,
    pub mesh_faces: Option<Vec<[usize; 3]>>,
    pub bounding_box: Option<BoundingBox>,
}

impl ProcessedFrame {
    /// A detected frame carries its raw payload through unchanged.
    pub fn from_detected(processed_index: usize, raw: &RawFrame) -> Self {
        ProcessedFrame {
            processed_index,
            original_index: raw.original_index,
            source: FrameSource::Detected,
            interpolation: None,
            timestamp: raw.timestamp,
            keypoints: raw.keypoints.clone(),
            mesh_vertices: raw.mesh_vertices.clone(),
            mesh_faces: raw.mesh_faces.clone(),
            bounding_box: raw.bounding_box,
        }
    }

    pub fn is_interpolated(&self) -> bool {
        self.source == FrameSource::Interpolated
    }
}

/// The per-video document handed to the storage collaborator: the canonical
/// processed sequence plus its statistics. The index map is re-derivable from
/// `frames` and is not stored separately.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessedSequence {
    pub video_id: String,
    pub original_count: usize,
    pub stats: QualityStats,
    pub frames: Vec<ProcessedFrame>,
}
