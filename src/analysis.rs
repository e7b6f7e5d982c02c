use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::context::ProcessContext;
use crate::error::Error;
use crate::frame;
use crate::point::Point3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum FrameCategory {
    Good,
    LowConfidence,
    OffScreen,
    Outlier,
}

impl std::fmt::Display for FrameCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameCategory::Good => write!(f, "good"),
            FrameCategory::LowConfidence => write!(f, "low-confidence"),
            FrameCategory::OffScreen => write!(f, "off-screen"),
            FrameCategory::Outlier => write!(f, "outlier"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QualityVerdict {
    pub original_index: usize,
    pub category: FrameCategory,
    pub average_confidence: f64,
    /// Mean keypoint deviation from the trend-window expectation, as a fraction
    /// of the image diagonal. Only computed for interior frames whose whole
    /// window survived confidence/boundary screening.
    pub deviation_from_trend: Option<f64>,
}

/// Scores every raw frame and emits one verdict per frame, in input order.
///
/// Screening happens in two passes: confidence and boundary checks first, then
/// trend-window outlier detection over the frames that survived. Frames flagged
/// in the first pass carry no trend signal and invalidate the windows they
/// appear in.
pub fn frame_quality_analysis<F>(
    context: &ProcessContext,
    on_frame_checked: F,
) -> Result<Vec<QualityVerdict>, Error>
where
    F: Fn(&QualityVerdict) + Send + Sync + 'static,
{
    frame::validate_sequence(&context.frame_records)?;

    let params = &context.parameters;

    let screened: Vec<QualityVerdict> = context
        .frame_records
        .par_iter()
        .map(|fr| {
            let average_confidence = fr.average_confidence();

            let category = if average_confidence < params.min_confidence {
                FrameCategory::LowConfidence
            } else if fr.touches_boundary(&context.image_dimensions, params.boundary_threshold)
                && average_confidence < params.off_screen_confidence
            {
                FrameCategory::OffScreen
            } else {
                FrameCategory::Good
            };

            QualityVerdict {
                original_index: fr.original_index,
                category,
                average_confidence,
                deviation_from_trend: None,
            }
        })
        .collect();

    let verdicts: Vec<QualityVerdict> = screened
        .par_iter()
        .enumerate()
        .map(|(i, screened_verdict)| {
            let mut verdict = screened_verdict.clone();

            if verdict.category == FrameCategory::Good {
                if let Some(deviation) = deviation_from_trend(context, &screened, i) {
                    verdict.deviation_from_trend = Some(deviation);
                    if deviation > params.outlier_deviation_threshold {
                        verdict.category = FrameCategory::Outlier;
                    }
                }
            }

            on_frame_checked(&verdict);
            verdict
        })
        .collect();

    Ok(verdicts)
}

/// Expected position per keypoint is the centroid of that keypoint across the
/// window neighbors. None if the frame sits too close to a sequence edge or any
/// window neighbor was screened out.
fn deviation_from_trend(
    context: &ProcessContext,
    screened: &[QualityVerdict],
    index: usize,
) -> Option<f64> {
    let frames = &context.frame_records;
    let half = context.parameters.trend_window_size / 2;

    if index < half || index + half >= frames.len() {
        return None;
    }

    let neighbors: Vec<usize> = (index - half..=index + half).filter(|&n| n != index).collect();
    if neighbors
        .iter()
        .any(|&n| screened[n].category != FrameCategory::Good)
    {
        return None;
    }

    let frame = &frames[index];
    let keypoint_count = neighbors
        .iter()
        .map(|&n| frames[n].keypoints.len())
        .min()?
        .min(frame.keypoints.len());
    if keypoint_count == 0 {
        return None;
    }

    let diagonal = context.image_dimensions.diagonal();
    if diagonal <= 0.0 {
        return None;
    }

    let neighbor_count = neighbors.len() as f64;
    let mut total_deviation = 0.0;
    for k in 0..keypoint_count {
        let mut centroid = Point3::default();
        for &n in &neighbors {
            let p = frames[n].keypoints[k].position;
            centroid.x += p.x;
            centroid.y += p.y;
            centroid.z += p.z;
        }
        centroid.x /= neighbor_count;
        centroid.y /= neighbor_count;
        centroid.z /= neighbor_count;

        total_deviation += frame.keypoints[k].position.distance_to(&centroid);
    }

    Some(total_deviation / keypoint_count as f64 / diagonal)
}
