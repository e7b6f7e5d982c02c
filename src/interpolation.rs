use crate::frame::{BoundingBox, Keypoint, RawFrame};
use crate::framerecord::{FrameSource, InterpolationInfo, ProcessedFrame};
use crate::point::Point3;

/// Synthesizes the frame at `original_index` by blending the two anchor frames
/// bracketing its gap. The blend factor is the frame's relative position within
/// the gap: `(original_index - before) / (after - before)`.
pub fn interpolate_frame(
    before: &RawFrame,
    after: &RawFrame,
    original_index: usize,
    processed_index: usize,
) -> ProcessedFrame {
    let gap_length = (after.original_index - before.original_index) as f64;
    let factor = (original_index - before.original_index) as f64 / gap_length;

    let mesh_vertices = match (&before.mesh_vertices, &after.mesh_vertices) {
        (Some(bv), Some(av)) => Some(lerp_padded_vertices(bv, av, factor)),
        _ => None,
    };

    // Faces follow whichever anchor supplied the larger mesh, so every padded
    // vertex index stays resolvable.
    let mesh_faces = match (&before.mesh_vertices, &after.mesh_vertices) {
        (Some(bv), Some(av)) => {
            if av.len() > bv.len() {
                after.mesh_faces.clone()
            } else {
                before.mesh_faces.clone()
            }
        }
        _ => None,
    };

    let bounding_box = match (&before.bounding_box, &after.bounding_box) {
        (Some(bb), Some(ab)) => Some(lerp_bounding_box(bb, ab, factor)),
        _ => None,
    };

    ProcessedFrame {
        processed_index,
        original_index,
        source: FrameSource::Interpolated,
        interpolation: Some(InterpolationInfo {
            source_frames: [before.original_index, after.original_index],
            factor,
        }),
        timestamp: before.timestamp + (after.timestamp - before.timestamp) * factor,
        keypoints: lerp_padded_keypoints(&before.keypoints, &after.keypoints, factor),
        mesh_vertices,
        mesh_faces,
        bounding_box,
    }
}

fn lerp_padded_keypoints(a: &[Keypoint], b: &[Keypoint], t: f64) -> Vec<Keypoint> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    (0..a.len().max(b.len()))
        .map(|i| {
            let ka = a[i.min(a.len() - 1)];
            let kb = b[i.min(b.len() - 1)];
            Keypoint {
                position: ka.position.lerp(&kb.position, t),
                confidence: ka.confidence + (kb.confidence - ka.confidence) * t,
            }
        })
        .collect()
}

/// Mismatched vertex counts are padded by repeating the shorter mesh's last
/// vertex. A known approximation for topologically different meshes.
fn lerp_padded_vertices(a: &[Point3], b: &[Point3], t: f64) -> Vec<Point3> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    if a.len() != b.len() {
        warn!(
            "Anchor mesh vertex counts differ ({} vs {}); padding the shorter mesh",
            a.len(),
            b.len()
        );
    }
    (0..a.len().max(b.len()))
        .map(|i| a[i.min(a.len() - 1)].lerp(&b[i.min(b.len() - 1)], t))
        .collect()
}

fn lerp_bounding_box(a: &BoundingBox, b: &BoundingBox, t: f64) -> BoundingBox {
    BoundingBox {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
        width: a.width + (b.width - a.width) * t,
        height: a.height + (b.height - a.height) * t,
    }
}
