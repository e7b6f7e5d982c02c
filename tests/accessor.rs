use anyhow::Result;
use posesync::accessor::SyncedFrameAccessor;
use posesync::framemap::FrameIndexMap;
use posesync::framerecord::{FrameSource, InterpolationInfo, ProcessedFrame};

fn record(processed_index: usize, original_index: usize, source: FrameSource) -> ProcessedFrame {
    ProcessedFrame {
        processed_index,
        original_index,
        source,
        interpolation: if source == FrameSource::Interpolated {
            Some(InterpolationInfo {
                source_frames: [original_index - 1, original_index + 1],
                factor: 0.5,
            })
        } else {
            None
        },
        timestamp: original_index as f64 / 30.0,
        keypoints: vec![],
        mesh_vertices: None,
        mesh_faces: None,
        bounding_box: None,
    }
}

/// Originals 0..10 with 4 and 7..8 removed, 5 interpolated.
fn fixture() -> (Vec<ProcessedFrame>, FrameIndexMap) {
    let frames = vec![
        record(0, 0, FrameSource::Detected),
        record(1, 1, FrameSource::Detected),
        record(2, 2, FrameSource::Detected),
        record(3, 3, FrameSource::Detected),
        record(4, 5, FrameSource::Interpolated),
        record(5, 6, FrameSource::Detected),
        record(6, 9, FrameSource::Detected),
    ];
    let map = FrameIndexMap::build(10, &frames).unwrap();
    (frames, map)
}

#[test]
fn test_get_frame_for_surviving_original() {
    let (frames, map) = fixture();
    let accessor = SyncedFrameAccessor::new(&frames, &map);

    let frame = accessor.get_frame(6).unwrap();
    assert_eq!(frame.original_index, 6);
    assert_eq!(frame.source, FrameSource::Detected);
}

#[test]
fn test_get_frame_for_removed_original_returns_neighbor() {
    let (frames, map) = fixture();
    let accessor = SyncedFrameAccessor::new(&frames, &map);

    let frame = accessor.get_frame(4).unwrap();
    assert_eq!(frame.original_index, 3);

    let frame = accessor.get_frame(8).unwrap();
    assert_eq!(frame.original_index, 6);
}

#[test]
fn test_interpolation_metadata_visible_to_consumers() {
    let (frames, map) = fixture();
    let accessor = SyncedFrameAccessor::new(&frames, &map);

    let frame = accessor.get_frame(5).unwrap();
    assert_eq!(frame.source, FrameSource::Interpolated);
    assert_eq!(frame.interpolation.unwrap().factor, 0.5);
}

#[test]
fn test_get_frame_clamps_past_the_end() {
    let (frames, map) = fixture();
    let accessor = SyncedFrameAccessor::new(&frames, &map);

    let frame = accessor.get_frame(500).unwrap();
    assert_eq!(frame.original_index, 9);
}

#[test]
fn test_range_is_deduplicated_and_ordered() {
    let (frames, map) = fixture();
    let accessor = SyncedFrameAccessor::new(&frames, &map);

    // originals 3..=8 map onto processed 3, 4, 5 (with repeats for 4, 7, 8)
    let range = accessor.get_frame_range(3, 8);
    let processed: Vec<usize> = range.iter().map(|r| r.processed_index).collect();
    assert_eq!(processed, vec![3, 4, 5]);

    let full = accessor.get_frame_range(0, 9);
    assert_eq!(full.len(), 7);
    for pair in full.windows(2) {
        assert!(pair[0].processed_index < pair[1].processed_index);
    }
}

#[test]
fn test_range_clamps_and_rejects_inverted_bounds() {
    let (frames, map) = fixture();
    let accessor = SyncedFrameAccessor::new(&frames, &map);

    let range = accessor.get_frame_range(8, 500);
    let originals: Vec<usize> = range.iter().map(|r| r.original_index).collect();
    assert_eq!(originals, vec![6, 9]);

    assert!(accessor.get_frame_range(7, 3).is_empty());
}

#[test]
fn test_empty_sequence_yields_nothing() {
    let map = FrameIndexMap::build(10, &[]).unwrap();
    let frames: Vec<ProcessedFrame> = vec![];
    let accessor = SyncedFrameAccessor::new(&frames, &map);

    assert!(accessor.get_frame(3).is_none());
    assert!(accessor.get_frame_range(0, 9).is_empty());
}
