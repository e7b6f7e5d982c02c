use anyhow::Result;
use posesync::error::Error;
use posesync::framemap::FrameIndexMap;
use posesync::framerecord::{FrameSource, ProcessedFrame};

fn detected(processed_index: usize, original_index: usize) -> ProcessedFrame {
    ProcessedFrame {
        processed_index,
        original_index,
        source: FrameSource::Detected,
        interpolation: None,
        timestamp: original_index as f64 / 30.0,
        keypoints: vec![],
        mesh_vertices: None,
        mesh_faces: None,
        bounding_box: None,
    }
}

#[test]
fn test_mapping_totality() -> Result<()> {
    // originals 4 and 7..8 removed
    let processed = vec![
        detected(0, 0),
        detected(1, 1),
        detected(2, 2),
        detected(3, 3),
        detected(4, 5),
        detected(5, 6),
        detected(6, 9),
    ];
    let map = FrameIndexMap::build(10, &processed)?;

    for original in 0..10 {
        let p = map.original_to_processed(original).unwrap();
        assert!(p < map.processed_count);
    }
    assert!(map.original_to_processed(10).is_none());
    Ok(())
}

#[test]
fn test_removed_original_falls_back_to_predecessor() -> Result<()> {
    let processed = vec![
        detected(0, 0),
        detected(1, 1),
        detected(2, 2),
        detected(3, 3),
        detected(4, 5),
    ];
    let map = FrameIndexMap::build(6, &processed)?;

    // original 4 was removed; the nearest surviving neighbor before it is original 3
    assert_eq!(map.original_to_processed(4), Some(3));
    assert_eq!(map.original_to_processed(5), Some(4));
    Ok(())
}

#[test]
fn test_leading_removed_originals_fall_forward() -> Result<()> {
    let processed = vec![detected(0, 2), detected(1, 3)];
    let map = FrameIndexMap::build(5, &processed)?;

    assert_eq!(map.original_to_processed(0), Some(0));
    assert_eq!(map.original_to_processed(1), Some(0));
    assert_eq!(map.original_to_processed(2), Some(0));
    assert_eq!(map.original_to_processed(3), Some(1));
    assert_eq!(map.original_to_processed(4), Some(1));
    Ok(())
}

#[test]
fn test_exact_inverse_for_surviving_frames() -> Result<()> {
    let processed = vec![
        detected(0, 1),
        detected(1, 4),
        detected(2, 5),
        detected(3, 8),
    ];
    let map = FrameIndexMap::build(9, &processed)?;

    for (p, record) in processed.iter().enumerate() {
        let original = map.processed_to_original(p).unwrap();
        assert_eq!(original, record.original_index);
        assert_eq!(map.original_to_processed(original), Some(p));
    }
    assert!(map.processed_to_original(4).is_none());
    Ok(())
}

#[test]
fn test_empty_processed_sequence() -> Result<()> {
    let map = FrameIndexMap::build(10, &[])?;

    assert_eq!(map.processed_count, 0);
    assert_eq!(map.original_count, 10);
    assert!(map.original_to_processed(0).is_none());
    assert!(map.processed_to_original(0).is_none());
    Ok(())
}

#[test]
fn test_non_increasing_originals_rejected() {
    let processed = vec![detected(0, 3), detected(1, 3)];
    let result = FrameIndexMap::build(5, &processed);
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}

#[test]
fn test_original_outside_count_rejected() {
    let processed = vec![detected(0, 12)];
    let result = FrameIndexMap::build(5, &processed);
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}

#[test]
fn test_gapped_processed_indices_rejected() {
    let mut record = detected(3, 1);
    record.processed_index = 3;
    let result = FrameIndexMap::build(5, &[record]);
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}
