use anyhow::Result;
use posesync::datasource::{DetectionSource, EmptyDetectionSource, JsonDetectionSource};

#[test]
fn test_detection_file_parse() -> Result<()> {
    let testfile = "tests/testdata/detections.json";
    let source = JsonDetectionSource::open(testfile)?;
    source.validate()?;

    assert_eq!(source.video_id(), "clinic-042-video-7");
    assert_eq!(source.frame_count(), 12);
    assert_eq!(source.image_dimensions().width, 1000);
    assert_eq!(source.image_dimensions().height, 1000);
    assert_eq!(source.frame_rate(), 30.0);
    assert_eq!(source.source_file(), testfile);

    let frames = source.frames();
    assert_eq!(frames[0].keypoints.len(), 1);
    assert!(frames[0].bounding_box.is_some());
    // trailing low-confidence frames carry no bounding box
    assert!(frames[11].bounding_box.is_none());
    assert!(frames[11].mesh_vertices.is_none());
    Ok(())
}

#[test]
fn test_missing_file_rejected() {
    assert!(JsonDetectionSource::open("tests/testdata/no-such-file.json").is_err());
}

#[test]
fn test_empty_source_fails_validation() {
    let source = EmptyDetectionSource::open("").unwrap();
    assert_eq!(source.frame_count(), 0);
    assert!(source.validate().is_err());
}
