use anyhow::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frame;
use crate::frame::{ImageDimensions, RawFrame};

/// A source of raw per-frame detections from the external pose estimator.
/// Frames are assumed delivered in increasing original-index order with no
/// duplicates; `validate` enforces it.
pub trait DetectionSource {
    fn video_id(&self) -> String;
    fn image_dimensions(&self) -> ImageDimensions;
    fn frame_rate(&self) -> f64;
    fn frame_count(&self) -> usize;
    fn captured_at(&self) -> DateTime<Utc>;
    fn frames(&self) -> &[RawFrame];

    fn source_file(&self) -> String;

    fn open(path: &str) -> Result<Self>
    where
        Self: Sized;

    fn validate(&self) -> Result<()>;

    fn print_header_details(&self);
}

/// The estimator's JSON export: a header plus the full detection list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionDocument {
    pub video_id: String,
    pub image_width: usize,
    pub image_height: usize,
    pub frame_rate: f64,
    pub captured_at: DateTime<Utc>,
    pub frames: Vec<RawFrame>,
}

pub struct JsonDetectionSource {
    document: DetectionDocument,
    source_file: String,
}

impl DetectionSource for JsonDetectionSource {
    fn video_id(&self) -> String {
        self.document.video_id.to_owned()
    }

    fn image_dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.document.image_width, self.document.image_height)
    }

    fn frame_rate(&self) -> f64 {
        self.document.frame_rate
    }

    fn frame_count(&self) -> usize {
        self.document.frames.len()
    }

    fn captured_at(&self) -> DateTime<Utc> {
        self.document.captured_at
    }

    fn frames(&self) -> &[RawFrame] {
        &self.document.frames
    }

    fn source_file(&self) -> String {
        self.source_file.to_owned()
    }

    fn open(path: &str) -> Result<Self> {
        if !std::path::Path::new(path).exists() {
            return Err(Error::msg(format!("File not found: {}", path)));
        }
        info!("Loading detection file: {}", path);
        let text = std::fs::read_to_string(path)?;
        let document: DetectionDocument = serde_json::from_str(&text)?;
        Ok(JsonDetectionSource {
            document,
            source_file: path.to_owned(),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.document.image_width == 0 || self.document.image_height == 0 {
            return Err(Error::msg("Image dimensions cannot be zero"));
        }
        frame::validate_sequence(&self.document.frames)?;
        for fr in &self.document.frames {
            for kp in &fr.keypoints {
                if !(0.0..=1.0).contains(&kp.confidence) {
                    return Err(Error::msg(format!(
                        "Keypoint confidence {} out of range on frame {}",
                        kp.confidence, fr.original_index
                    )));
                }
            }
        }
        Ok(())
    }

    fn print_header_details(&self) {
        println!("Source file:       {}", self.source_file);
        println!("Video id:          {}", self.document.video_id);
        println!(
            "Image dimensions:  {}x{}",
            self.document.image_width, self.document.image_height
        );
        println!("Frame rate:        {}", self.document.frame_rate);
        println!("Captured at:       {}", self.document.captured_at);
        println!("Frame count:       {}", self.document.frames.len());
    }
}

pub struct EmptyDetectionSource {}

impl DetectionSource for EmptyDetectionSource {
    fn video_id(&self) -> String {
        "".to_string()
    }

    fn image_dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(0, 0)
    }

    fn frame_rate(&self) -> f64 {
        0.0
    }

    fn frame_count(&self) -> usize {
        0
    }

    fn captured_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    fn frames(&self) -> &[RawFrame] {
        &[]
    }

    fn source_file(&self) -> String {
        "".to_string()
    }

    fn open(_path: &str) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(EmptyDetectionSource {})
    }

    fn validate(&self) -> Result<()> {
        Err(Error::msg("Cannot validate: detection source is empty"))
    }

    fn print_header_details(&self) {
        println!("Empty detection source")
    }
}
