use crate::framemap::FrameIndexMap;
use crate::framerecord::ProcessedFrame;

/// The playback-facing façade. Consumers ask in original frame numbers and
/// always receive the nearest surviving frame; removal and interpolation
/// decisions stay invisible beyond the `source`/`interpolation` metadata
/// carried on `ProcessedFrame` itself.
pub struct SyncedFrameAccessor<'a> {
    frames: &'a [ProcessedFrame],
    map: &'a FrameIndexMap,
}

impl<'a> SyncedFrameAccessor<'a> {
    pub fn new(frames: &'a [ProcessedFrame], map: &'a FrameIndexMap) -> Self {
        SyncedFrameAccessor { frames, map }
    }

    /// None only when the processed sequence is empty. Queries past the end of
    /// the original sequence clamp to the final original frame.
    pub fn get_frame(&self, original_index: usize) -> Option<&'a ProcessedFrame> {
        if self.map.original_count == 0 {
            return None;
        }
        let clamped = original_index.min(self.map.original_count - 1);
        let processed_index = self.map.original_to_processed(clamped)?;
        self.frames.get(processed_index)
    }

    /// The de-duplicated, order-preserved set of processed frames covering the
    /// inclusive original range. The mapping is monotonic, so duplicates are
    /// always adjacent.
    pub fn get_frame_range(
        &self,
        start_original: usize,
        end_original: usize,
    ) -> Vec<&'a ProcessedFrame> {
        if self.frames.is_empty() || self.map.original_count == 0 || start_original > end_original {
            return vec![];
        }

        let end = end_original.min(self.map.original_count - 1);
        let start = start_original.min(end);

        let mut result: Vec<&ProcessedFrame> = Vec::new();
        for original in start..=end {
            if let Some(processed_index) = self.map.original_to_processed(original) {
                if result.last().map(|record| record.processed_index) != Some(processed_index) {
                    if let Some(record) = self.frames.get(processed_index) {
                        result.push(record);
                    }
                }
            }
        }
        result
    }
}
