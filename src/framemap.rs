use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::framerecord::ProcessedFrame;

/// Bidirectional map between original frame numbers and positions in the
/// processed sequence. Dense vectors on both sides; lookups are O(1) after an
/// O(original_count) build, and the whole structure is re-derivable from the
/// processed frame list at any time.
///
/// A removed original maps to the nearest surviving frame at or before it, or
/// to the first surviving frame when nothing precedes it, so renderers always
/// get some frame for any original index. The reverse direction is exact and
/// never approximate.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrameIndexMap {
    pub original_count: usize,
    pub processed_count: usize,
    original_to_processed: Vec<usize>,
    processed_to_original: Vec<usize>,
}

impl FrameIndexMap {
    pub fn build(original_count: usize, processed: &[ProcessedFrame]) -> Result<FrameIndexMap, Error> {
        let mut last_original: Option<usize> = None;
        for (p, record) in processed.iter().enumerate() {
            if record.processed_index != p {
                return Err(Error::MalformedInput(format!(
                    "processed index {} found at position {}",
                    record.processed_index, p
                )));
            }
            if record.original_index >= original_count {
                return Err(Error::MalformedInput(format!(
                    "original index {} outside original count {}",
                    record.original_index, original_count
                )));
            }
            if let Some(prev) = last_original {
                if record.original_index <= prev {
                    return Err(Error::MalformedInput(format!(
                        "original indices not strictly increasing at processed index {}",
                        p
                    )));
                }
            }
            last_original = Some(record.original_index);
        }

        if processed.is_empty() {
            return Ok(FrameIndexMap {
                original_count,
                processed_count: 0,
                original_to_processed: vec![],
                processed_to_original: vec![],
            });
        }

        let processed_to_original: Vec<usize> =
            processed.iter().map(|record| record.original_index).collect();

        let mut original_to_processed = vec![0usize; original_count];
        let mut current = 0;
        for (original, slot) in original_to_processed.iter_mut().enumerate() {
            while current + 1 < processed.len() && processed[current + 1].original_index <= original {
                current += 1;
            }
            *slot = current;
        }

        Ok(FrameIndexMap {
            original_count,
            processed_count: processed.len(),
            original_to_processed,
            processed_to_original,
        })
    }

    /// Nearest surviving processed index for an original frame number. None
    /// only for an out-of-range query or an empty processed sequence.
    pub fn original_to_processed(&self, original_index: usize) -> Option<usize> {
        self.original_to_processed.get(original_index).copied()
    }

    /// Exact original frame number stored on the processed frame.
    pub fn processed_to_original(&self, processed_index: usize) -> Option<usize> {
        self.processed_to_original.get(processed_index).copied()
    }
}
