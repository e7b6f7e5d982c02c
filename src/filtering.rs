use itertools::Itertools;

use crate::analysis::{FrameCategory, QualityVerdict};
use crate::context::ProcessContext;
use crate::error::Error;
use crate::frame;
use crate::framerecord::ProcessedFrame;
use crate::interpolation;
use crate::stats::QualityStats;

pub struct FilterOutput {
    pub processed: Vec<ProcessedFrame>,
    pub stats: QualityStats,
}

/// Applies the keep/interpolate/remove policy to the verdict stream and emits
/// the final processed sequence.
///
/// Good frames are kept. Low-confidence and off-screen frames are removed
/// outright; they represent genuine absence, not transient noise. Outliers in a
/// run no wider than `max_interpolation_gap`, with a kept anchor on each side,
/// are re-synthesized by linear interpolation between the anchors. Everything
/// else is removed. A fully rejected input yields an empty sequence, which is a
/// legitimate result rather than an error.
pub fn frame_filter_interpolate<F: Fn(&ProcessedFrame)>(
    context: &ProcessContext,
    verdicts: &[QualityVerdict],
    on_frame_checked: F,
) -> Result<FilterOutput, Error> {
    let frames = &context.frame_records;
    frame::validate_sequence(frames)?;

    if verdicts.len() != frames.len() {
        return Err(Error::MalformedInput(format!(
            "verdict count {} does not match frame count {}",
            verdicts.len(),
            frames.len()
        )));
    }
    for (fr, verdict) in frames.iter().zip(verdicts.iter()) {
        if fr.original_index != verdict.original_index {
            return Err(Error::MalformedInput(format!(
                "verdict for original index {} paired with frame {}",
                verdict.original_index, fr.original_index
            )));
        }
    }

    let max_gap = context.parameters.max_interpolation_gap;

    // Maximal alternating runs of kept and not-kept frames, in sequence order.
    let mut runs: Vec<(bool, Vec<usize>)> = Vec::new();
    for (kept, group) in &verdicts
        .iter()
        .enumerate()
        .group_by(|(_, v)| v.category == FrameCategory::Good)
    {
        runs.push((kept, group.map(|(i, _)| i).collect()));
    }

    let mut processed: Vec<ProcessedFrame> = Vec::with_capacity(frames.len());
    let mut interpolated_count = 0;
    let mut removed_count = 0;

    for (run_index, (kept, members)) in runs.iter().enumerate() {
        if *kept {
            for &i in members {
                let record = ProcessedFrame::from_detected(processed.len(), &frames[i]);
                on_frame_checked(&record);
                processed.push(record);
            }
            continue;
        }

        // Anchors are the kept frames immediately bracketing this run. A run
        // touching the sequence start or end has no interpolation target.
        let before = if run_index > 0 {
            runs[run_index - 1].1.last().copied()
        } else {
            None
        };
        let after = runs.get(run_index + 1).map(|(_, members)| members[0]);

        let bridgeable = members.len() <= max_gap && before.is_some() && after.is_some();
        if !bridgeable && members.len() > max_gap {
            vprintln!(
                "Run of {} rejected frames at original index {} exceeds the interpolation gap limit",
                members.len(),
                members[0]
            );
        }

        for &i in members {
            if bridgeable && verdicts[i].category == FrameCategory::Outlier {
                let record = interpolation::interpolate_frame(
                    &frames[before.unwrap()],
                    &frames[after.unwrap()],
                    i,
                    processed.len(),
                );
                on_frame_checked(&record);
                interpolated_count += 1;
                processed.push(record);
            } else {
                removed_count += 1;
            }
        }
    }

    let stats = QualityStats {
        original_count: frames.len(),
        processed_count: processed.len(),
        detected_count: processed.len() - interpolated_count,
        interpolated_count,
        removed_count,
    };

    Ok(FilterOutput { processed, stats })
}
