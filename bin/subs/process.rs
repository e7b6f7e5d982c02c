use crate::subs::runnable::RunnableSubcommand;
use anyhow::Result;
use clap::Parser;
use posesync::analysis::frame_quality_analysis;
use posesync::context::*;
use posesync::datasource::{DetectionSource, JsonDetectionSource};
use posesync::filtering::frame_filter_interpolate;
use posesync::framemap::FrameIndexMap;
use posesync::framerecord::ProcessedSequence;

pb_create!();

#[derive(Parser)]
#[command(author, version, about = "Filter and synchronize a detection sequence", long_about = None)]
pub struct Process {
    #[clap(long, short, help = "Input detections file (JSON)")]
    input_file: String,

    #[clap(long, short, help = "Output processed sequence (JSON)")]
    output: String,

    #[clap(long, short, help = "Process report path")]
    report: Option<String>,

    #[clap(long, short, help = "Parameter file (TOML)")]
    params: Option<String>,

    #[clap(long, short = 'c', help = "Minimum mean keypoint confidence")]
    minconfidence: Option<f64>,

    #[clap(long, short = 'b', help = "Image boundary threshold (fraction of edge)")]
    boundary: Option<f64>,

    #[clap(long, short = 'O', help = "Off-screen confidence floor")]
    offscreenconfidence: Option<f64>,

    #[clap(long, short = 'd', help = "Outlier deviation threshold (fraction of diagonal)")]
    deviation: Option<f64>,

    #[clap(long, short = 'w', help = "Trend window size (odd)")]
    windowsize: Option<usize>,

    #[clap(long, short = 'g', help = "Maximum interpolation gap (frames)")]
    maxgap: Option<usize>,
}

impl Process {
    fn build_parameters(&self) -> Result<ProcessParameters> {
        let mut parameters = if let Some(params_path) = &self.params {
            ProcessParameters::from_toml_file(params_path)?
        } else {
            ProcessParameters::default()
        };

        if let Some(v) = self.minconfidence {
            parameters.min_confidence = v;
        }
        if let Some(v) = self.boundary {
            parameters.boundary_threshold = v;
        }
        if let Some(v) = self.offscreenconfidence {
            parameters.off_screen_confidence = v;
        }
        if let Some(v) = self.deviation {
            parameters.outlier_deviation_threshold = v;
        }
        if let Some(v) = self.windowsize {
            parameters.trend_window_size = v;
        }
        if let Some(v) = self.maxgap {
            parameters.max_interpolation_gap = v;
        }

        Ok(parameters)
    }
}

#[async_trait::async_trait]
impl RunnableSubcommand for Process {
    async fn run(&self) -> Result<()> {
        pb_set_print!();

        let source = JsonDetectionSource::open(&self.input_file)?;
        source.validate()?;

        let parameters = self.build_parameters()?;

        info!("Creating process context...");
        let context = ProcessContext::create_from_source(&parameters, &source)?;

        info!("Scoring frame quality");
        pb_set_prefix!("Scoring Frame Quality");
        pb_set_length!(context.frame_records.len());
        let verdicts = frame_quality_analysis(&context, |_verdict| {
            pb_inc!();
        })?;

        info!("Filtering and interpolating");
        pb_zero!();
        pb_set_prefix!("Filtering and Interpolating");
        pb_set_length!(context.frame_records.len());
        let output = frame_filter_interpolate(&context, &verdicts, |_record| {
            pb_inc!();
        })?;

        if output.processed.is_empty() {
            println!(
                "No usable pose data: all {} frames were rejected",
                output.stats.original_count
            );
        } else {
            let map = FrameIndexMap::build(context.original_count(), &output.processed)?;
            info!(
                "Index map covers {} originals across {} processed frames",
                map.original_count, map.processed_count
            );

            println!(
                "    Kept {} of {} frames ({} detected, {} interpolated, {} removed)",
                output.stats.processed_count,
                output.stats.original_count,
                output.stats.detected_count,
                output.stats.interpolated_count,
                output.stats.removed_count
            );
        }

        let sequence = ProcessedSequence {
            video_id: context.video_id.to_owned(),
            original_count: context.original_count(),
            stats: output.stats.clone(),
            frames: output.processed,
        };
        std::fs::write(&self.output, serde_json::to_string_pretty(&sequence)?)?;
        info!("Processed sequence saved to {}", self.output);

        if let Some(report_path) = &self.report {
            std::fs::write(report_path, serde_json::to_string_pretty(&output.stats)?)?;
            info!("Process report saved to {}", report_path);
        }

        pb_done!();
        Ok(())
    }
}
