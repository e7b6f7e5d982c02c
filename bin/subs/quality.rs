use crate::subs::runnable::RunnableSubcommand;
use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use posesync::analysis::{frame_quality_analysis, FrameCategory};
use posesync::context::*;
use posesync::datasource::{DetectionSource, JsonDetectionSource};

pb_create!();

#[derive(Parser)]
#[command(author, version, about = "Score a detection sequence and print the verdict breakdown", long_about = None)]
pub struct Quality {
    #[clap(long, short, help = "Input detections file (JSON)")]
    input_file: String,

    #[clap(long, short, help = "Parameter file (TOML)")]
    params: Option<String>,

    #[clap(long, short = 'c', help = "Minimum mean keypoint confidence")]
    minconfidence: Option<f64>,

    #[clap(long, short = 'd', help = "Outlier deviation threshold (fraction of diagonal)")]
    deviation: Option<f64>,
}

#[async_trait::async_trait]
impl RunnableSubcommand for Quality {
    async fn run(&self) -> Result<()> {
        pb_set_print!();

        let source = JsonDetectionSource::open(&self.input_file)?;
        source.validate()?;

        let mut parameters = if let Some(params_path) = &self.params {
            ProcessParameters::from_toml_file(params_path)?
        } else {
            ProcessParameters::default()
        };
        if let Some(v) = self.minconfidence {
            parameters.min_confidence = v;
        }
        if let Some(v) = self.deviation {
            parameters.outlier_deviation_threshold = v;
        }

        let context = ProcessContext::create_from_source(&parameters, &source)?;

        pb_set_prefix!("Scoring Frame Quality");
        pb_set_length!(context.frame_records.len());
        let verdicts = frame_quality_analysis(&context, |_verdict| {
            pb_inc!();
        })?;
        pb_done!();

        let counts = verdicts.iter().counts_by(|v| v.category);
        for category in [
            FrameCategory::Good,
            FrameCategory::LowConfidence,
            FrameCategory::OffScreen,
            FrameCategory::Outlier,
        ] {
            println!(
                "{:>16}: {}",
                category.to_string(),
                counts.get(&category).unwrap_or(&0)
            );
        }

        if let Some((min_conf, max_conf)) = verdicts
            .iter()
            .map(|v| v.average_confidence)
            .minmax()
            .into_option()
        {
            println!("Confidence range: {:.3} to {:.3}", min_conf, max_conf);
        }

        Ok(())
    }
}
