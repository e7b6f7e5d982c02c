use anyhow::Result;
use clap::Parser;

use posesync::datasource::{DetectionSource, JsonDetectionSource};

use crate::subs::runnable::RunnableSubcommand;

#[derive(Parser)]
#[command(author, version, about = "Print information from a detections file", long_about = None)]
pub struct Info {
    #[clap(long, short, help = "Input detections file (JSON)")]
    input_file: String,
}

fn do_validation<F: DetectionSource>(source: &F) -> Result<()> {
    source.validate()?;
    source.print_header_details();
    Ok(())
}

#[async_trait::async_trait]
impl RunnableSubcommand for Info {
    async fn run(&self) -> Result<()> {
        if std::path::Path::new(&self.input_file).exists() {
            let source = JsonDetectionSource::open(&self.input_file)
                .expect("Unable to load detections file");
            do_validation(&source)?;
        }
        Ok(())
    }
}
