mod subs;
use anyhow::Result;
use colored::Colorize;
use subs::runnable::RunnableSubcommand;
use subs::*;

#[macro_use]
extern crate stump;

extern crate wild;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[clap(name = "posesync")]
#[clap(about = "Pose sequence quality filtering and frame index synchronization", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: PoseSync,

    #[clap(long, short, help = "Verbose output")]
    verbose: bool,
}

#[derive(Subcommand)]
enum PoseSync {
    Process(process::Process),
    Quality(quality::Quality),
    Info(info::Info),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let t1 = std::time::Instant::now();

    stump::set_min_log_level(stump::LogEntryLevel::WARN);
    info!("Initialized logging"); // INFO, which means that this won't be seen
                                  // unless the user overrides via environment
                                  // variable.

    let args = Cli::parse_from(wild::args());

    if args.verbose {
        stump::set_verbose(true);
    }

    if let Err(why) = match args.command {
        PoseSync::Process(args) => args.run().await,
        PoseSync::Quality(args) => args.run().await,
        PoseSync::Info(args) => args.run().await,
    } {
        error!("{}", "Unhandled program error:".red());
        error!("{}", why);
    };
    info!("Runtime: {}s", t1.elapsed().as_secs_f64());
    Ok(())
}
