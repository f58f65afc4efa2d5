use std::process::ExitCode;

use clap::Parser;
use webull_report::{
    cli::{self, ReportArgs},
    report::{Reporter, asset},
    telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ReportArgs::parse();
    telemetry::init_tracing(args.log_level());

    let mut reporter = Reporter::stdout(args.output_path("show_asset"));
    let result = asset::run(args.env_file(), &mut reporter).await;

    cli::finish(reporter, result)
}
