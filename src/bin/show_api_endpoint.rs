use std::process::ExitCode;

use clap::Parser;
use webull_report::{
    cli::{self, ReportArgs},
    report::{Reporter, endpoints},
    telemetry,
};

fn main() -> ExitCode {
    let args = ReportArgs::parse();
    telemetry::init_tracing(args.log_level());

    let mut reporter = Reporter::stdout(args.output_path("show_api_endpoint"));
    let result = endpoints::run(&mut reporter);

    cli::finish(reporter, result)
}
