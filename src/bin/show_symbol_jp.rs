use std::process::ExitCode;

use clap::Parser;
use webull_report::{
    cli::{self, ReportArgs},
    report::{
        Reporter,
        symbols::{self, Market},
    },
    telemetry,
};

fn main() -> ExitCode {
    let args = ReportArgs::parse();
    telemetry::init_tracing(args.log_level());

    let mut reporter = Reporter::stdout(args.output_path("show_symbol_jp"));
    let result = symbols::run(Market::Jp, args.env_file(), &mut reporter);

    cli::finish(reporter, result)
}
