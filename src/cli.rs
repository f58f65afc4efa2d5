use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Result;
use clap::Parser;
use derive_getters::Getters;
use tracing::error;

use crate::{config::ConfigError, report::{Aborted, Reporter}};

/// Options shared by every report binary.
#[derive(Debug, Getters, Parser)]
pub struct ReportArgs {
    /// Credential file with WEBULL_APP_KEY and WEBULL_APP_SECRET
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Markdown report path [default: <binary name>.md]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Diagnostics filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl ReportArgs {
    /// `--output`, or `<bin_name>.md` in the current directory.
    pub fn output_path(&self, bin_name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(bin_name))
    }
}

pub fn default_output(bin_name: &str) -> PathBuf {
    Path::new(bin_name).with_extension("md")
}

/// Writes the report file whatever the outcome and maps the outcome to an
/// exit status.
pub fn finish<W: Write>(mut reporter: Reporter<W>, result: Result<()>) -> ExitCode {
    let mut code = ExitCode::SUCCESS;

    if let Err(err) = result {
        code = ExitCode::FAILURE;
        let explained = err.is::<ConfigError>() || err.is::<Aborted>();
        if explained {
            error!("{}", err);
        } else {
            reporter.blank();
            reporter.line(format!("❌ エラーが発生しました: {}", err));
            eprintln!("{:?}", err);
        }
    }

    if let Err(err) = reporter.finish() {
        eprintln!("✗ ファイル保存エラー: {:?}", err);
        code = ExitCode::FAILURE;
    }

    code
}
