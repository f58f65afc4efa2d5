use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Where a line goes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    Both,
    ConsoleOnly,
    FileOnly,
}

impl Route {
    fn to_console(self) -> bool {
        !matches!(self, Route::FileOnly)
    }

    fn to_file(self) -> bool {
        !matches!(self, Route::ConsoleOnly)
    }
}

/// Writes every line to the console as soon as it is emitted and keeps the
/// file-eligible ones for the Markdown report written by [`Reporter::save`].
pub struct Reporter<W: Write> {
    console: W,
    lines: Vec<String>,
    path: PathBuf,
}

impl Reporter<io::Stdout> {
    pub fn stdout(path: impl Into<PathBuf>) -> Self {
        Self::new(io::stdout(), path)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(console: W, path: impl Into<PathBuf>) -> Self {
        Self {
            console,
            lines: Vec::new(),
            path: path.into(),
        }
    }

    pub fn emit(&mut self, route: Route, line: impl AsRef<str>) {
        let line = line.as_ref();
        if route.to_console() {
            if let Err(err) = writeln!(self.console, "{}", line).and_then(|_| self.console.flush()) {
                warn!("Failed to write to console: {}", err);
            }
        }
        if route.to_file() {
            self.lines.push(line.to_string());
        }
    }

    pub fn line(&mut self, line: impl AsRef<str>) {
        self.emit(Route::Both, line);
    }

    pub fn console(&mut self, line: impl AsRef<str>) {
        self.emit(Route::ConsoleOnly, line);
    }

    pub fn file_only(&mut self, line: impl AsRef<str>) {
        self.emit(Route::FileOnly, line);
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    /// File-eligible lines collected so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the report file with the collected lines.
    pub fn save(&self) -> Result<()> {
        let mut content = self.lines.join("\n");
        content.push('\n');
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write report to {}", self.path.display()))?;
        info!("Report written to {}", self.path.display());
        Ok(())
    }

    /// Saves the report and tells the user where it went.
    pub fn finish(&mut self) -> Result<()> {
        self.save()?;
        let saved = format!("✅ 出力ファイルが作成されました: {}", self.path.display());
        self.console("");
        self.console(saved);
        Ok(())
    }

    pub fn into_console(self) -> W {
        self.console
    }
}
