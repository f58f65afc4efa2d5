use std::{collections::HashMap, env, fs, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Key/value pairs read from a `.env` style credential file.
///
/// Lookups always prefer a non-empty value already present in the process
/// environment; the environment itself is never modified.
#[derive(Clone, Debug, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Reads `path`. A missing file yields an empty set of entries rather
    /// than an error so the process environment alone can supply credentials.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Credential file {} not found, falling back to the process environment",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read credential file {}", path.display()))?;

        let mut vars = HashMap::new();
        for line in content.lines() {
            let Some((key, value)) = parse_line(line) else {
                continue;
            };
            // first definition wins
            vars.entry(key.to_string()).or_insert_with(|| value.to_string());
        }

        debug!("Loaded {} entries from {}", vars.len(), path.display());

        Ok(Self { vars })
    }

    pub fn file_value(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn resolve(&self, key: &str) -> Option<String> {
        self.resolve_with(key, |name| env::var(name).ok())
    }

    /// Resolves `key` against `lookup` (the environment) first and the file
    /// second. Empty environment values count as unset.
    pub fn resolve_with<F>(&self, key: &str, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(key)
            .filter(|value| !value.is_empty())
            .or_else(|| self.vars.get(key).cloned())
    }
}

/// Splits a `KEY=VALUE` line at the first `=`. Blank lines, `#` comments,
/// lines without `=` and entries with an empty key or value yield `None`.
/// Values are taken literally apart from one pair of enclosing quotes.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = unquote(value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
