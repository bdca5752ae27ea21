// src/config/options.rs
use std::path::PathBuf;

use clap::ValueEnum;

use super::consts::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `variable: id` lines
    #[default]
    Plain,
    Toml,
    Yaml,
}

impl OutputFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            // plain lines are a bare YAML mapping
            OutputFormat::Plain | OutputFormat::Yaml => "yaml",
            OutputFormat::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Only files whose path ends with these components are parsed.
    pub suffix: String,
    pub format: OutputFormat,
    pub workers: usize,
}

impl BatchOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            suffix: s!(DEFAULT_SUFFIX),
            format: OutputFormat::Yaml,
            workers: WORKERS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizeOptions {
    pub module_name: String,
    /// None → print every locale block to stdout.
    pub out_dir: Option<PathBuf>,
    /// Locale codes to process; empty means all of them.
    pub only: Vec<String>,
    /// URL prefix with a `{subdomain}` placeholder.
    pub base_url: String,
    /// Request NPCs even when `out_dir` already has them translated.
    pub force_all: bool,
}

impl LocalizeOptions {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            out_dir: None,
            only: Vec::new(),
            base_url: s!(DEFAULT_BASE_URL),
            force_all: false,
        }
    }

    pub fn wants(&self, code: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|c| c.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_filter_is_case_insensitive_and_empty_means_all() {
        let mut opts = LocalizeOptions::new("Test Trash");
        assert!(opts.wants("deDE"));
        opts.only = vec![s!("dede")];
        assert!(opts.wants("deDE"));
        assert!(!opts.wants("frFR"));
    }
}
