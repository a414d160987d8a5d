use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueHint};
use serde::Deserialize;

use crate::data::loader::DEFAULT_ENCODING;

/// File loaded at startup when no path is given.
pub const DEFAULT_DATA_FILE: &str = "Most Streamed Spotify Songs 2024.csv";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Music streaming trends dashboard", long_about = None)]
pub struct Cli {
    /// CSV file with Track, Artist, Spotify Streams and TikTok Views columns
    #[arg(value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Text encoding of the CSV file (WHATWG label, e.g. latin1, utf-8)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Initial number of top songs shown
    #[arg(long)]
    pub top_n: Option<usize>,

    /// JSON file with dashboard settings; flags override it
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Use the light theme
    #[arg(long)]
    pub light: bool,
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Bounds and starting value of the "Show Top Songs" slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TopNRange {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl Default for TopNRange {
    fn default() -> Self {
        Self { min: 5, max: 20, default: 10 }
    }
}

impl TopNRange {
    pub fn clamp(&self, n: usize) -> usize {
        n.clamp(self.min, self.max)
    }

    fn validate(&self) -> Result<()> {
        if self.min == 0 {
            bail!("top_n.min must be at least 1");
        }
        if self.min > self.max {
            bail!("top_n.min ({}) is larger than top_n.max ({})", self.min, self.max);
        }
        if !(self.min..=self.max).contains(&self.default) {
            bail!(
                "top_n.default ({}) is outside {}..={}",
                self.default,
                self.min,
                self.max
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub encoding: String,
    pub top_n: TopNRange,
    pub dark_mode: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            encoding: DEFAULT_ENCODING.to_string(),
            top_n: TopNRange::default(),
            dark_mode: true,
        }
    }
}

impl DashboardConfig {
    /// Read settings from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Defaults, then the optional config file, then command-line flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(data) = &cli.data {
            config.data_path = data.clone();
        }
        if let Some(encoding) = &cli.encoding {
            config.encoding = encoding.clone();
        }
        if let Some(n) = cli.top_n {
            config.top_n.default = n;
        }
        if cli.light {
            config.dark_mode = false;
        }

        config.top_n.validate().context("invalid top-N settings")?;
        log::debug!("Resolved configuration: {config:?}");
        Ok(config)
    }
}
