use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;

fn default_output_dir() -> PathBuf {
    PathBuf::from("frames")
}

fn default_metadata_dir() -> PathBuf {
    PathBuf::from("SDfiles")
}

/// Output locations for the extractor.
///
/// Both directories can come from a TOML file or be overridden on the
/// command line; the defaults keep the directory names the firmware
/// tooling has always used.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Where the BMP frames are written.
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,

    /// Where the binary info record is written.
    #[serde(default = "default_metadata_dir")]
    metadata_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            metadata_dir: default_metadata_dir(),
        }
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).context("failed to parse configuration")
    }
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).context("failed to read configuration file")?;
        contents.parse()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) {
        self.output_dir = dir;
    }

    pub fn set_metadata_dir(&mut self, dir: PathBuf) {
        self.metadata_dir = dir;
    }
}
