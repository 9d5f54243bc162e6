//! `edtest.toml` configuration parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use edtest_core::DownloaderConfig;
use serde::Deserialize;

/// File name searched for from the working directory upward.
pub const CONFIG_FILE: &str = "edtest.toml";

/// The top-level configuration file structure. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EdtestConfig {
    /// Project and artifact locations.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Editor binary override.
    #[serde(default)]
    pub editor: EditorConfig,
    /// Package downloader settings.
    #[serde(default)]
    pub downloader: DownloaderSection,
}

/// `[project]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// Project directory passed to the editor.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Directory for result and log files.
    #[serde(default)]
    pub artifacts: Option<PathBuf>,
}

/// `[editor]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorConfig {
    /// Editor binary to launch instead of the downloaded default.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[downloader]` section. Unset keys fall back to [`DownloaderConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloaderSection {
    #[serde(default)]
    pub installer: Option<String>,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub index_url: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
}

/// A configuration together with the directory it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: EdtestConfig,
    pub dir: PathBuf,
}

impl LoadedConfig {
    /// Resolve a path from the file against the file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.dir.join(path)
    }
}

impl EdtestConfig {
    /// Search upward from `start_dir` for an `edtest.toml`, parse it and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<LoadedConfig>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some(LoadedConfig { config, dir }));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load an explicitly named configuration file.
    pub fn load_file(path: &Path) -> Result<LoadedConfig> {
        let config = Self::load(path)?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(LoadedConfig { config, dir })
    }

    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing edtest.toml")
    }

    /// Downloader settings with defaults filled in.
    pub fn downloader(&self) -> DownloaderConfig {
        let defaults = DownloaderConfig::default();
        let section = &self.downloader;
        DownloaderConfig {
            installer: section.installer.clone().unwrap_or(defaults.installer),
            package: section.package.clone().unwrap_or(defaults.package),
            index_url: section.index_url.clone().or(defaults.index_url),
            program: section.program.clone().unwrap_or(defaults.program),
        }
    }
}
