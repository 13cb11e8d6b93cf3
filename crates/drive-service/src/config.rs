use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

pub const DEFAULT_ROOT: &str = "./drive";

#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Permission bits for folders made by `create_folder` (unix only).
    #[serde(default = "default_folder_mode")]
    pub folder_mode: u32,
}

impl DriveConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize drive config")
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            folder_mode: default_folder_mode(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

fn default_folder_mode() -> u32 {
    0o755
}
