use std::path::Path;

use anyhow::Context;
use drive_service::{DirectoryService, DriveConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "drive.toml";

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting drive report");
    let config = load_config(Path::new(CONFIG_FILE))?;
    let service = DirectoryService::new(config);
    info!(root = %service.root().display(), "drive root configured");

    let folders = service
        .list_root_folders()
        .with_context(|| format!("failed to list drive root {}", service.root().display()))?;

    if folders.is_empty() {
        warn!("drive root has no folders");
    } else {
        info!(count = folders.len(), "root folders loaded");
        for folder in &folders {
            info!(
                name = %folder.name,
                path = %folder.path,
                size = %folder.size,
                last_modified = %folder.last_modified,
                "root folder"
            );
        }
    }

    let tree = service.build_root_tree().context("failed to build drive tree")?;
    let files: usize = tree.iter().map(|folder| folder.items.len()).sum();
    info!(folders = tree.len(), files, "drive tree built");

    info!("drive report complete");
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<DriveConfig> {
    if path.exists() {
        info!(path = %path.display(), "loading drive config");
        DriveConfig::from_file(path)
    } else {
        info!(path = %path.display(), "config file not found, using defaults");
        Ok(DriveConfig::default())
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
