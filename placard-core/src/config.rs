//! # Configuration Directories
//!
//! Resolves where placard keeps its metadata: a sidecar directory next to
//! the tree the bot operates on, or the platform data directory for runs
//! that have no checkout to attach to.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Name of the sidecar directory created next to the bot's working tree.
pub const SIDECAR_DIR: &str = ".placard";

/// File name of the metadata store inside a store directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Represents the configuration directories for placard
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub data_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("io.github", "", "placard").context("Failed to determine project directories")?;

    Ok(Self {
      data_dir: proj_dirs.data_dir().to_path_buf(),
    })
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Initialize the data directory
  pub fn init(&self) -> Result<()> {
    fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
    Ok(())
  }

  /// Get the path to the metadata store file in the data directory
  pub fn metadata_path(&self) -> PathBuf {
    self.data_dir.join(METADATA_FILE)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Get the sidecar directory for a working tree
pub fn sidecar_dir<P: AsRef<Path>>(root: P) -> PathBuf {
  root.as_ref().join(SIDECAR_DIR)
}

/// Get the path to the sidecar metadata store for a working tree
pub fn sidecar_path<P: AsRef<Path>>(root: P) -> PathBuf {
  sidecar_dir(root).join(METADATA_FILE)
}
