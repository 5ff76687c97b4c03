//! # Sidecar Metadata
//!
//! Persists which comment placard owns on each issue so that repeated runs
//! update the same comment instead of spamming new ones. At most one comment
//! is tracked per issue; the store is keyed by issue number.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;

/// Current schema version of the metadata file.
const METADATA_VERSION: u32 = 1;

/// Ensure the store directory contains a `.gitignore` that ignores every file
/// within it. This keeps placard's metadata out of version control without
/// mutating the enclosing repository's root `.gitignore` file.
pub fn ensure_store_gitignore<P: AsRef<Path>>(dir: P) -> Result<()> {
  let dir = dir.as_ref();
  if !dir.exists() {
    fs::create_dir_all(dir).context("Failed to create metadata directory")?;
  }

  let gitignore_path = dir.join(".gitignore");
  if gitignore_path.exists() {
    let content = fs::read_to_string(&gitignore_path).context("Failed to read metadata .gitignore")?;
    if content.lines().any(|line| line.trim() == "*") {
      return Ok(());
    }
  }

  fs::write(&gitignore_path, "*\n").context("Failed to update metadata .gitignore")?;

  Ok(())
}

/// Per-issue record naming the comment placard owns on that issue
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IssueMetadata {
  pub issue: u64,
  pub comment_id: Option<u64>,
  pub created_at: DateTime<Utc>,
}

impl IssueMetadata {
  /// Create an empty record for an issue with no tracked comment yet
  pub fn new(issue: u64) -> Self {
    Self {
      issue,
      comment_id: None,
      created_at: Utc::now(),
    }
  }
}

/// On-disk document holding every issue record
#[derive(Debug, Serialize, Deserialize)]
struct MetadataFile {
  version: u32,
  updated_at: DateTime<Utc>,
  issues: HashMap<u64, IssueMetadata>,
}

impl Default for MetadataFile {
  fn default() -> Self {
    Self {
      version: METADATA_VERSION,
      updated_at: Utc::now(),
      issues: HashMap::new(),
    }
  }
}

/// File-backed store for issue metadata
#[derive(Debug)]
pub struct MetadataStore {
  path: PathBuf,
  data: MetadataFile,
}

impl MetadataStore {
  /// Open the sidecar store for a working tree, starting empty when no
  /// metadata has been written yet
  pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
    Self::open_path(config::sidecar_path(root))
  }

  /// Open the store in the platform data directory, for runs that have no
  /// working tree to attach to
  pub fn open_default() -> Result<Self> {
    let config_dirs = config::ConfigDirs::new()?;
    Self::open_path(config_dirs.metadata_path())
  }

  fn open_path(path: PathBuf) -> Result<Self> {
    if !path.exists() {
      return Ok(Self {
        path,
        data: MetadataFile::default(),
      });
    }

    let content = fs::read_to_string(&path).context("Failed to read metadata file")?;
    let data = serde_json::from_str(&content).context("Failed to parse metadata file")?;

    Ok(Self { path, data })
  }

  /// Get the record for an issue, or a fresh one when the issue has never
  /// been seen
  pub fn get_metadata(&self, issue: u64) -> IssueMetadata {
    self
      .data
      .issues
      .get(&issue)
      .cloned()
      .unwrap_or_else(|| IssueMetadata::new(issue))
  }

  /// Upsert an issue record and save the store to disk in the same call
  pub fn set_metadata(&mut self, metadata: &IssueMetadata) -> Result<()> {
    self.data.issues.insert(metadata.issue, metadata.clone());
    self.save()
  }

  /// Save the store to disk
  fn save(&mut self) -> Result<()> {
    let dir = self.path.parent().context("Metadata path has no parent directory")?;
    ensure_store_gitignore(dir)?;

    self.data.updated_at = Utc::now();
    let content = serde_json::to_string_pretty(&self.data).context("Failed to serialize metadata")?;

    fs::write(&self.path, content).context("Failed to write metadata file")?;

    Ok(())
  }

  /// Path of the backing file
  pub fn path(&self) -> &Path {
    &self.path
  }
}
