//! # Repository Context
//!
//! The ambient `owner/repo` pair every issue and comment endpoint is scoped
//! to. In CI the slug arrives through the `GITHUB_REPOSITORY` environment
//! variable; embedding hosts can also construct one directly.

use std::env;

use anyhow::{Context, Result};

use crate::consts::ENV_GITHUB_REPOSITORY;

/// The repository a placard run operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
  pub owner: String,
  pub repo: String,
}

impl RepoContext {
  /// Create a context from an owner and repository name
  pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      repo: repo.into(),
    }
  }

  /// Parse an `owner/repo` slug
  pub fn parse(slug: &str) -> Result<Self> {
    let (owner, repo) = slug
      .split_once('/')
      .with_context(|| format!("Invalid repository slug '{slug}', expected 'owner/repo'"))?;

    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
      return Err(anyhow::anyhow!("Invalid repository slug '{slug}', expected 'owner/repo'"));
    }

    Ok(Self::new(owner, repo))
  }

  /// Read the context from the `GITHUB_REPOSITORY` environment variable
  pub fn from_env() -> Result<Self> {
    let slug = env::var(ENV_GITHUB_REPOSITORY)
      .with_context(|| format!("{ENV_GITHUB_REPOSITORY} environment variable is not set"))?;

    Self::parse(&slug)
  }
}
