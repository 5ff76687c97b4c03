#![allow(dead_code)]

use serde::Deserialize;

/// Represents GitHub authentication credentials
#[derive(Clone)]
pub struct GitHubAuth {
  pub token: String,
}

impl GitHubAuth {
  /// Create credentials from a bare token, e.g. the `GITHUB_TOKEN` a CI job
  /// hands to the bot
  pub fn new(token: impl Into<String>) -> Self {
    Self { token: token.into() }
  }
}

impl std::fmt::Debug for GitHubAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GitHubAuth").field("token", &"[redacted]").finish()
  }
}

/// Represents a GitHub user
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  pub id: u64,
  pub name: Option<String>,
}

/// Represents a GitHub issue or pull request in its issue form
#[derive(Debug, Deserialize)]
pub struct GitHubIssue {
  pub number: u64,
  pub title: String,
  pub body: Option<String>,
  pub html_url: String,
  pub state: String,
  pub user: GitHubUser,
  pub created_at: String,
  pub updated_at: String,
}

/// Represents a comment on a GitHub issue or pull request
#[derive(Debug, Deserialize)]
pub struct GitHubComment {
  pub id: u64,
  pub body: Option<String>,
  pub html_url: String,
  pub user: GitHubUser,
  pub created_at: String,
  pub updated_at: String,
}
