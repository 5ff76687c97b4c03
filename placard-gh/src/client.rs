//! # GitHub HTTP Client
//!
//! HTTP client implementation for GitHub API interactions, handling
//! authentication, request building, and response parsing for GitHub REST API
//! operations.

use anyhow::{Context, Result};
use reqwest::Client;

use crate::consts::API_BASE_URL;
use crate::models::GitHubAuth;

/// Represents a GitHub API client
#[derive(Debug)]
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: GitHubAuth,
}

impl GitHubClient {
  /// Create a new GitHub client
  pub fn new(auth: GitHubAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: API_BASE_URL.to_string(),
      auth,
    }
  }

  /// Test the GitHub connection by fetching the current user
  pub async fn test_connection(&self) -> Result<bool> {
    let url = format!("{}/user", self.base_url);

    let response = self
      .client
      .get(&url)
      .header("Accept", crate::consts::ACCEPT)
      .header("User-Agent", crate::consts::USER_AGENT)
      .bearer_auth(&self.auth.token)
      .send()
      .await
      .context("Failed to connect to GitHub")?;

    Ok(response.status().is_success())
  }
}

/// Create a GitHub client from a bare token
pub fn create_github_client(token: &str) -> Result<GitHubClient> {
  let auth = GitHubAuth::new(token);

  Ok(GitHubClient::new(auth))
}
