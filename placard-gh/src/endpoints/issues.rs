//! GitHub Issues API endpoint implementations.

use anyhow::{Context, Result};
use reqwest::header;
use tracing::{debug, info, instrument, trace, warn};

use crate::client::GitHubClient;
use crate::consts::{ACCEPT, USER_AGENT};
use crate::models::GitHubIssue;

impl GitHubClient {
  /// Get a specific issue by number. Pull requests are issues to this
  /// endpoint, so a PR number works too.
  ///
  /// # Errors
  ///
  /// Returns an error if the issue is not found or deleted, authentication
  /// fails, the request cannot be sent, or the response cannot be parsed.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_issue(&self, owner: &str, repo: &str, issue_number: u64) -> Result<GitHubIssue> {
    info!("Fetching issue #{} for {}/{}", issue_number, owner, repo);

    let url = format!("{}/repos/{}/{}/issues/{}", self.base_url, owner, repo, issue_number);

    trace!("GitHub API URL: {}", url);

    let response = self
      .client
      .get(&url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT)
      .bearer_auth(&self.auth.token)
      .send()
      .await
      .context(format!("GET {url} failed"))?;

    let status = response.status();
    debug!("GitHub API response status: {}", status);

    match status {
      reqwest::StatusCode::OK => {
        info!("Successfully received issue data");
        let issue = response
          .json::<GitHubIssue>()
          .await
          .context("Failed to parse GitHub issue response")?;
        trace!("Issue: {:?}", issue);
        Ok(issue)
      }
      reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
        warn!("Authentication failed when accessing GitHub API");
        Err(anyhow::anyhow!(
          "Authentication failed. Please check your GitHub credentials."
        ))
      }
      reqwest::StatusCode::NOT_FOUND => Err(anyhow::anyhow!(
        "Issue #{} not found for {}/{}",
        issue_number,
        owner,
        repo
      )),
      // GitHub answers 410 for issues that existed but were deleted
      reqwest::StatusCode::GONE => Err(anyhow::anyhow!(
        "Issue #{} for {}/{} has been deleted",
        issue_number,
        owner,
        repo
      )),
      _ => {
        let error_text = response.text().await.unwrap_or_default();
        warn!("Unexpected GitHub API error: HTTP {} - {}", status, error_text);
        Err(anyhow::anyhow!("Unexpected error: HTTP {status} - {error_text}"))
      }
    }
  }
}
