//! # GitHub Issue Comment Endpoints
//!
//! GitHub API endpoint implementations for issue comment operations:
//! fetching, creating, and updating comments on issues and pull requests.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header;
use serde_json::json;
use tracing::{debug, instrument, trace, warn};

use crate::client::GitHubClient;
use crate::consts::{ACCEPT, USER_AGENT};
use crate::models::GitHubComment;

impl GitHubClient {
  /// Get a specific issue comment by its id
  #[instrument(skip(self), level = "debug")]
  pub async fn get_issue_comment(&self, owner: &str, repo: &str, comment_id: u64) -> Result<GitHubComment> {
    let url = format!("{}/repos/{}/{}/issues/comments/{}", self.base_url, owner, repo, comment_id);

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
      StatusCode::OK => {
        // First get the response body as text
        let body = response.text().await.context("Failed to read response body")?;

        // Then try to parse it as JSON
        let comment = match serde_json::from_str::<GitHubComment>(&body) {
          Ok(comment) => comment,
          Err(e) => {
            // Try to extract the error message from the response
            if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&body) {
              if let Some(message) = error_json.get("message").and_then(|m| m.as_str()) {
                return Err(anyhow::anyhow!("Failed to parse comment: GitHub API error: {}", message));
              }
            }
            // Fall back to the original error if we can't extract a message
            return Err(anyhow::anyhow!("Failed to parse comment: {}", e));
          }
        };

        Ok(comment)
      }
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Comment {} not found for {}/{}", comment_id, owner, repo)),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your GitHub credentials."
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        status,
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Create a comment on an issue or pull request.
  ///
  /// Returns the new comment's id, or `None` when the API accepted the
  /// request but the response carried no id.
  #[instrument(skip(self, body), level = "debug")]
  pub async fn create_issue_comment(
    &self,
    owner: &str,
    repo: &str,
    issue_number: u64,
    body: &str,
  ) -> Result<Option<u64>> {
    let url = format!("{}/repos/{}/{}/issues/{}/comments", self.base_url, owner, repo, issue_number);

    trace!("GitHub API URL: {}", url);

    let response = self
      .client
      .post(&url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT)
      .bearer_auth(&self.auth.token)
      .json(&json!({ "body": body }))
      .send()
      .await
      .context(format!("POST {url} failed"))?;

    let status = response.status();
    debug!("GitHub API response status: {}", status);

    match status {
      StatusCode::CREATED => {
        let text = response.text().await.context("Failed to read response body")?;
        let created =
          serde_json::from_str::<serde_json::Value>(&text).context("Failed to parse created comment response")?;

        Ok(created.get("id").and_then(|id| id.as_u64()))
      }
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!(
        "Issue #{} not found for {}/{}",
        issue_number,
        owner,
        repo
      )),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        warn!("Authentication failed when accessing GitHub API");
        Err(anyhow::anyhow!(
          "Authentication failed. Please check your GitHub credentials."
        ))
      }
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        status,
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Overwrite the body of an existing issue comment
  #[instrument(skip(self, body), level = "debug")]
  pub async fn update_issue_comment(&self, owner: &str, repo: &str, comment_id: u64, body: &str) -> Result<()> {
    let url = format!("{}/repos/{}/{}/issues/comments/{}", self.base_url, owner, repo, comment_id);

    trace!("GitHub API URL: {}", url);

    let response = self
      .client
      .patch(&url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT)
      .bearer_auth(&self.auth.token)
      .json(&json!({ "body": body }))
      .send()
      .await
      .context(format!("PATCH {url} failed"))?;

    let status = response.status();
    debug!("GitHub API response status: {}", status);

    match status {
      // The updated comment payload is not needed by any caller
      StatusCode::OK => Ok(()),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Comment {} not found for {}/{}", comment_id, owner, repo)),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your GitHub credentials."
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        status,
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
