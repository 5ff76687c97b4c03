//! # Comment Upsert
//!
//! The component a bot run drives: an [`Issue`] couples the GitHub client,
//! the repository context, and the issue's sidecar metadata, and keeps
//! exactly one status comment on that issue up to date. Repeated runs with
//! the same content are no-ops on the wire.

use anyhow::Result;
use placard_core::metadata::{IssueMetadata, MetadataStore};
use tracing::{debug, info, instrument, warn};

use crate::client::GitHubClient;
use crate::context::RepoContext;

/// A GitHub issue (or pull request) together with its tracked comment state
#[derive(Debug)]
pub struct Issue<'a> {
  client: &'a GitHubClient,
  repo: RepoContext,
  pub number: u64,
  pub metadata: IssueMetadata,
}

impl<'a> Issue<'a> {
  /// Fetch an issue and load its metadata.
  ///
  /// The issue payload only confirms that the issue exists; the constructed
  /// value carries the number and whatever comment the store already tracks
  /// for it.
  pub async fn get_issue(
    client: &'a GitHubClient,
    repo: &RepoContext,
    store: &MetadataStore,
    issue_number: u64,
  ) -> Result<Issue<'a>> {
    let issue = client.get_issue(&repo.owner, &repo.repo, issue_number).await?;
    debug!("Issue #{} exists: {}", issue_number, issue.html_url);

    Ok(Self {
      client,
      repo: repo.clone(),
      number: issue_number,
      metadata: store.get_metadata(issue_number),
    })
  }

  /// Create or update the tracked comment so that its body equals `content`.
  ///
  /// When a comment is already tracked, its current body is fetched first
  /// and the update is skipped when the content is byte-identical. When no
  /// comment is tracked yet, empty content skips creation entirely, and a
  /// creation response without an id is logged and tolerated. At most one
  /// write hits the network per call; metadata is persisted only when a
  /// comment is first created.
  #[instrument(skip(self, store, content), fields(issue = self.number))]
  pub async fn publish_comment(&mut self, store: &mut MetadataStore, content: &str) -> Result<()> {
    info!("Publishing comment to issue #{}", self.number);
    debug!("Comment content: {:?}", content);

    if self.metadata.comment_id.is_some() {
      let current = self.get_comment().await?;
      if current == content {
        debug!("Tracked comment is already up to date");
        return Ok(());
      }

      return self.update_comment(content).await;
    }

    if content.is_empty() {
      debug!("Nothing to publish, skipping comment creation");
      return Ok(());
    }

    let Some(new_comment_id) = self.create_comment(content).await? else {
      warn!("Failed to create comment.");
      return Ok(());
    };

    self.metadata.comment_id = Some(new_comment_id);
    store.set_metadata(&self.metadata)?;

    Ok(())
  }

  /// Current body of the tracked comment, or an empty string when no comment
  /// is tracked yet
  pub async fn get_comment(&self) -> Result<String> {
    let Some(comment_id) = self.metadata.comment_id else {
      return Ok(String::new());
    };

    let comment = self
      .client
      .get_issue_comment(&self.repo.owner, &self.repo.repo, comment_id)
      .await?;

    Ok(comment.body.unwrap_or_default())
  }

  /// Create the tracked comment, returning its id. `None` means the API
  /// accepted the comment without an id.
  async fn create_comment(&self, body: &str) -> Result<Option<u64>> {
    self
      .client
      .create_issue_comment(&self.repo.owner, &self.repo.repo, self.number, body)
      .await
  }

  /// Overwrite the tracked comment's body
  async fn update_comment(&self, body: &str) -> Result<()> {
    let Some(comment_id) = self.metadata.comment_id else {
      return Ok(());
    };

    self
      .client
      .update_issue_comment(&self.repo.owner, &self.repo.repo, comment_id, body)
      .await
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use tempfile::TempDir;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::client::create_github_client;

  fn mock_issue_json(number: u64) -> serde_json::Value {
    json!({
      "number": number,
      "title": "Test Issue",
      "body": "Issue body",
      "html_url": format!("https://github.com/owner/repo/issues/{number}"),
      "state": "open",
      "user": {
        "login": "test_user",
        "id": 1,
        "name": "Test User"
      },
      "created_at": "2023-01-01T12:00:00Z",
      "updated_at": "2023-01-01T12:00:00Z"
    })
  }

  fn mock_comment_json(id: u64, body: &str) -> serde_json::Value {
    json!({
      "id": id,
      "body": body,
      "html_url": format!("https://github.com/owner/repo/issues/1#issuecomment-{id}"),
      "user": {
        "login": "placard-bot",
        "id": 2,
        "name": null
      },
      "created_at": "2023-01-01T12:00:00Z",
      "updated_at": "2023-01-01T12:00:00Z"
    })
  }

  async fn mock_get_issue(server: &MockServer, number: u64) {
    Mock::given(method("GET"))
      .and(path(format!("/repos/owner/repo/issues/{number}")))
      .respond_with(ResponseTemplate::new(200).set_body_json(mock_issue_json(number)))
      .mount(server)
      .await;
  }

  fn test_repo() -> RepoContext {
    RepoContext::new("owner", "repo")
  }

  #[tokio::test]
  async fn test_first_publish_creates_comment_and_persists_id() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    mock_get_issue(&mock_server, 7).await;
    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues/7/comments"))
      .and(body_json(json!({ "body": "Status: pending" })))
      .respond_with(ResponseTemplate::new(201).set_body_json(mock_comment_json(42, "Status: pending")))
      .expect(1)
      .mount(&mock_server)
      .await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();
    let mut store = MetadataStore::open(temp_dir.path())?;

    let mut issue = Issue::get_issue(&client, &test_repo(), &store, 7).await?;
    issue.publish_comment(&mut store, "Status: pending").await?;

    assert_eq!(issue.metadata.comment_id, Some(42));

    // The id survives a store reopen
    let reopened = MetadataStore::open(temp_dir.path())?;
    assert_eq!(reopened.get_metadata(7).comment_id, Some(42));

    Ok(())
  }

  #[tokio::test]
  async fn test_identical_body_skips_update() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    mock_get_issue(&mock_server, 7).await;
    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/comments/42"))
      .respond_with(ResponseTemplate::new(200).set_body_json(mock_comment_json(42, "Status: green")))
      .mount(&mock_server)
      .await;

    // No PATCH may be issued for an up-to-date comment
    Mock::given(method("PATCH"))
      .and(path("/repos/owner/repo/issues/comments/42"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&mock_server)
      .await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();

    let mut store = MetadataStore::open(temp_dir.path())?;
    let mut metadata = store.get_metadata(7);
    metadata.comment_id = Some(42);
    store.set_metadata(&metadata)?;

    let mut issue = Issue::get_issue(&client, &test_repo(), &store, 7).await?;
    issue.publish_comment(&mut store, "Status: green").await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_changed_body_updates_tracked_comment() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    mock_get_issue(&mock_server, 7).await;
    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/comments/42"))
      .respond_with(ResponseTemplate::new(200).set_body_json(mock_comment_json(42, "Status: pending")))
      .mount(&mock_server)
      .await;

    Mock::given(method("PATCH"))
      .and(path("/repos/owner/repo/issues/comments/42"))
      .and(body_json(json!({ "body": "Status: green" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(mock_comment_json(42, "Status: green")))
      .expect(1)
      .mount(&mock_server)
      .await;

    // No second comment may be created
    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues/7/comments"))
      .respond_with(ResponseTemplate::new(201))
      .expect(0)
      .mount(&mock_server)
      .await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();

    let mut store = MetadataStore::open(temp_dir.path())?;
    let mut metadata = store.get_metadata(7);
    metadata.comment_id = Some(42);
    store.set_metadata(&metadata)?;

    let mut issue = Issue::get_issue(&client, &test_repo(), &store, 7).await?;
    issue.publish_comment(&mut store, "Status: green").await?;

    assert_eq!(issue.metadata.comment_id, Some(42));

    Ok(())
  }

  #[tokio::test]
  async fn test_empty_content_skips_creation() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    mock_get_issue(&mock_server, 7).await;
    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues/7/comments"))
      .respond_with(ResponseTemplate::new(201))
      .expect(0)
      .mount(&mock_server)
      .await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();
    let mut store = MetadataStore::open(temp_dir.path())?;

    let mut issue = Issue::get_issue(&client, &test_repo(), &store, 7).await?;
    issue.publish_comment(&mut store, "").await?;

    assert!(issue.metadata.comment_id.is_none());
    // Nothing was persisted
    assert!(!temp_dir.path().join(".placard/metadata.json").exists());

    Ok(())
  }

  #[tokio::test]
  async fn test_creation_without_id_is_non_fatal() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    mock_get_issue(&mock_server, 7).await;
    // 201 whose body has no comment id
    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues/7/comments"))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "body": "Status: pending" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();
    let mut store = MetadataStore::open(temp_dir.path())?;

    let mut issue = Issue::get_issue(&client, &test_repo(), &store, 7).await?;
    issue.publish_comment(&mut store, "Status: pending").await?;

    assert!(issue.metadata.comment_id.is_none());
    assert!(!temp_dir.path().join(".placard/metadata.json").exists());

    Ok(())
  }

  #[tokio::test]
  async fn test_get_comment_without_tracked_comment_is_empty() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    mock_get_issue(&mock_server, 7).await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();
    let store = MetadataStore::open(temp_dir.path())?;

    let issue = Issue::get_issue(&client, &test_repo(), &store, 7).await?;

    assert_eq!(issue.get_comment().await?, "");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_comment_null_body_reads_as_empty() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    mock_get_issue(&mock_server, 7).await;
    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/comments/42"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "id": 42,
        "body": null,
        "html_url": "https://github.com/owner/repo/issues/7#issuecomment-42",
        "user": { "login": "placard-bot", "id": 2, "name": null },
        "created_at": "2023-01-01T12:00:00Z",
        "updated_at": "2023-01-01T12:00:00Z"
      })))
      .mount(&mock_server)
      .await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();

    let mut store = MetadataStore::open(temp_dir.path())?;
    let mut metadata = store.get_metadata(7);
    metadata.comment_id = Some(42);
    store.set_metadata(&metadata)?;

    let issue = Issue::get_issue(&client, &test_repo(), &store, 7).await?;

    assert_eq!(issue.get_comment().await?, "");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_propagates_missing_issue() -> Result<()> {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/404"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&mock_server)
      .await;

    let mut client = create_github_client("test_token")?;
    client.base_url = mock_server.uri();
    let store = MetadataStore::open(temp_dir.path())?;

    let result = Issue::get_issue(&client, &test_repo(), &store, 404).await;
    assert!(result.is_err());

    Ok(())
  }
}
