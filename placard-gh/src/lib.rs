//! # GitHub API Client
//!
//! Provides GitHub REST API integration for the issue and issue-comment
//! endpoints, plus the [`Issue`] upsert component that keeps a bot's single
//! status comment per issue up to date across runs.

pub mod client;
pub mod consts;
pub mod context;
pub mod endpoints;
pub mod issue;
pub mod models;

// Re-export the client
pub use client::{GitHubClient, create_github_client};
// Re-export the repository context
pub use context::RepoContext;
// Re-export the upsert component
pub use issue::Issue;
// Re-export models
pub use models::{GitHubAuth, GitHubComment, GitHubIssue, GitHubUser};
