//! Constants for the placard-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("placard/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// Environment variable carrying the ambient `owner/repo` slug in CI.
pub const ENV_GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
