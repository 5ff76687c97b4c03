//! # GitHub API Endpoints
//!
//! Organized endpoint implementations for the GitHub API resources placard
//! touches: issues and issue comments.

pub mod comments;
pub mod issues;
