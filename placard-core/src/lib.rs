//! # Placard Core Library
//!
//! Sidecar metadata persistence for placard: records which comment the bot
//! owns on each GitHub issue so that repeated runs update that comment in
//! place instead of posting duplicates. The store is a plain JSON file,
//! either inside a `.placard/` directory next to the tree the bot operates
//! on or under the platform data directory.

pub mod config;
pub mod metadata;

// Re-export main types for embedding bots
pub use config::{ConfigDirs, sidecar_dir, sidecar_path};
pub use metadata::{IssueMetadata, MetadataStore};
