//! Issue feed library crate.
//!
//! Polls a fixed list of GitHub repositories for their most recently updated
//! open issues, enriches each with recent discussion and pull request CI
//! status, and publishes the result as an atomically swapped snapshot that an
//! HTTP surface projects into display-ready JSON.

pub mod config;
pub mod feed;
pub mod github;
pub mod server;
pub mod telemetry;

pub use config::{FeedConfig, FeedSettings};
pub use feed::{FeedSnapshot, RefreshOrchestrator, RefreshReport, SnapshotStore};
pub use github::{FetchError, IssueGateway, OctocrabGateway, PersonalAccessToken, RepositoryLocator};
