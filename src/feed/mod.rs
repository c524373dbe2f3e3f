//! Feed assembly: enrichment, per-repository fetches, refresh cycles,
//! published snapshots, and their presentation view.
//!
//! A refresh cycle fans out one fetch per configured repository and, inside
//! each, one enrichment per listed issue. Results are fanned back in by
//! position, so output order never depends on which request finished first.

mod fan_out;
pub mod enrich;
pub mod humanize;
pub mod normalize;
pub mod refresh;
pub mod repository;
pub mod settings;
pub mod snapshot;
pub mod view;

pub use enrich::{CheckSuiteGroup, IssueEnricher, IssueEnrichment};
pub use normalize::{Comment, DiscussionRecord};
pub use refresh::{RefreshOrchestrator, RefreshReport, RepositoryFailure};
pub use repository::{IssueFailure, RepositoryFetch, RepositoryFetcher};
pub use settings::FetchSettings;
pub use snapshot::{EnrichedIssue, FeedSnapshot, RepositorySnapshot, SnapshotStore};
pub use view::{RepositoryView, project};
