//! Tunables shared by the repository fetcher and the refresh orchestrator.

use std::num::NonZeroUsize;

/// Number of most recent comments kept per issue unless configured otherwise.
pub const DEFAULT_COMMENTS_PER_ISSUE: usize = 2;

/// Number of open issues listed per repository unless configured otherwise.
pub const DEFAULT_ISSUES_PER_REPOSITORY: u8 = 5;

/// Limits applied to every refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    /// Page size of the open issue listing.
    pub issues_per_repository: u8,
    /// Maximum number of comments kept per issue.
    pub comments_per_issue: usize,
    /// Maximum number of in-flight units per fan-out level; `None` runs every
    /// unit at once.
    pub concurrency: Option<NonZeroUsize>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            issues_per_repository: DEFAULT_ISSUES_PER_REPOSITORY,
            comments_per_issue: DEFAULT_COMMENTS_PER_ISSUE,
            concurrency: None,
        }
    }
}
