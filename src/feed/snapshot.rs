//! Immutable feed snapshots and the store that publishes them.
//!
//! A refresh cycle builds a complete [`FeedSnapshot`] privately and hands it
//! to [`SnapshotStore::publish`], which swaps it in with a single atomic
//! pointer store. Readers load the current `Arc` without locking; a snapshot
//! they already hold stays valid after newer ones are published.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};

use crate::github::locator::{IssueNumber, RepositoryName};
use crate::github::models::{Issue, Reactions};

use super::enrich::{CheckSuiteGroup, IssueEnrichment};
use super::normalize::Comment;

/// An issue together with its successful enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedIssue {
    /// The issue as listed.
    pub issue: Issue,
    /// Discussion, draft flag, and check runs attached this cycle.
    pub enrichment: IssueEnrichment,
}

/// One repository's issues, in upstream listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySnapshot {
    repository: RepositoryName,
    issues: Vec<EnrichedIssue>,
}

impl RepositorySnapshot {
    /// Creates a repository snapshot from fully enriched issues.
    #[must_use]
    pub const fn new(repository: RepositoryName, issues: Vec<EnrichedIssue>) -> Self {
        Self { repository, issues }
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Issues in listing order.
    #[must_use]
    pub fn issues(&self) -> &[EnrichedIssue] {
        &self.issues
    }

    /// Looks up an issue by number.
    #[must_use]
    pub fn issue(&self, number: IssueNumber) -> Option<&EnrichedIssue> {
        self.issues.iter().find(|entry| entry.issue.number == number)
    }

    /// Comments attached to `number`; empty for unknown issues.
    #[must_use]
    pub fn comments_for(&self, number: IssueNumber) -> &[Comment] {
        self.issue(number)
            .map(|entry| entry.enrichment.comments.as_slice())
            .unwrap_or_default()
    }

    /// Check suite groups attached to `number`; empty for unknown issues.
    #[must_use]
    pub fn check_runs_for(&self, number: IssueNumber) -> &[CheckSuiteGroup] {
        self.issue(number)
            .map(|entry| entry.enrichment.check_runs.as_slice())
            .unwrap_or_default()
    }

    /// Reaction counts of `number`, if the issue is present.
    #[must_use]
    pub fn reactions_for(&self, number: IssueNumber) -> Option<Reactions> {
        self.issue(number).map(|entry| entry.issue.reactions)
    }

    /// Draft flag of `number`; false for unknown issues.
    #[must_use]
    pub fn is_draft(&self, number: IssueNumber) -> bool {
        self.issue(number)
            .is_some_and(|entry| entry.enrichment.is_draft)
    }
}

/// Point-in-time aggregation of every repository that fetched successfully,
/// in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    repositories: Vec<RepositorySnapshot>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl FeedSnapshot {
    /// Creates a snapshot completed at `refreshed_at`.
    #[must_use]
    pub const fn new(repositories: Vec<RepositorySnapshot>, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            repositories,
            refreshed_at: Some(refreshed_at),
        }
    }

    /// Repositories in configured order.
    #[must_use]
    pub fn repositories(&self) -> &[RepositorySnapshot] {
        &self.repositories
    }

    /// Looks up a repository by name.
    #[must_use]
    pub fn repository(&self, name: &str) -> Option<&RepositorySnapshot> {
        self.repositories
            .iter()
            .find(|snapshot| snapshot.repository.as_str() == name)
    }

    /// Completion time of the cycle that built this snapshot; `None` before
    /// the first refresh.
    #[must_use]
    pub const fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }
}

/// Process-wide holder of the latest published snapshot.
///
/// Cloning the store yields another handle to the same slot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    current: Arc<ArcSwap<FeedSnapshot>>,
}

impl SnapshotStore {
    /// Creates a store holding an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(FeedSnapshot::default())),
        }
    }

    /// Replaces the visible snapshot in one atomic step.
    pub fn publish(&self, snapshot: FeedSnapshot) {
        self.current.store(Arc::new(snapshot));
    }

    /// Returns the latest published snapshot without waiting on any refresh.
    #[must_use]
    pub fn current(&self) -> Arc<FeedSnapshot> {
        self.current.load_full()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{EnrichedIssue, FeedSnapshot, RepositorySnapshot, SnapshotStore};
    use crate::feed::enrich::{IssueEnrichment, group_check_runs};
    use crate::github::locator::{IssueNumber, RepositoryName};
    use crate::github::models::test_support::{at_minute, check_run, issue};

    fn repository(name: &str) -> RepositorySnapshot {
        let enrichment = IssueEnrichment {
            check_runs: group_check_runs(vec![check_run(1, 1)]),
            is_draft: true,
            ..IssueEnrichment::default()
        };
        RepositorySnapshot::new(
            RepositoryName::new(name).expect("name should be valid"),
            vec![EnrichedIssue {
                issue: issue(5, "Flaky test"),
                enrichment,
            }],
        )
    }

    #[test]
    fn store_starts_with_empty_unrefreshed_snapshot() {
        let store = SnapshotStore::new();
        let snapshot = store.current();

        assert!(snapshot.repositories().is_empty());
        assert!(snapshot.refreshed_at().is_none());
    }

    #[test]
    fn publish_replaces_snapshot_for_later_reads_only() {
        let store = SnapshotStore::new();
        store.publish(FeedSnapshot::new(vec![repository("pack")], at_minute(0)));
        let held = store.current();

        store.publish(FeedSnapshot::new(vec![repository("lifecycle")], at_minute(5)));

        assert!(held.repository("pack").is_some(), "held snapshot must not change");
        let latest = store.current();
        assert!(latest.repository("pack").is_none());
        assert!(latest.repository("lifecycle").is_some());
        assert_eq!(latest.refreshed_at(), Some(at_minute(5)));
    }

    #[test]
    fn cloned_handles_share_one_slot() {
        let store = SnapshotStore::new();
        let reader = store.clone();

        store.publish(FeedSnapshot::new(vec![repository("pack")], at_minute(1)));

        assert!(Arc::ptr_eq(&store.current(), &reader.current()));
    }

    #[test]
    fn side_table_lookups_resolve_by_issue_number() {
        let snapshot = repository("pack");
        let known = IssueNumber::new(5);
        let unknown = IssueNumber::new(6);

        assert!(snapshot.is_draft(known));
        assert_eq!(snapshot.check_runs_for(known).len(), 1);
        assert!(snapshot.comments_for(known).is_empty());
        assert!(snapshot.reactions_for(known).is_some());
        assert!(!snapshot.is_draft(unknown));
        assert!(snapshot.check_runs_for(unknown).is_empty());
        assert!(snapshot.reactions_for(unknown).is_none());
    }
}
