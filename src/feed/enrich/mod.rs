//! Per-issue enrichment: recent discussion, draft flag, and CI status.

use std::collections::BTreeMap;

use crate::github::error::FetchError;
use crate::github::gateway::IssueGateway;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{CheckRun, Issue};

use super::normalize::{Comment, DiscussionRecord};

/// Check runs sharing one check suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSuiteGroup {
    /// Check suite identifier.
    pub suite_id: u64,
    /// Runs of the suite, in API order. Never empty.
    pub runs: Vec<CheckRun>,
}

/// Everything attached to a bare issue during a refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueEnrichment {
    /// Most recent comments across all discussion sources, newest first.
    pub comments: Vec<Comment>,
    /// Check runs of the pull request head, grouped by ascending suite id.
    pub check_runs: Vec<CheckSuiteGroup>,
    /// Whether the pull request is a draft; always false for plain issues.
    pub is_draft: bool,
}

/// Keeps the `limit` newest comments from `records`, newest first.
///
/// Records the normaliser rejects are dropped before ranking. Entries with
/// equal timestamps keep their relative input order.
#[must_use]
pub fn most_recent_comments<I>(records: I, limit: usize) -> Vec<Comment>
where
    I: IntoIterator<Item = DiscussionRecord>,
{
    let mut comments: Vec<Comment> = records
        .into_iter()
        .filter_map(DiscussionRecord::normalize)
        .collect();
    comments.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    comments.truncate(limit);
    comments
}

/// Groups check runs by suite id, ascending. Runs of a repeated suite id join
/// the existing group in encounter order.
#[must_use]
pub fn group_check_runs<I>(runs: I) -> Vec<CheckSuiteGroup>
where
    I: IntoIterator<Item = CheckRun>,
{
    let mut suites: BTreeMap<u64, Vec<CheckRun>> = BTreeMap::new();
    for run in runs {
        suites.entry(run.suite_id).or_default().push(run);
    }
    suites
        .into_iter()
        .map(|(suite_id, runs)| CheckSuiteGroup { suite_id, runs })
        .collect()
}

/// Attaches discussion and CI data to single issues using a gateway.
pub struct IssueEnricher<'client, Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    client: &'client Gateway,
    comments_per_issue: usize,
}

impl<'client, Gateway> IssueEnricher<'client, Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    /// Creates an enricher keeping at most `comments_per_issue` comments.
    #[must_use]
    pub const fn new(client: &'client Gateway, comments_per_issue: usize) -> Self {
        Self {
            client,
            comments_per_issue,
        }
    }

    /// Loads discussion for `issue` and, for pull requests, review activity,
    /// draft state, and head commit check runs.
    ///
    /// # Errors
    ///
    /// Returns the first gateway failure; no partial enrichment is produced.
    pub async fn enrich(
        &self,
        locator: &RepositoryLocator,
        issue: &Issue,
    ) -> Result<IssueEnrichment, FetchError> {
        let comments = self
            .client
            .list_issue_comments(locator, issue.number)
            .await?;
        let mut records: Vec<DiscussionRecord> =
            comments.into_iter().map(DiscussionRecord::from).collect();

        if !issue.is_pull_request {
            return Ok(IssueEnrichment {
                comments: most_recent_comments(records, self.comments_per_issue),
                ..IssueEnrichment::default()
            });
        }

        let (review_comments, reviews, head) = tokio::try_join!(
            self.client.list_review_comments(locator, issue.number),
            self.client.list_reviews(locator, issue.number),
            self.client.pull_request_head(locator, issue.number),
        )?;
        records.extend(review_comments.into_iter().map(DiscussionRecord::from));
        records.extend(reviews.into_iter().map(DiscussionRecord::from));

        let check_runs = if head.head_sha.is_empty() {
            Vec::new()
        } else {
            group_check_runs(self.client.list_check_runs(locator, &head.head_sha).await?)
        };

        Ok(IssueEnrichment {
            comments: most_recent_comments(records, self.comments_per_issue),
            check_runs,
            is_draft: head.draft,
        })
    }
}
