//! Presentation shape of a snapshot, as served to the web front end.
//!
//! Recency flags and humanised timestamps depend on the moment of the read,
//! so they are computed here from a caller-supplied `now` rather than stored
//! on the snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::github::models::{CheckRun, Reactions};

use super::enrich::CheckSuiteGroup;
use super::humanize::relative_time;
use super::normalize::Comment;
use super::snapshot::{EnrichedIssue, FeedSnapshot, RepositorySnapshot};

/// Issues created within this window are flagged as recent.
pub const ISSUE_RECENCY_WINDOW: Duration = Duration::hours(48);

/// Comments created within this window are flagged as recent.
pub const COMMENT_RECENCY_WINDOW: Duration = Duration::hours(24);

/// One repository and its issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryView {
    /// Repository name.
    pub repo: String,
    /// Issues in upstream listing order.
    pub issues: Vec<IssueView>,
}

/// One issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueView {
    /// Issue number.
    pub number: u64,
    /// HTML URL.
    pub url: String,
    /// Title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Author login.
    pub user: String,
    /// Author avatar URL.
    pub user_avatar_url: String,
    /// Whether this is a pull request.
    pub is_pr: bool,
    /// Whether this is a draft pull request.
    pub is_draft: bool,
    /// Whether the issue was created within [`ISSUE_RECENCY_WINDOW`].
    pub is_recent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Creation time relative to the read, e.g. "3 hours ago".
    pub created_at_humanized: String,
    /// Reaction counts.
    pub reactions: ReactionsView,
    /// Most recent comments, newest first.
    pub comments: Vec<CommentView>,
    /// Check runs grouped by suite, ascending suite id.
    pub check_runs: Vec<CheckSuiteView>,
}

/// Reaction counts keyed the way GitHub names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionsView {
    /// Sum of all reactions.
    pub total_count: u64,
    /// `+1` reactions.
    #[serde(rename = "+1")]
    pub plus_one: u64,
    /// `-1` reactions.
    #[serde(rename = "-1")]
    pub minus_one: u64,
    /// `laugh` reactions.
    pub laugh: u64,
    /// `confused` reactions.
    pub confused: u64,
    /// `heart` reactions.
    pub heart: u64,
    /// `hooray` reactions.
    pub hooray: u64,
    /// `rocket` reactions.
    pub rocket: u64,
    /// `eyes` reactions.
    pub eyes: u64,
}

/// One discussion entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Author login.
    pub user: String,
    /// Markdown body.
    pub body: String,
    /// HTML URL.
    pub url: String,
    /// Whether the comment was created within [`COMMENT_RECENCY_WINDOW`].
    pub is_recent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Creation time relative to the read.
    pub created_at_humanized: String,
}

/// Check runs of one suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSuiteView {
    /// Check suite identifier.
    pub id: u64,
    /// Runs of the suite.
    pub runs: Vec<CheckRunView>,
}

/// One check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunView {
    /// Check run identifier.
    pub id: u64,
    /// Run status.
    pub status: String,
    /// Run conclusion; empty while the run is in progress.
    pub conclusion: String,
}

impl From<Reactions> for ReactionsView {
    fn from(value: Reactions) -> Self {
        Self {
            total_count: value.total_count,
            plus_one: value.plus_one,
            minus_one: value.minus_one,
            laugh: value.laugh,
            confused: value.confused,
            heart: value.heart,
            hooray: value.hooray,
            rocket: value.rocket,
            eyes: value.eyes,
        }
    }
}

impl From<&CheckRun> for CheckRunView {
    fn from(value: &CheckRun) -> Self {
        Self {
            id: value.run_id,
            status: value.status.clone(),
            conclusion: value.conclusion.clone(),
        }
    }
}

impl From<&CheckSuiteGroup> for CheckSuiteView {
    fn from(value: &CheckSuiteGroup) -> Self {
        Self {
            id: value.suite_id,
            runs: value.runs.iter().map(CheckRunView::from).collect(),
        }
    }
}

/// Projects `snapshot` into its presentation shape as seen at `now`.
///
/// An unrefreshed snapshot projects to an empty list.
#[must_use]
pub fn project(snapshot: &FeedSnapshot, now: DateTime<Utc>) -> Vec<RepositoryView> {
    snapshot
        .repositories()
        .iter()
        .map(|repository| project_repository(repository, now))
        .collect()
}

fn project_repository(repository: &RepositorySnapshot, now: DateTime<Utc>) -> RepositoryView {
    RepositoryView {
        repo: repository.repository().to_string(),
        issues: repository
            .issues()
            .iter()
            .map(|entry| project_issue(entry, now))
            .collect(),
    }
}

fn project_issue(entry: &EnrichedIssue, now: DateTime<Utc>) -> IssueView {
    let issue = &entry.issue;
    IssueView {
        number: issue.number.get(),
        url: issue.html_url.clone(),
        title: issue.title.clone(),
        body: issue.body.clone(),
        user: issue.author.login.clone(),
        user_avatar_url: issue.author.avatar_url.clone(),
        is_pr: issue.is_pull_request,
        is_draft: entry.enrichment.is_draft,
        is_recent: is_within(issue.created_at, ISSUE_RECENCY_WINDOW, now),
        created_at: issue.created_at,
        created_at_humanized: relative_time(issue.created_at, now),
        reactions: ReactionsView::from(issue.reactions),
        comments: entry
            .enrichment
            .comments
            .iter()
            .map(|comment| project_comment(comment, now))
            .collect(),
        check_runs: entry
            .enrichment
            .check_runs
            .iter()
            .map(CheckSuiteView::from)
            .collect(),
    }
}

fn project_comment(comment: &Comment, now: DateTime<Utc>) -> CommentView {
    CommentView {
        user: comment.author.clone(),
        body: comment.body.clone(),
        url: comment.html_url.clone(),
        is_recent: is_within(comment.created_at, COMMENT_RECENCY_WINDOW, now),
        created_at: comment.created_at,
        created_at_humanized: relative_time(comment.created_at, now),
    }
}

/// True when `instant` is strictly after `now - window`.
fn is_within(instant: DateTime<Utc>, window: Duration, now: DateTime<Utc>) -> bool {
    instant > now - window
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::{is_within, project, COMMENT_RECENCY_WINDOW, ISSUE_RECENCY_WINDOW};
    use crate::feed::enrich::{IssueEnrichment, group_check_runs, most_recent_comments};
    use crate::feed::normalize::DiscussionRecord;
    use crate::feed::snapshot::{EnrichedIssue, FeedSnapshot, RepositorySnapshot};
    use crate::github::locator::RepositoryName;
    use crate::github::models::test_support::{at_minute, check_run, issue_comment, pull_request};

    fn snapshot() -> FeedSnapshot {
        let mut pr = pull_request(42, "Add SBOM support");
        pr.reactions.plus_one = 3;
        pr.reactions.total_count = 3;
        let enrichment = IssueEnrichment {
            comments: most_recent_comments(
                vec![DiscussionRecord::from(issue_comment(1, "alice", at_minute(0)))],
                2,
            ),
            check_runs: group_check_runs(vec![check_run(9, 1)]),
            is_draft: true,
        };
        FeedSnapshot::new(
            vec![RepositorySnapshot::new(
                RepositoryName::new("pack").expect("name should be valid"),
                vec![EnrichedIssue {
                    issue: pr,
                    enrichment,
                }],
            )],
            at_minute(0),
        )
    }

    #[test]
    fn unrefreshed_snapshot_projects_to_empty_array() {
        let view = project(&FeedSnapshot::default(), at_minute(0));

        assert_eq!(
            serde_json::to_value(view).expect("view should serialise"),
            json!([])
        );
    }

    #[test]
    fn projection_emits_the_published_field_names() {
        let now = at_minute(0) + Duration::hours(30);
        let value = serde_json::to_value(project(&snapshot(), now)).expect("view should serialise");

        let repo = &value[0];
        assert_eq!(repo["repo"], "pack");
        let issue = &repo["issues"][0];
        assert_eq!(issue["number"], 42);
        assert_eq!(issue["is_pr"], true);
        assert_eq!(issue["is_draft"], true);
        assert_eq!(issue["is_recent"], true);
        assert_eq!(issue["created_at_humanized"], "1 day ago");
        assert_eq!(issue["reactions"]["+1"], 3);
        assert_eq!(issue["reactions"]["-1"], 0);
        assert_eq!(issue["comments"][0]["user"], "alice");
        assert_eq!(issue["comments"][0]["is_recent"], false);
        assert_eq!(issue["check_runs"][0]["id"], 9);
        assert_eq!(issue["check_runs"][0]["runs"][0]["id"], 1);
        assert_eq!(issue["check_runs"][0]["runs"][0]["conclusion"], "success");
    }

    #[test]
    fn recency_is_recomputed_on_every_projection() {
        let snapshot = snapshot();

        let early = project(&snapshot, at_minute(0) + Duration::hours(1));
        let late = project(&snapshot, at_minute(0) + Duration::hours(49));

        let flag = |view: &[super::RepositoryView]| {
            view.first()
                .and_then(|repo| repo.issues.first())
                .map(|issue| issue.is_recent)
        };
        assert_eq!(flag(&early), Some(true));
        assert_eq!(flag(&late), Some(false));
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let now = at_minute(0);

        assert!(!is_within(now - ISSUE_RECENCY_WINDOW, ISSUE_RECENCY_WINDOW, now));
        assert!(is_within(
            now - COMMENT_RECENCY_WINDOW + Duration::seconds(1),
            COMMENT_RECENCY_WINDOW,
            now
        ));
    }
}
