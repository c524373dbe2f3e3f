//! Data models representing issues, discussion records, and check runs.
//!
//! Types prefixed with `Api` are internal deserialisation targets mirroring
//! the GitHub REST payloads. They convert into the public domain types, which
//! never carry optional strings: absent values become empty strings, zero
//! counts, or `false` so that downstream code has nothing to dereference.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::locator::IssueNumber;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Author handle and avatar of an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// Login handle.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// Reaction counts attached to an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reactions {
    /// Sum of all reactions.
    pub total_count: u64,
    /// `+1` reactions.
    pub plus_one: u64,
    /// `-1` reactions.
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

/// An open issue or pull request as listed for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Number, unique within the repository.
    pub number: IssueNumber,
    /// Title.
    pub title: String,
    /// Markdown body; empty when GitHub reports none.
    pub body: String,
    /// Opening author.
    pub author: Author,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, when reported.
    pub updated_at: Option<DateTime<Utc>>,
    /// HTML URL for displaying to a user.
    pub html_url: String,
    /// Whether the issue is a pull request.
    pub is_pull_request: bool,
    /// Reaction counts.
    pub reactions: Reactions,
}

/// Plain discussion comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// Author login.
    pub author: String,
    /// Comment body.
    pub body: String,
    /// HTML URL of the comment.
    pub html_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Pull request review comment, attached to a line of the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    /// Comment identifier.
    pub id: u64,
    /// Author login.
    pub author: String,
    /// Comment body.
    pub body: String,
    /// HTML URL of the comment.
    pub html_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Pull request review summary.
///
/// Reviews are timestamped by submission; a pending review has no
/// submission time yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Review identifier.
    pub id: u64,
    /// Reviewer login.
    pub author: String,
    /// Summary body; often empty when the review only carries line comments.
    pub body: String,
    /// HTML URL of the review.
    pub html_url: String,
    /// Submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Pull request fields needed to locate CI results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestHead {
    /// Whether the pull request is a draft.
    pub draft: bool,
    /// Head commit SHA.
    pub head_sha: String,
}

/// A CI check run reported against a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRun {
    /// Identifier of the check suite that owns the run.
    pub suite_id: u64,
    /// Check run identifier.
    pub run_id: u64,
    /// Run status (e.g. `queued`, `completed`); empty when unset.
    pub status: String,
    /// Run conclusion (e.g. `success`); empty when unset.
    pub conclusion: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
    #[serde(default)]
    pub(super) avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ApiReactions {
    #[serde(default)]
    pub(super) total_count: u64,
    #[serde(default, rename = "+1")]
    pub(super) plus_one: u64,
    #[serde(default, rename = "-1")]
    pub(super) minus_one: u64,
    #[serde(default)]
    pub(super) laugh: u64,
    #[serde(default)]
    pub(super) confused: u64,
    #[serde(default)]
    pub(super) heart: u64,
    #[serde(default)]
    pub(super) hooray: u64,
    #[serde(default)]
    pub(super) rocket: u64,
    #[serde(default)]
    pub(super) eyes: u64,
}

/// Marker object present on issues that are pull requests.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestLink {}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssue {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: Option<DateTime<Utc>>,
    pub(super) html_url: Option<String>,
    pub(super) pull_request: Option<ApiPullRequestLink>,
    pub(super) reactions: Option<ApiReactions>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) id: u64,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) html_url: Option<String>,
    pub(super) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiReview {
    pub(super) id: u64,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) html_url: Option<String>,
    pub(super) submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitRef {
    pub(super) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) draft: Option<bool>,
    pub(super) head: ApiCommitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCheckSuiteRef {
    pub(super) id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCheckRun {
    pub(super) id: u64,
    pub(super) status: Option<String>,
    pub(super) conclusion: Option<String>,
    pub(super) check_suite: Option<ApiCheckSuiteRef>,
}

/// Envelope returned by the check-runs endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCheckRunList {
    pub(super) total_count: u64,
    #[serde(default)]
    pub(super) check_runs: Vec<ApiCheckRun>,
}

fn login_of(user: Option<&ApiUser>) -> String {
    user.and_then(|user| user.login.clone()).unwrap_or_default()
}

impl From<ApiReactions> for Reactions {
    fn from(value: ApiReactions) -> Self {
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

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        let author = Author {
            login: login_of(value.user.as_ref()),
            avatar_url: value
                .user
                .and_then(|user| user.avatar_url)
                .unwrap_or_default(),
        };
        Self {
            number: IssueNumber::new(value.number),
            title: value.title.unwrap_or_default(),
            body: value.body.unwrap_or_default(),
            author,
            created_at: value.created_at,
            updated_at: value.updated_at,
            html_url: value.html_url.unwrap_or_default(),
            is_pull_request: value.pull_request.is_some(),
            reactions: value.reactions.unwrap_or_default().into(),
        }
    }
}

impl From<ApiComment> for IssueComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            author: login_of(value.user.as_ref()),
            body: value.body.unwrap_or_default(),
            html_url: value.html_url.unwrap_or_default(),
            created_at: value.created_at,
        }
    }
}

impl From<ApiComment> for ReviewComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            author: login_of(value.user.as_ref()),
            body: value.body.unwrap_or_default(),
            html_url: value.html_url.unwrap_or_default(),
            created_at: value.created_at,
        }
    }
}

impl From<ApiReview> for Review {
    fn from(value: ApiReview) -> Self {
        Self {
            id: value.id,
            author: login_of(value.user.as_ref()),
            body: value.body.unwrap_or_default(),
            html_url: value.html_url.unwrap_or_default(),
            submitted_at: value.submitted_at,
        }
    }
}

impl From<ApiPullRequest> for PullRequestHead {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            draft: value.draft.unwrap_or(false),
            head_sha: value.head.sha,
        }
    }
}

impl From<ApiCheckRun> for CheckRun {
    fn from(value: ApiCheckRun) -> Self {
        Self {
            suite_id: value.check_suite.map_or(0, |suite| suite.id),
            run_id: value.id,
            status: value.status.unwrap_or_default(),
            conclusion: value.conclusion.unwrap_or_default(),
        }
    }
}
