//! Gateways for loading issues and discussion through Octocrab.
//!
//! [`IssueGateway`] is the whole upstream capability the feed depends on.
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests, pagination, and error mapping.

mod client;
mod discussion;
mod error_mapping;
mod issues;
mod octocrab_gateway;
mod pull_request;
mod types;

pub use octocrab_gateway::OctocrabGateway;
pub use types::ListIssuesParams;

use async_trait::async_trait;

use crate::github::error::FetchError;
use crate::github::locator::{IssueNumber, RepositoryLocator};
use crate::github::models::{
    CheckRun, Issue, IssueComment, PullRequestHead, Review, ReviewComment,
};

/// Read-only access to the GitHub data backing the feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// List one page of open issues and pull requests for the repository, in
    /// the order GitHub returns them.
    async fn list_open_issues(
        &self,
        locator: &RepositoryLocator,
        params: &ListIssuesParams,
    ) -> Result<Vec<Issue>, FetchError>;

    /// Fetch all plain comments on an issue or pull request.
    async fn list_issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<Vec<IssueComment>, FetchError>;

    /// Fetch all diff review comments on a pull request.
    async fn list_review_comments(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<Vec<ReviewComment>, FetchError>;

    /// Fetch all reviews on a pull request.
    async fn list_reviews(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<Vec<Review>, FetchError>;

    /// Fetch the draft flag and head commit of a pull request.
    async fn pull_request_head(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<PullRequestHead, FetchError>;

    /// Fetch all check runs reported against a commit SHA, branch, or tag.
    async fn list_check_runs(
        &self,
        locator: &RepositoryLocator,
        git_ref: &str,
    ) -> Result<Vec<CheckRun>, FetchError>;
}
