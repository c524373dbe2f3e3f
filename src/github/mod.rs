//! GitHub access for the feed.
//!
//! This module wraps Octocrab to list open issues, read their discussion
//! (issue comments, review comments, and reviews), and look up pull request
//! CI status. Errors are mapped into [`FetchError`] variants so that the
//! refresh pipeline can log precise failures without exposing Octocrab
//! internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use error::FetchError;
pub use gateway::{IssueGateway, ListIssuesParams, OctocrabGateway};
pub use locator::{
    IssueNumber, PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{
    Author, CheckRun, Issue, IssueComment, PullRequestHead, Reactions, Review, ReviewComment,
};

#[cfg(test)]
pub use gateway::MockIssueGateway;
