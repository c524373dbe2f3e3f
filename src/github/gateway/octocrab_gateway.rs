//! Octocrab implementation of [`IssueGateway`].

use async_trait::async_trait;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::FetchError;
use crate::github::locator::{IssueNumber, PersonalAccessToken, RepositoryLocator};
use crate::github::models::{
    CheckRun, Issue, IssueComment, PullRequestHead, Review, ReviewComment,
};
use crate::github::rate_limit::RateLimitInfo;

use super::IssueGateway;
use super::client::build_octocrab_client;
use super::discussion::{fetch_issue_comments, fetch_review_comments, fetch_reviews};
use super::error_mapping::{map_octocrab_error, map_rate_limit_error, rate_limit_source};
use super::issues::fetch_open_issues;
use super::pull_request::{fetch_check_runs, fetch_pull_request_head};
use super::types::ListIssuesParams;

/// Octocrab-backed gateway shared by every repository in the feed.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated gateway against `api_base`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` when the base URI cannot be parsed or
    /// `FetchError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &Url) -> Result<Self, FetchError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }

    async fn map_error(&self, operation: &str, error: &octocrab::Error) -> FetchError {
        match rate_limit_source(error) {
            Some(source) => {
                let rate_limit = self.fetch_rate_limit_info().await;
                map_rate_limit_error(operation, source, rate_limit)
            }
            None => map_octocrab_error(operation, error),
        }
    }

    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        RateLimitInfo::from_epoch(limit, remaining, rate.reset)
    }

    async fn finish<T>(
        &self,
        operation: &str,
        result: Result<T, octocrab::Error>,
    ) -> Result<T, FetchError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => Err(self.map_error(operation, &error).await),
        }
    }
}

#[async_trait]
impl IssueGateway for OctocrabGateway {
    async fn list_open_issues(
        &self,
        locator: &RepositoryLocator,
        params: &ListIssuesParams,
    ) -> Result<Vec<Issue>, FetchError> {
        params.validate()?;
        let result = fetch_open_issues(&self.client, locator, params).await;
        self.finish("list issues", result).await
    }

    async fn list_issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<Vec<IssueComment>, FetchError> {
        let result = fetch_issue_comments(&self.client, locator, number).await;
        self.finish("issue comments", result).await
    }

    async fn list_review_comments(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<Vec<ReviewComment>, FetchError> {
        let result = fetch_review_comments(&self.client, locator, number).await;
        self.finish("review comments", result).await
    }

    async fn list_reviews(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<Vec<Review>, FetchError> {
        let result = fetch_reviews(&self.client, locator, number).await;
        self.finish("reviews", result).await
    }

    async fn pull_request_head(
        &self,
        locator: &RepositoryLocator,
        number: IssueNumber,
    ) -> Result<PullRequestHead, FetchError> {
        let result = fetch_pull_request_head(&self.client, locator, number).await;
        self.finish("pull request", result).await
    }

    async fn list_check_runs(
        &self,
        locator: &RepositoryLocator,
        git_ref: &str,
    ) -> Result<Vec<CheckRun>, FetchError> {
        let result = fetch_check_runs(&self.client, locator, git_ref).await;
        self.finish("check runs", result).await
    }
}
