//! Discussion fetching helpers: issue comments, review comments, and reviews.
//!
//! Every source is read to the last page so the feed can pick the most recent
//! entries across all of them.

use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;

use crate::github::locator::{IssueNumber, RepositoryLocator};
use crate::github::models::{ApiComment, ApiReview, IssueComment, Review, ReviewComment};

use super::types::MAX_PER_PAGE;

async fn fetch_all<T: DeserializeOwned>(
    client: &Octocrab,
    path: String,
) -> Result<Vec<T>, octocrab::Error> {
    let per_page = MAX_PER_PAGE.to_string();
    let page: Page<T> = client
        .get(path, Some(&[("per_page", per_page.as_str())]))
        .await?;
    client.all_pages(page).await
}

pub(super) async fn fetch_issue_comments(
    client: &Octocrab,
    locator: &RepositoryLocator,
    number: IssueNumber,
) -> Result<Vec<IssueComment>, octocrab::Error> {
    let comments: Vec<ApiComment> =
        fetch_all(client, locator.issue_comments_path(number)).await?;
    Ok(comments.into_iter().map(Into::into).collect())
}

pub(super) async fn fetch_review_comments(
    client: &Octocrab,
    locator: &RepositoryLocator,
    number: IssueNumber,
) -> Result<Vec<ReviewComment>, octocrab::Error> {
    let comments: Vec<ApiComment> =
        fetch_all(client, locator.review_comments_path(number)).await?;
    Ok(comments.into_iter().map(Into::into).collect())
}

pub(super) async fn fetch_reviews(
    client: &Octocrab,
    locator: &RepositoryLocator,
    number: IssueNumber,
) -> Result<Vec<Review>, octocrab::Error> {
    let reviews: Vec<ApiReview> = fetch_all(client, locator.reviews_path(number)).await?;
    Ok(reviews.into_iter().map(ApiReview::into).collect())
}
