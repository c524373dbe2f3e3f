//! Open issue listing for a single repository.

use octocrab::{Octocrab, Page};

use crate::github::locator::RepositoryLocator;
use crate::github::models::{ApiIssue, Issue};

use super::types::ListIssuesParams;

/// Fetches the first page of open issues in the requested order.
///
/// GitHub's issue listing includes pull requests; they are kept and flagged
/// through the `pull_request` marker.
pub(super) async fn fetch_open_issues(
    client: &Octocrab,
    locator: &RepositoryLocator,
    params: &ListIssuesParams,
) -> Result<Vec<Issue>, octocrab::Error> {
    let per_page = params.per_page.to_string();
    let query_params = [
        ("state", "open"),
        ("sort", ListIssuesParams::SORT),
        ("direction", ListIssuesParams::DIRECTION),
        ("page", "1"),
        ("per_page", per_page.as_str()),
    ];

    let page: Page<ApiIssue> = client
        .get(locator.issues_path(), Some(&query_params))
        .await?;

    Ok(page.items.into_iter().map(ApiIssue::into).collect())
}
