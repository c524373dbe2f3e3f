//! Pull request head lookup and check run listing.

use octocrab::Octocrab;

use crate::github::locator::{IssueNumber, RepositoryLocator};
use crate::github::models::{
    ApiCheckRun, ApiCheckRunList, ApiPullRequest, CheckRun, PullRequestHead,
};

use super::types::MAX_PER_PAGE;

pub(super) async fn fetch_pull_request_head(
    client: &Octocrab,
    locator: &RepositoryLocator,
    number: IssueNumber,
) -> Result<PullRequestHead, octocrab::Error> {
    client
        .get::<ApiPullRequest, _, _>(locator.pull_request_path(number), None::<&()>)
        .await
        .map(ApiPullRequest::into)
}

/// Fetches every check run for `git_ref`.
///
/// The endpoint wraps runs in a `{ total_count, check_runs }` envelope, so
/// pages are requested until `total_count` runs arrived or a page is empty.
pub(super) async fn fetch_check_runs(
    client: &Octocrab,
    locator: &RepositoryLocator,
    git_ref: &str,
) -> Result<Vec<CheckRun>, octocrab::Error> {
    let per_page = MAX_PER_PAGE.to_string();
    let mut runs: Vec<CheckRun> = Vec::new();
    let mut page: u32 = 1;

    loop {
        let page_number = page.to_string();
        let query_params = [
            ("per_page", per_page.as_str()),
            ("page", page_number.as_str()),
        ];
        let list: ApiCheckRunList = client
            .get(locator.check_runs_path(git_ref), Some(&query_params))
            .await?;

        let received = list.check_runs.len();
        runs.extend(list.check_runs.into_iter().map(ApiCheckRun::into));

        let collected = u64::try_from(runs.len()).unwrap_or(u64::MAX);
        if received == 0 || collected >= list.total_count {
            return Ok(runs);
        }
        page = page.saturating_add(1);
    }
}
