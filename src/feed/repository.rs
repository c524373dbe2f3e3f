//! Per-repository fetch: list open issues, then enrich each concurrently.

use tracing::{debug, warn};

use crate::github::error::FetchError;
use crate::github::gateway::{IssueGateway, ListIssuesParams};
use crate::github::locator::{IssueNumber, RepositoryLocator};

use super::enrich::IssueEnricher;
use super::fan_out::fan_out;
use super::settings::FetchSettings;
use super::snapshot::{EnrichedIssue, RepositorySnapshot};

/// An issue left out of a repository snapshot because enrichment failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFailure {
    /// Issue that was dropped.
    pub number: IssueNumber,
    /// Why its enrichment failed.
    pub error: FetchError,
}

/// Result of fetching one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFetch {
    /// Issues whose enrichment succeeded, in listing order.
    pub snapshot: RepositorySnapshot,
    /// Issues dropped from this cycle.
    pub failures: Vec<IssueFailure>,
}

/// Builds repository snapshots using a gateway.
pub struct RepositoryFetcher<'client, Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    client: &'client Gateway,
    settings: FetchSettings,
}

impl<'client, Gateway> RepositoryFetcher<'client, Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    /// Creates a fetcher applying `settings` to every repository.
    #[must_use]
    pub const fn new(client: &'client Gateway, settings: FetchSettings) -> Self {
        Self { client, settings }
    }

    /// Lists the repository's most recently updated open issues and enriches
    /// all of them concurrently.
    ///
    /// A failed enrichment drops only that issue; its siblings are still
    /// returned in listing order.
    ///
    /// # Errors
    ///
    /// Returns the listing failure when the open issues cannot be listed.
    pub async fn fetch(&self, locator: &RepositoryLocator) -> Result<RepositoryFetch, FetchError> {
        let params = ListIssuesParams::most_recently_updated(self.settings.issues_per_repository);
        let issues = self.client.list_open_issues(locator, &params).await?;
        debug!(repository = %locator, issues = issues.len(), "listed open issues");

        let enricher = IssueEnricher::new(self.client, self.settings.comments_per_issue);
        let units: Vec<_> = issues
            .iter()
            .map(|issue| enricher.enrich(locator, issue))
            .collect();
        let outcomes = fan_out(units, self.settings.concurrency).await;

        let mut enriched = Vec::with_capacity(issues.len());
        let mut failures = Vec::new();
        for (issue, outcome) in issues.into_iter().zip(outcomes) {
            match outcome {
                Ok(enrichment) => enriched.push(EnrichedIssue { issue, enrichment }),
                Err(error) => {
                    warn!(
                        repository = %locator,
                        issue = %issue.number,
                        "dropping issue from this refresh: {error}"
                    );
                    failures.push(IssueFailure {
                        number: issue.number,
                        error,
                    });
                }
            }
        }

        Ok(RepositoryFetch {
            snapshot: RepositorySnapshot::new(locator.repository().clone(), enriched),
            failures,
        })
    }
}
