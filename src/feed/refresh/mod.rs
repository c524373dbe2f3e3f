//! Periodic refresh: fetch every configured repository and publish one
//! snapshot per cycle.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::github::error::FetchError;
use crate::github::gateway::IssueGateway;
use crate::github::locator::{RepositoryLocator, RepositoryName};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::fan_out::fan_out;
use super::repository::RepositoryFetcher;
use super::settings::FetchSettings;
use super::snapshot::{FeedSnapshot, SnapshotStore};

/// Shortest interval the refresh loop accepts.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// A repository left out of a cycle because its issue listing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFailure {
    /// Repository that was dropped.
    pub repository: RepositoryName,
    /// Listing failure.
    pub error: FetchError,
}

/// Outcome of one completed refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    /// Repositories in the published snapshot, in configured order.
    pub published_repositories: Vec<RepositoryName>,
    /// Repositories dropped from the published snapshot.
    pub failed_repositories: Vec<RepositoryFailure>,
    /// Issues dropped across all published repositories.
    pub dropped_issues: usize,
    /// Time taken by the cycle.
    pub duration: Duration,
}

/// Drives refresh cycles and publishes their snapshots.
pub struct RefreshOrchestrator<Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    gateway: Arc<Gateway>,
    repositories: Vec<RepositoryLocator>,
    settings: FetchSettings,
    store: SnapshotStore,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<Gateway> RefreshOrchestrator<Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    /// Creates an orchestrator for `repositories`, publishing into `store`.
    ///
    /// Published snapshots list repositories in the order given here.
    #[must_use]
    pub fn new(
        gateway: Arc<Gateway>,
        repositories: Vec<RepositoryLocator>,
        settings: FetchSettings,
        store: SnapshotStore,
    ) -> Self {
        Self {
            gateway,
            repositories,
            settings,
            store,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Runs one full cycle and publishes its snapshot.
    ///
    /// Every repository is fetched concurrently. Repositories whose listing
    /// fails are omitted; the rest keep configured order regardless of which
    /// finished first. The snapshot is published even when every repository
    /// failed.
    pub async fn refresh_once(&self) -> RefreshReport {
        let started = Instant::now();
        let fetcher = RepositoryFetcher::new(self.gateway.as_ref(), self.settings);
        let units: Vec<_> = self
            .repositories
            .iter()
            .map(|locator| fetcher.fetch(locator))
            .collect();
        let outcomes = fan_out(units, self.settings.concurrency).await;

        let mut snapshots = Vec::with_capacity(self.repositories.len());
        let mut failed_repositories = Vec::new();
        let mut dropped_issues = 0;
        for (locator, outcome) in self.repositories.iter().zip(outcomes) {
            match outcome {
                Ok(fetch) => {
                    dropped_issues += fetch.failures.len();
                    snapshots.push(fetch.snapshot);
                }
                Err(error) => {
                    warn!(repository = %locator, "dropping repository from this refresh: {error}");
                    failed_repositories.push(RepositoryFailure {
                        repository: locator.repository().clone(),
                        error,
                    });
                }
            }
        }

        let published_repositories: Vec<RepositoryName> = snapshots
            .iter()
            .map(|snapshot| snapshot.repository().clone())
            .collect();
        self.store.publish(FeedSnapshot::new(snapshots, Utc::now()));

        let report = RefreshReport {
            published_repositories,
            failed_repositories,
            dropped_issues,
            duration: started.elapsed(),
        };
        info!(
            published = report.published_repositories.len(),
            failed = report.failed_repositories.len(),
            dropped_issues = report.dropped_issues,
            duration_ms = duration_millis(report.duration),
            "refresh cycle completed"
        );
        self.telemetry.record(refresh_event(&report));
        report
    }

    /// Refreshes immediately, then once per `interval`, until `shutdown`
    /// resolves.
    ///
    /// Cycles never overlap: a cycle that overruns the interval delays the
    /// next tick. A cycle still in flight when `shutdown` resolves is
    /// abandoned and publishes nothing.
    pub async fn run<Shutdown>(&self, interval: Duration, shutdown: Shutdown)
    where
        Shutdown: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(interval.max(MIN_REFRESH_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("shutdown requested; abandoning in-flight refresh");
                    break;
                }
                _ = self.refresh_once() => {}
            }
        }

        info!("refresh loop stopped");
    }
}

fn refresh_event(report: &RefreshReport) -> TelemetryEvent {
    TelemetryEvent::RefreshCompleted {
        published_repositories: report
            .published_repositories
            .iter()
            .map(ToString::to_string)
            .collect(),
        dropped_repositories: report
            .failed_repositories
            .iter()
            .map(|failure| failure.repository.to_string())
            .collect(),
        dropped_issues: report.dropped_issues,
        duration_ms: duration_millis(report.duration),
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
