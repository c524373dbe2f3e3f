//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach and then resolved
//! once into immutable [`FeedSettings`] before the refresh loop starts.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.issue-feed.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `FEED_TOKEN`, `FEED_REPOSITORIES`, and so
//!    on, plus the legacy `GITHUB_TOKEN` and `PORT`
//! 4. **Command-line arguments** – `--token`/`-t`, `--repositories`/`-r`, ...
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! owner = "buildpacks"
//! repositories = "pack,lifecycle,docs"
//! refresh_interval_seconds = 300
//! port = 8080
//! web_root = "web"
//! ```

use std::collections::HashSet;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::feed::settings::{
    DEFAULT_COMMENTS_PER_ISSUE, DEFAULT_ISSUES_PER_REPOSITORY, FetchSettings,
};
use crate::github::error::FetchError;
use crate::github::gateway::ListIssuesParams;
use crate::github::locator::{
    DEFAULT_API_BASE, PersonalAccessToken, RepositoryLocator, parse_api_base,
};

const DEFAULT_OWNER: &str = "buildpacks";
const DEFAULT_REPOSITORIES: &str = "pack,lifecycle,rfcs,spec,docs,imgutil";
const DEFAULT_REFRESH_INTERVAL_SECONDS: u64 = 300;
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_WEB_ROOT: &str = "web";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use issue_feed::FeedConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = FeedConfig::load().expect("failed to load configuration");
/// let settings = config.resolve().expect("configuration should be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "FEED",
    discovery(
        dotfile_name = ".issue-feed.toml",
        config_file_name = "issue-feed.toml",
        app_name = "issue-feed"
    )
)]
pub struct FeedConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `FEED_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Organisation or user owning every watched repository.
    #[ortho_config(cli_short = 'o')]
    pub owner: String,

    /// Comma-separated repository names, in display order.
    ///
    /// Can be provided via:
    /// - CLI: `--repositories pack,lifecycle` or `-r pack,lifecycle`
    /// - Environment: `FEED_REPOSITORIES`
    /// - Config file: `repositories = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repositories: String,

    /// GitHub API base URL; override for GitHub Enterprise.
    #[ortho_config()]
    pub api_base: String,

    /// Open issues listed per repository, between 1 and 100.
    #[ortho_config()]
    pub issues_per_repository: u8,

    /// Most recent comments kept per issue.
    #[ortho_config()]
    pub comments_per_issue: usize,

    /// Seconds between refresh cycles. Must be positive.
    #[ortho_config()]
    pub refresh_interval_seconds: u64,

    /// Maximum concurrent fetches per fan-out level; `0` means unbounded.
    #[ortho_config()]
    pub fetch_concurrency: usize,

    /// HTTP port.
    ///
    /// Can be provided via:
    /// - CLI: `--port <PORT>` or `-p <PORT>`
    /// - Environment: `FEED_PORT` or `PORT` (legacy)
    /// - Config file: `port = 8080`
    #[ortho_config(cli_short = 'p')]
    pub port: Option<u16>,

    /// Address the HTTP listener binds to.
    #[ortho_config()]
    pub bind_address: String,

    /// Directory of static front-end files served at `/`.
    #[ortho_config()]
    pub web_root: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: DEFAULT_OWNER.to_owned(),
            repositories: DEFAULT_REPOSITORIES.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            issues_per_repository: DEFAULT_ISSUES_PER_REPOSITORY,
            comments_per_issue: DEFAULT_COMMENTS_PER_ISSUE,
            refresh_interval_seconds: DEFAULT_REFRESH_INTERVAL_SECONDS,
            fetch_concurrency: 0,
            port: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            web_root: DEFAULT_WEB_ROOT.to_owned(),
        }
    }
}

/// Fully validated settings the service runs with.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// GitHub token.
    pub token: PersonalAccessToken,
    /// GitHub API base URL.
    pub api_base: Url,
    /// Watched repositories, in display order.
    pub repositories: Vec<RepositoryLocator>,
    /// Limits applied to each refresh cycle.
    pub fetch: FetchSettings,
    /// Time between refresh cycles.
    pub refresh_interval: Duration,
    /// HTTP listener address.
    pub listen_address: SocketAddr,
    /// Static file directory.
    pub web_root: Utf8PathBuf,
}

impl FeedConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, FetchError> {
        let token = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(FetchError::MissingToken)?;
        PersonalAccessToken::new(token)
    }

    /// Parses the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] when the value is not an absolute
    /// URL.
    pub fn resolve_api_base(&self) -> Result<Url, FetchError> {
        parse_api_base(&self.api_base)
    }

    /// Builds one locator per configured repository, preserving order.
    ///
    /// Blank entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when the list is empty or names a
    /// repository twice, and [`FetchError::InvalidRepository`] or
    /// [`FetchError::InvalidUrl`] for malformed values.
    pub fn resolve_repositories(&self) -> Result<Vec<RepositoryLocator>, FetchError> {
        let api_base = self.resolve_api_base()?;
        let mut seen = HashSet::new();
        let mut locators = Vec::new();

        for name in self
            .repositories
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            if !seen.insert(name) {
                return Err(FetchError::Configuration {
                    message: format!("repository {name} is listed more than once"),
                });
            }
            locators.push(RepositoryLocator::with_api_base(
                api_base.clone(),
                &self.owner,
                name,
            )?);
        }

        if locators.is_empty() {
            return Err(FetchError::Configuration {
                message: "at least one repository is required (use --repositories or -r)"
                    .to_owned(),
            });
        }
        Ok(locators)
    }

    /// Resolves per-cycle fetch limits.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPagination`] when `issues_per_repository`
    /// is outside 1..=100.
    pub fn fetch_settings(&self) -> Result<FetchSettings, FetchError> {
        ListIssuesParams::most_recently_updated(self.issues_per_repository).validate()?;
        Ok(FetchSettings {
            issues_per_repository: self.issues_per_repository,
            comments_per_issue: self.comments_per_issue,
            concurrency: NonZeroUsize::new(self.fetch_concurrency),
        })
    }

    /// Returns the time between refresh cycles.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when the interval is zero.
    pub fn refresh_interval(&self) -> Result<Duration, FetchError> {
        if self.refresh_interval_seconds == 0 {
            return Err(FetchError::Configuration {
                message: "refresh_interval_seconds must be greater than zero".to_owned(),
            });
        }
        Ok(Duration::from_secs(self.refresh_interval_seconds))
    }

    /// Resolves the HTTP port from configuration, then the legacy `PORT`
    /// environment variable, then the default of 8080.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when `PORT` is not a valid port.
    pub fn resolve_port(&self) -> Result<u16, FetchError> {
        if let Some(port) = self.port {
            return Ok(port);
        }
        env::var("PORT").ok().map_or(Ok(DEFAULT_PORT), |value| {
            value
                .trim()
                .parse()
                .map_err(|error| FetchError::Configuration {
                    message: format!("PORT {value:?} is not a valid port: {error}"),
                })
        })
    }

    /// Resolves the socket address the HTTP server listens on.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when the bind address or port is
    /// invalid.
    pub fn listen_address(&self) -> Result<SocketAddr, FetchError> {
        let ip: IpAddr = self
            .bind_address
            .trim()
            .parse()
            .map_err(|error| FetchError::Configuration {
                message: format!("bind address {:?} is invalid: {error}", self.bind_address),
            })?;
        Ok(SocketAddr::new(ip, self.resolve_port()?))
    }

    /// Validates every value and produces the settings the service runs with.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure.
    pub fn resolve(&self) -> Result<FeedSettings, FetchError> {
        Ok(FeedSettings {
            token: self.resolve_token()?,
            api_base: self.resolve_api_base()?,
            repositories: self.resolve_repositories()?,
            fetch: self.fetch_settings()?,
            refresh_interval: self.refresh_interval()?,
            listen_address: self.listen_address()?,
            web_root: Utf8PathBuf::from(self.web_root.trim()),
        })
    }
}

#[cfg(test)]
mod tests;
