//! Identity wrappers and API path construction for watched repositories.

use std::fmt;

use url::Url;

use super::error::FetchError;

/// Public GitHub API endpoint used when no override is configured.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates and wraps an owner (user or organisation) login.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidRepository` when the value is blank or
    /// contains a path separator.
    pub fn new(value: &str) -> Result<Self, FetchError> {
        validate_segment(value).map(Self)
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates and wraps a repository name.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidRepository` when the value is blank or
    /// contains a path separator.
    pub fn new(value: &str) -> Result<Self, FetchError> {
        validate_segment(value).map(Self)
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn validate_segment(value: &str) -> Result<String, FetchError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(FetchError::InvalidRepository {
            value: value.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

/// Issue (or pull request) number, unique within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Wraps a raw issue number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, FetchError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FetchError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Parses and normalises an API base URL, dropping any trailing slash.
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` when the value is not an absolute URL.
pub fn parse_api_base(value: &str) -> Result<Url, FetchError> {
    let mut parsed =
        Url::parse(value.trim()).map_err(|error| FetchError::InvalidUrl(error.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl(format!(
            "{value} cannot be used as an API base"
        )));
    }
    let trimmed_path = parsed.path().trim_end_matches('/').to_owned();
    parsed.set_path(&trimmed_path);
    Ok(parsed)
}

/// A watched repository: owner, name, and the API base serving it.
///
/// # Example
///
/// ```
/// use issue_feed::github::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_owner_repo("buildpacks", "pack")
///     .expect("should build locator");
/// assert_eq!(locator.repository().as_str(), "pack");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for a repository hosted on `github.com`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidRepository` when owner or repo is blank.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, FetchError> {
        let api_base = parse_api_base(DEFAULT_API_BASE)?;
        Self::with_api_base(api_base, owner, repo)
    }

    /// Creates a locator against an explicit API base (GitHub Enterprise or a
    /// test server).
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidRepository` when owner or repo is blank.
    pub fn with_api_base(api_base: Url, owner: &str, repo: &str) -> Result<Self, FetchError> {
        Ok(Self {
            api_base,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// API base URL serving this repository.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    fn repo_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn issues_path(&self) -> String {
        format!("{}/issues", self.repo_path())
    }

    pub(crate) fn issue_comments_path(&self, number: IssueNumber) -> String {
        format!("{}/issues/{}/comments", self.repo_path(), number.get())
    }

    pub(crate) fn pull_request_path(&self, number: IssueNumber) -> String {
        format!("{}/pulls/{}", self.repo_path(), number.get())
    }

    pub(crate) fn review_comments_path(&self, number: IssueNumber) -> String {
        format!("{}/comments", self.pull_request_path(number))
    }

    pub(crate) fn reviews_path(&self, number: IssueNumber) -> String {
        format!("{}/reviews", self.pull_request_path(number))
    }

    pub(crate) fn check_runs_path(&self, git_ref: &str) -> String {
        format!("{}/commits/{git_ref}/check-runs", self.repo_path())
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
