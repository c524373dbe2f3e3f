//! Quota window attached to rate-limited failures.
//!
//! When a call is rejected because the token's quota is spent, the gateway
//! asks `/rate_limit` for the current window so the refresh log can say when
//! the next cycle is likely to succeed.

use chrono::{DateTime, Utc};

/// Request quota reported by the GitHub API.
///
/// # Example
///
/// ```
/// use issue_feed::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::from_epoch(5000, 0, 1_700_000_000).expect("valid reset");
/// assert_eq!(info.remaining(), 0);
/// assert_eq!(info.resets_at().timestamp(), 1_700_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    limit: u32,
    remaining: u32,
    resets_at: DateTime<Utc>,
}

impl RateLimitInfo {
    /// Builds the window from GitHub's Unix-seconds reset field.
    ///
    /// Returns `None` when the reset time is out of range.
    #[must_use]
    pub fn from_epoch(limit: u32, remaining: u32, reset_epoch_seconds: u64) -> Option<Self> {
        let seconds = i64::try_from(reset_epoch_seconds).ok()?;
        let resets_at = DateTime::from_timestamp(seconds, 0)?;
        Some(Self {
            limit,
            remaining,
            resets_at,
        })
    }

    /// Requests allowed per window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Requests left in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// When the window resets.
    #[must_use]
    pub const fn resets_at(&self) -> DateTime<Utc> {
        self.resets_at
    }
}
