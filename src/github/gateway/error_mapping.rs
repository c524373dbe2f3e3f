//! Maps Octocrab failures onto the [`FetchError`] taxonomy.

use http::StatusCode;

use crate::github::error::FetchError;
use crate::github::rate_limit::RateLimitInfo;

const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit rejection based on
/// the HTTP status and the message or documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Returns the GitHub error payload when the failure is a rate limit rejection.
pub(super) fn rate_limit_source(error: &octocrab::Error) -> Option<&octocrab::GitHubError> {
    match error {
        octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => Some(source),
        _ => None,
    }
}

pub(super) fn map_rate_limit_error(
    operation: &str,
    source: &octocrab::GitHubError,
    rate_limit: Option<RateLimitInfo>,
) -> FetchError {
    let base_message = format!("{operation} failed: {message}", message = source.message);
    FetchError::RateLimitExceeded {
        message: rate_limit_message(base_message, rate_limit.as_ref()),
        rate_limit,
    }
}

/// Appends the remaining quota and reset time when the window is known.
fn rate_limit_message(base_message: String, rate_limit: Option<&RateLimitInfo>) -> String {
    let Some(info) = rate_limit else {
        return base_message;
    };
    format!(
        "{base_message} ({remaining}/{limit} requests left, resets at {reset})",
        remaining = info.remaining(),
        limit = info.limit(),
        reset = info.resets_at().to_rfc3339()
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> FetchError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            FetchError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            FetchError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return FetchError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    FetchError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
