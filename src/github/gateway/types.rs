//! Public parameter types for gateway listing operations.

use crate::github::error::FetchError;

/// Largest page size GitHub accepts.
pub(super) const MAX_PER_PAGE: u8 = 100;

/// Parameters for listing the open issues of a repository.
///
/// Only the first page is requested, most recently updated first; the page
/// size bounds how many issues the feed shows per repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListIssuesParams {
    /// Number of issues to fetch (1..=100).
    pub per_page: u8,
}

impl ListIssuesParams {
    /// `sort` query value.
    pub const SORT: &'static str = "updated";

    /// `direction` query value.
    pub const DIRECTION: &'static str = "desc";

    /// Creates parameters for the most recently updated `per_page` issues.
    #[must_use]
    pub const fn most_recently_updated(per_page: u8) -> Self {
        Self { per_page }
    }

    /// Checks the page size against GitHub's limits.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidPagination` when `per_page` is zero or
    /// larger than 100.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.per_page == 0 {
            return Err(FetchError::InvalidPagination {
                message: "per_page must be at least 1".to_owned(),
            });
        }

        if self.per_page > MAX_PER_PAGE {
            return Err(FetchError::InvalidPagination {
                message: format!("per_page must not exceed {MAX_PER_PAGE}"),
            });
        }

        Ok(())
    }
}

impl Default for ListIssuesParams {
    fn default() -> Self {
        Self::most_recently_updated(5)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ListIssuesParams;
    use crate::github::error::FetchError;

    #[test]
    fn defaults_request_most_recently_updated_first() {
        let params = ListIssuesParams::default();
        assert_eq!(params.per_page, 5);
        assert_eq!(ListIssuesParams::SORT, "updated");
        assert_eq!(ListIssuesParams::DIRECTION, "desc");
    }

    #[rstest]
    #[case::zero(0)]
    #[case::over_maximum(101)]
    fn validate_rejects_out_of_range_page_sizes(#[case] per_page: u8) {
        assert!(matches!(
            ListIssuesParams::most_recently_updated(per_page).validate(),
            Err(FetchError::InvalidPagination { .. })
        ));
    }

    #[rstest]
    #[case::minimum(1)]
    #[case::maximum(100)]
    fn validate_accepts_in_range_page_sizes(#[case] per_page: u8) {
        assert_eq!(
            ListIssuesParams::most_recently_updated(per_page).validate(),
            Ok(())
        );
    }
}
