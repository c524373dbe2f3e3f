//! Test helpers for constructing issue, comment, and check run fixtures.
//!
//! # Examples
//!
//! ```
//! use issue_feed::github::models::test_support::{at_minute, issue_comment};
//!
//! let comment = issue_comment(1, "alice", at_minute(5));
//! assert_eq!(comment.author, "alice");
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{Author, CheckRun, Issue, IssueComment, Reactions, Review, ReviewComment};
use crate::github::locator::IssueNumber;

/// Returns a fixed instant `minute` minutes after 2025-01-01T00:00:00Z.
#[must_use]
pub fn at_minute(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::minutes(minute)
}

/// Constructs a plain issue authored by `octocat`.
#[must_use]
pub fn issue(number: u64, title: &str) -> Issue {
    Issue {
        number: IssueNumber::new(number),
        title: title.to_owned(),
        body: String::new(),
        author: Author {
            login: "octocat".to_owned(),
            avatar_url: "https://avatars.example/octocat".to_owned(),
        },
        created_at: at_minute(0),
        updated_at: None,
        html_url: format!("https://github.com/buildpacks/pack/issues/{number}"),
        is_pull_request: false,
        reactions: Reactions::default(),
    }
}

/// Constructs a pull request issue authored by `octocat`.
#[must_use]
pub fn pull_request(number: u64, title: &str) -> Issue {
    Issue {
        is_pull_request: true,
        html_url: format!("https://github.com/buildpacks/pack/pull/{number}"),
        ..issue(number, title)
    }
}

/// Constructs an issue comment with a body derived from its id.
#[must_use]
pub fn issue_comment(id: u64, author: &str, created_at: DateTime<Utc>) -> IssueComment {
    IssueComment {
        id,
        author: author.to_owned(),
        body: format!("Comment {id}"),
        html_url: format!("https://github.com/buildpacks/pack/issues/1#issuecomment-{id}"),
        created_at,
    }
}

/// Constructs a review comment with a body derived from its id.
#[must_use]
pub fn review_comment(id: u64, author: &str, created_at: DateTime<Utc>) -> ReviewComment {
    ReviewComment {
        id,
        author: author.to_owned(),
        body: format!("Review comment {id}"),
        html_url: format!("https://github.com/buildpacks/pack/pull/1#discussion_r{id}"),
        created_at,
    }
}

/// Constructs a submitted review with the given body.
#[must_use]
pub fn review(id: u64, body: &str, submitted_at: DateTime<Utc>) -> Review {
    Review {
        id,
        author: "reviewer".to_owned(),
        body: body.to_owned(),
        html_url: format!("https://github.com/buildpacks/pack/pull/1#pullrequestreview-{id}"),
        submitted_at: Some(submitted_at),
    }
}

/// Constructs a completed, successful check run.
#[must_use]
pub fn check_run(suite_id: u64, run_id: u64) -> CheckRun {
    CheckRun {
        suite_id,
        run_id,
        status: "completed".to_owned(),
        conclusion: "success".to_owned(),
    }
}
