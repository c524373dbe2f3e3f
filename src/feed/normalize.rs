//! Normalisation of heterogeneous discussion records into one comment shape.

use chrono::{DateTime, Utc};

use crate::github::models::{IssueComment, Review, ReviewComment};

/// A discussion entry as shown in the feed, regardless of where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Author login.
    pub author: String,
    /// Markdown body.
    pub body: String,
    /// HTML URL of the entry.
    pub html_url: String,
    /// Creation time; submission time for reviews.
    pub created_at: DateTime<Utc>,
}

/// One record from any of the three discussion sources of an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscussionRecord {
    /// Plain issue or pull request comment.
    Comment(IssueComment),
    /// Pull request diff review comment.
    ReviewComment(ReviewComment),
    /// Pull request review summary.
    Review(Review),
}

impl DiscussionRecord {
    /// Converts the record into a [`Comment`], or `None` when it should not
    /// be shown.
    ///
    /// Reviews are skipped when their body is blank, since their text lives in
    /// the attached review comments, and when they have not been submitted.
    #[must_use]
    pub fn normalize(self) -> Option<Comment> {
        match self {
            Self::Comment(comment) => Some(Comment {
                author: comment.author,
                body: comment.body,
                html_url: comment.html_url,
                created_at: comment.created_at,
            }),
            Self::ReviewComment(comment) => Some(Comment {
                author: comment.author,
                body: comment.body,
                html_url: comment.html_url,
                created_at: comment.created_at,
            }),
            Self::Review(review) => {
                if review.body.trim().is_empty() {
                    return None;
                }
                let submitted_at = review.submitted_at?;
                Some(Comment {
                    author: review.author,
                    body: review.body,
                    html_url: review.html_url,
                    created_at: submitted_at,
                })
            }
        }
    }
}

impl From<IssueComment> for DiscussionRecord {
    fn from(value: IssueComment) -> Self {
        Self::Comment(value)
    }
}

impl From<ReviewComment> for DiscussionRecord {
    fn from(value: ReviewComment) -> Self {
        Self::ReviewComment(value)
    }
}

impl From<Review> for DiscussionRecord {
    fn from(value: Review) -> Self {
        Self::Review(value)
    }
}
