//! Topic names for review lifecycle events

use std::fmt;

use crate::db::ReviewKind;

/// Lifecycle step a review event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewChange {
    Added,
    Updated,
    Deleted,
}

/// Broadcast channel name. Each topic carries exactly one payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    BookReviewAdded,
    BookReviewUpdated,
    BookReviewDeleted,
    AuthorReviewAdded,
    AuthorReviewUpdated,
    AuthorReviewDeleted,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::BookReviewAdded,
        Topic::BookReviewUpdated,
        Topic::BookReviewDeleted,
        Topic::AuthorReviewAdded,
        Topic::AuthorReviewUpdated,
        Topic::AuthorReviewDeleted,
    ];

    /// Topic for a change to a review of the given kind
    pub fn for_review(kind: ReviewKind, change: ReviewChange) -> Self {
        match (kind, change) {
            (ReviewKind::Book, ReviewChange::Added) => Topic::BookReviewAdded,
            (ReviewKind::Book, ReviewChange::Updated) => Topic::BookReviewUpdated,
            (ReviewKind::Book, ReviewChange::Deleted) => Topic::BookReviewDeleted,
            (ReviewKind::Author, ReviewChange::Added) => Topic::AuthorReviewAdded,
            (ReviewKind::Author, ReviewChange::Updated) => Topic::AuthorReviewUpdated,
            (ReviewKind::Author, ReviewChange::Deleted) => Topic::AuthorReviewDeleted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::BookReviewAdded => "BOOK_REVIEW_ADDED",
            Topic::BookReviewUpdated => "BOOK_REVIEW_UPDATED",
            Topic::BookReviewDeleted => "BOOK_REVIEW_DELETED",
            Topic::AuthorReviewAdded => "AUTHOR_REVIEW_ADDED",
            Topic::AuthorReviewUpdated => "AUTHOR_REVIEW_UPDATED",
            Topic::AuthorReviewDeleted => "AUTHOR_REVIEW_DELETED",
        }
    }

    /// GraphQL subscription field that streams this topic
    pub fn subscription_name(&self) -> &'static str {
        match self {
            Topic::BookReviewAdded => "bookReviewAdded",
            Topic::BookReviewUpdated => "bookReviewUpdated",
            Topic::BookReviewDeleted => "bookReviewDeleted",
            Topic::AuthorReviewAdded => "authorReviewAdded",
            Topic::AuthorReviewUpdated => "authorReviewUpdated",
            Topic::AuthorReviewDeleted => "authorReviewDeleted",
        }
    }

    pub fn from_subscription_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.subscription_name() == name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_subscription_names_map_back_to_topics() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_subscription_name(topic.subscription_name()), Some(topic));
        }
        assert_eq!(Topic::BookReviewAdded.to_string(), "BOOK_REVIEW_ADDED");
        assert_eq!(Topic::from_subscription_name("reviewAdded"), None);
    }

    #[test]
    fn test_every_kind_and_change_has_a_distinct_topic() {
        let mut seen = HashSet::new();
        for kind in [ReviewKind::Book, ReviewKind::Author] {
            for change in [ReviewChange::Added, ReviewChange::Updated, ReviewChange::Deleted] {
                assert!(seen.insert(Topic::for_review(kind, change)));
            }
        }
        assert_eq!(seen.len(), Topic::ALL.len());
    }
}
