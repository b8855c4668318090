//! Review records for books and authors
//!
//! Book reviews and author reviews share one record shape; the collection they live in
//! decides which parent `parent_id` refers to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collection::Record;

/// Which parent entity a review belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewKind {
    Book,
    Author,
}

impl ReviewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: String,
    pub rating: i32,
    pub content: String,
    /// Id of the reviewed book or author
    #[serde(alias = "book_id", alias = "author_id")]
    pub parent_id: String,
}

impl Record for ReviewRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a review
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub rating: i32,
    pub content: String,
}

/// Input for updating a review. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateReview {
    pub rating: Option<i32>,
    pub content: Option<String>,
}

impl UpdateReview {
    /// Shallow merge over an existing record
    pub fn apply(self, mut record: ReviewRecord) -> ReviewRecord {
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn review() -> ReviewRecord {
        ReviewRecord {
            id: "1".into(),
            rating: 3,
            content: "fine".into(),
            parent_id: "42".into(),
        }
    }

    #[test]
    fn test_apply_overrides_only_present_fields() {
        let edits = UpdateReview {
            rating: Some(5),
            content: None,
        };
        let merged = edits.apply(review());
        assert_eq!(merged.rating, 5);
        assert_eq!(merged.content, "fine");
        assert_eq!(merged.parent_id, "42");
    }

    #[test]
    fn test_empty_edits_are_identity() {
        assert_eq!(UpdateReview::default().apply(review()), review());
    }

    #[test]
    fn test_parent_id_accepts_kind_specific_field_names() {
        let book: ReviewRecord =
            serde_json::from_str(r#"{"id":"1","rating":4,"content":"x","book_id":"2"}"#).unwrap();
        let author: ReviewRecord =
            serde_json::from_str(r#"{"id":"1","rating":4,"content":"x","author_id":"3"}"#)
                .unwrap();
        assert_eq!(book.parent_id, "2");
        assert_eq!(author.parent_id, "3");
    }
}
