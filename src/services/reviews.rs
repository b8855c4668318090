//! Review mutations with change notifications
//!
//! Each mutation runs as one step under the collection's write lock:
//! validate, apply to the repository, publish to the hub, return. Failed mutations
//! publish nothing.

use tracing::{debug, info};

use crate::db::{CreateReview, Database, Repository, ReviewKind, ReviewRecord, UpdateReview};
use crate::error::{ReviewError, ReviewResult};
use crate::events::{ReviewChange, ReviewEventHub, Topic};

/// Allowed rating range, inclusive
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Longest accepted review body, in characters
pub const MAX_CONTENT_LEN: usize = 4000;

fn validate_rating(rating: i32) -> ReviewResult<()> {
    if RATING_RANGE.contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::invalid(format!(
            "rating must be between {} and {}, got {}",
            RATING_RANGE.start(),
            RATING_RANGE.end(),
            rating
        )))
    }
}

fn validate_content(content: &str) -> ReviewResult<()> {
    if content.trim().is_empty() {
        return Err(ReviewError::invalid("content must not be blank"));
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(ReviewError::invalid(format!(
            "content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_create(parent_id: &str, input: &CreateReview) -> ReviewResult<()> {
    if parent_id.trim().is_empty() {
        return Err(ReviewError::invalid("parent id must not be blank"));
    }
    validate_rating(input.rating)?;
    validate_content(&input.content)
}

fn validate_update(edits: &UpdateReview) -> ReviewResult<()> {
    if let Some(rating) = edits.rating {
        validate_rating(rating)?;
    }
    if let Some(content) = &edits.content {
        validate_content(content)?;
    }
    Ok(())
}

/// Mutation handler for one review kind
#[derive(Clone)]
pub struct ReviewService {
    kind: ReviewKind,
    db: Database,
    hub: ReviewEventHub,
}

impl ReviewService {
    pub fn new(kind: ReviewKind, db: Database, hub: ReviewEventHub) -> Self {
        Self { kind, db, hub }
    }

    pub fn kind(&self) -> ReviewKind {
        self.kind
    }

    fn topic(&self, change: ReviewChange) -> Topic {
        Topic::for_review(self.kind, change)
    }

    /// Create a review on `parent_id` and announce it on the "added" topic
    pub fn add(&self, parent_id: &str, input: CreateReview) -> ReviewResult<ReviewRecord> {
        validate_create(parent_id, &input)?;

        let mut reviews = self.db.reviews(self.kind).write();
        let id = reviews
            .next_id()
            .ok_or(ReviewError::IdsExhausted(self.kind))?;
        let review = ReviewRecord {
            id,
            rating: input.rating,
            content: input.content,
            parent_id: parent_id.to_string(),
        };
        reviews.append(review.clone());
        let delivered = self
            .hub
            .publish(self.topic(ReviewChange::Added), Some(review.clone()));

        info!(
            kind = %self.kind,
            review_id = %review.id,
            parent_id = %review.parent_id,
            delivered,
            "Review added"
        );
        Ok(review)
    }

    /// Shallow-merge `edits` over an existing review and announce the result. Empty edits
    /// leave the review as it is but still announce it.
    pub fn update(&self, id: &str, edits: UpdateReview) -> ReviewResult<ReviewRecord> {
        let mut reviews = self.db.reviews(self.kind).write();
        let Some(existing) = reviews.find_by_id(id) else {
            debug!(kind = %self.kind, review_id = %id, "Update target not found");
            return Err(ReviewError::not_found(self.kind, id));
        };
        validate_update(&edits)?;

        let merged = edits.apply(existing);
        reviews.replace_all(|r| if r.id == id { merged.clone() } else { r });
        let delivered = self
            .hub
            .publish(self.topic(ReviewChange::Updated), Some(merged.clone()));

        info!(kind = %self.kind, review_id = %id, delivered, "Review updated");
        Ok(merged)
    }

    /// Remove a review. The "deleted" event carries the record as it was before removal.
    pub fn delete(&self, id: &str) -> ReviewResult<ReviewRecord> {
        let mut reviews = self.db.reviews(self.kind).write();
        let existing = reviews.find_by_id(id);
        let delivered = self
            .hub
            .publish(self.topic(ReviewChange::Deleted), existing.clone());

        let Some(review) = existing else {
            debug!(kind = %self.kind, review_id = %id, "Delete target not found");
            return Err(ReviewError::not_found(self.kind, id));
        };
        reviews.remove(id);

        info!(kind = %self.kind, review_id = %id, delivered, "Review deleted");
        Ok(review)
    }
}

/// Mutation handlers for both review kinds, shared through GraphQL context data
#[derive(Clone)]
pub struct ReviewServices {
    book: ReviewService,
    author: ReviewService,
}

impl ReviewServices {
    pub fn new(db: Database, hub: ReviewEventHub) -> Self {
        Self {
            book: ReviewService::new(ReviewKind::Book, db.clone(), hub.clone()),
            author: ReviewService::new(ReviewKind::Author, db, hub),
        }
    }

    pub fn for_kind(&self, kind: ReviewKind) -> &ReviewService {
        match kind {
            ReviewKind::Book => &self.book,
            ReviewKind::Author => &self.author,
        }
    }
}
