//! In-memory entity store
//!
//! [Database] is a cheap-to-clone handle over four collections. Each collection sits behind
//! its own lock; writers hold the write guard for the whole of a mutation.

pub mod books;
pub mod collection;
pub mod reviews;
pub mod seed;

use std::sync::Arc;

use parking_lot::RwLock;

pub use books::{AuthorRecord, BookRecord};
pub use collection::{Collection, Record, Repository};
pub use reviews::{CreateReview, ReviewKind, ReviewRecord, UpdateReview};
pub use seed::SeedData;

#[derive(Default)]
struct Tables {
    books: RwLock<Collection<BookRecord>>,
    authors: RwLock<Collection<AuthorRecord>>,
    book_reviews: RwLock<Collection<ReviewRecord>>,
    author_reviews: RwLock<Collection<ReviewRecord>>,
}

/// Handle to the in-memory store
#[derive(Clone, Default)]
pub struct Database {
    tables: Arc<Tables>,
}

impl Database {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `seed`
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            tables: Arc::new(Tables {
                books: RwLock::new(Collection::from_records(seed.books)),
                authors: RwLock::new(Collection::from_records(seed.authors)),
                book_reviews: RwLock::new(Collection::from_records(seed.book_reviews)),
                author_reviews: RwLock::new(Collection::from_records(seed.author_reviews)),
            }),
        }
    }

    pub fn books(&self) -> &RwLock<Collection<BookRecord>> {
        &self.tables.books
    }

    pub fn authors(&self) -> &RwLock<Collection<AuthorRecord>> {
        &self.tables.authors
    }

    /// Review collection for the given parent kind
    pub fn reviews(&self, kind: ReviewKind) -> &RwLock<Collection<ReviewRecord>> {
        match kind {
            ReviewKind::Book => &self.tables.book_reviews,
            ReviewKind::Author => &self.tables.author_reviews,
        }
    }

    pub fn book(&self, id: &str) -> Option<BookRecord> {
        self.books().read().find_by_id(id)
    }

    pub fn author(&self, id: &str) -> Option<AuthorRecord> {
        self.authors().read().find_by_id(id)
    }

    /// Authors credited on a book
    pub fn authors_of_book(&self, book_id: &str) -> Vec<AuthorRecord> {
        self.authors()
            .read()
            .filter(|a| a.book_ids.iter().any(|id| id == book_id))
    }

    /// Books an author is credited on
    pub fn books_by_author(&self, author_id: &str) -> Vec<BookRecord> {
        self.books()
            .read()
            .filter(|b| b.author_ids.iter().any(|id| id == author_id))
    }

    /// Reviews attached to a book or author
    pub fn reviews_for(&self, kind: ReviewKind, parent_id: &str) -> Vec<ReviewRecord> {
        self.reviews(kind).read().filter(|r| r.parent_id == parent_id)
    }
}
