//! GraphQL type definitions
//!
//! These types mirror the records in [crate::db] with async-graphql attributes. Relations
//! are resolved on demand from the [Database] in context.

use async_graphql::{ComplexObject, Context, ID, InputObject, SimpleObject};

use crate::db::{
    AuthorRecord, BookRecord, CreateReview, Database, ReviewKind, ReviewRecord, UpdateReview,
};

/// A book in the catalogue
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Book {
    pub id: ID,
    pub title: String,
    pub about: String,
    pub is_favorite: Option<bool>,
}

#[ComplexObject]
impl Book {
    /// Authors credited on this book
    async fn authors(&self, ctx: &Context<'_>) -> Vec<Author> {
        let db = ctx.data_unchecked::<Database>();
        db.authors_of_book(&self.id)
            .into_iter()
            .map(Author::from)
            .collect()
    }

    /// Reviews of this book
    async fn reviews(&self, ctx: &Context<'_>) -> Vec<BookReview> {
        let db = ctx.data_unchecked::<Database>();
        db.reviews_for(ReviewKind::Book, &self.id)
            .into_iter()
            .map(BookReview::from)
            .collect()
    }
}

impl From<BookRecord> for Book {
    fn from(r: BookRecord) -> Self {
        Self {
            id: ID(r.id),
            title: r.title,
            about: r.about,
            is_favorite: r.is_favorite,
        }
    }
}

/// An author in the catalogue
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Author {
    pub id: ID,
    pub name: String,
    pub about: String,
    pub is_favorite: bool,
}

#[ComplexObject]
impl Author {
    /// Books this author is credited on
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        let db = ctx.data_unchecked::<Database>();
        db.books_by_author(&self.id)
            .into_iter()
            .map(Book::from)
            .collect()
    }

    /// Reviews of this author
    async fn reviews(&self, ctx: &Context<'_>) -> Vec<AuthorReview> {
        let db = ctx.data_unchecked::<Database>();
        db.reviews_for(ReviewKind::Author, &self.id)
            .into_iter()
            .map(AuthorReview::from)
            .collect()
    }
}

impl From<AuthorRecord> for Author {
    fn from(r: AuthorRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            about: r.about,
            is_favorite: r.is_favorite,
        }
    }
}

/// A review of a book
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct BookReview {
    pub id: ID,
    pub rating: i32,
    pub content: String,
    #[graphql(skip)]
    pub book_id: String,
}

#[ComplexObject]
impl BookReview {
    /// The reviewed book, if it is in the catalogue
    async fn book(&self, ctx: &Context<'_>) -> Option<Book> {
        ctx.data_unchecked::<Database>()
            .book(&self.book_id)
            .map(Book::from)
    }
}

impl From<ReviewRecord> for BookReview {
    fn from(r: ReviewRecord) -> Self {
        Self {
            id: ID(r.id),
            rating: r.rating,
            content: r.content,
            book_id: r.parent_id,
        }
    }
}

/// A review of an author
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct AuthorReview {
    pub id: ID,
    pub rating: i32,
    pub content: String,
    #[graphql(skip)]
    pub author_id: String,
}

#[ComplexObject]
impl AuthorReview {
    /// The reviewed author, if it is in the catalogue
    async fn author(&self, ctx: &Context<'_>) -> Option<Author> {
        ctx.data_unchecked::<Database>()
            .author(&self.author_id)
            .map(Author::from)
    }
}

impl From<ReviewRecord> for AuthorReview {
    fn from(r: ReviewRecord) -> Self {
        Self {
            id: ID(r.id),
            rating: r.rating,
            content: r.content,
            author_id: r.parent_id,
        }
    }
}

/// Input for adding a review
#[derive(Debug, InputObject)]
pub struct AddReviewInput {
    /// Rating from 1 to 5
    pub rating: i32,
    /// Review text
    pub content: String,
}

impl From<AddReviewInput> for CreateReview {
    fn from(input: AddReviewInput) -> Self {
        Self {
            rating: input.rating,
            content: input.content,
        }
    }
}

/// Input for editing a review. Omitted fields keep their current value.
#[derive(Debug, Default, InputObject)]
pub struct EditReviewInput {
    pub rating: Option<i32>,
    pub content: Option<String>,
}

impl From<EditReviewInput> for UpdateReview {
    fn from(input: EditReviewInput) -> Self {
        Self {
            rating: input.rating,
            content: input.content,
        }
    }
}
