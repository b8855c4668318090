use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// All books in the catalogue
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        let db = ctx.data_unchecked::<Database>();
        db.books().read().all().into_iter().map(Book::from).collect()
    }

    /// Get a book by ID
    async fn book(&self, ctx: &Context<'_>, id: ID) -> Option<Book> {
        let db = ctx.data_unchecked::<Database>();
        db.book(&id).map(Book::from)
    }

    /// Reviews of the book with the given ID
    async fn book_reviews(&self, ctx: &Context<'_>, id: ID) -> Vec<BookReview> {
        let db = ctx.data_unchecked::<Database>();
        db.reviews_for(ReviewKind::Book, &id)
            .into_iter()
            .map(BookReview::from)
            .collect()
    }
}
