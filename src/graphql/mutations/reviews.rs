use super::prelude::*;

#[derive(Default)]
pub struct ReviewMutations;

#[Object]
impl ReviewMutations {
    /// Add a review to a book
    async fn add_book_review(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "bookID")] book_id: ID,
        review: AddReviewInput,
    ) -> Result<BookReview> {
        let services = ctx.data_unchecked::<ReviewServices>();
        services
            .for_kind(ReviewKind::Book)
            .add(&book_id, review.into())
            .map(BookReview::from)
            .map_err(|e| e.extend())
    }

    /// Edit a book review. Omitted edits leave it unchanged.
    async fn update_book_review(
        &self,
        ctx: &Context<'_>,
        id: ID,
        edits: Option<EditReviewInput>,
    ) -> Result<BookReview> {
        let services = ctx.data_unchecked::<ReviewServices>();
        services
            .for_kind(ReviewKind::Book)
            .update(&id, edits.unwrap_or_default().into())
            .map(BookReview::from)
            .map_err(|e| e.extend())
    }

    /// Delete a book review, returning it as it was before removal
    async fn delete_book_review(&self, ctx: &Context<'_>, id: ID) -> Result<BookReview> {
        let services = ctx.data_unchecked::<ReviewServices>();
        services
            .for_kind(ReviewKind::Book)
            .delete(&id)
            .map(BookReview::from)
            .map_err(|e| e.extend())
    }

    /// Add a review to an author
    async fn add_author_review(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "authorID")] author_id: ID,
        review: AddReviewInput,
    ) -> Result<AuthorReview> {
        let services = ctx.data_unchecked::<ReviewServices>();
        services
            .for_kind(ReviewKind::Author)
            .add(&author_id, review.into())
            .map(AuthorReview::from)
            .map_err(|e| e.extend())
    }

    /// Edit an author review. Omitted edits leave it unchanged.
    async fn update_author_review(
        &self,
        ctx: &Context<'_>,
        id: ID,
        edits: Option<EditReviewInput>,
    ) -> Result<AuthorReview> {
        let services = ctx.data_unchecked::<ReviewServices>();
        services
            .for_kind(ReviewKind::Author)
            .update(&id, edits.unwrap_or_default().into())
            .map(AuthorReview::from)
            .map_err(|e| e.extend())
    }

    /// Delete an author review, returning it as it was before removal
    async fn delete_author_review(&self, ctx: &Context<'_>, id: ID) -> Result<AuthorReview> {
        let services = ctx.data_unchecked::<ReviewServices>();
        services
            .for_kind(ReviewKind::Author)
            .delete(&id)
            .map(AuthorReview::from)
            .map_err(|e| e.extend())
    }
}
