use super::prelude::*;

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    /// All authors in the catalogue
    async fn authors(&self, ctx: &Context<'_>) -> Vec<Author> {
        let db = ctx.data_unchecked::<Database>();
        db.authors().read().all().into_iter().map(Author::from).collect()
    }

    /// Get an author by ID
    async fn author(&self, ctx: &Context<'_>, id: ID) -> Option<Author> {
        let db = ctx.data_unchecked::<Database>();
        db.author(&id).map(Author::from)
    }

    /// Reviews of the author with the given ID
    async fn author_reviews(&self, ctx: &Context<'_>, id: ID) -> Vec<AuthorReview> {
        let db = ctx.data_unchecked::<Database>();
        db.reviews_for(ReviewKind::Author, &id)
            .into_iter()
            .map(AuthorReview::from)
            .collect()
    }
}
