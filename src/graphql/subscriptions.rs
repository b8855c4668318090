//! GraphQL subscriptions for review changes
//!
//! Each field opens a fresh listener through the [ReviewRegistrar]. The listener is
//! unregistered when the client stops the subscription or the socket closes.

use async_graphql::{Context, ErrorExtensions, Result, Subscription};
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::db::ReviewRecord;
use crate::events::ReviewRegistrar;

use super::types::{AuthorReview, BookReview};

fn review_stream<R>(ctx: &Context<'_>, name: &str) -> Result<BoxStream<'static, R>>
where
    R: From<ReviewRecord> + Send + 'static,
{
    let registrar = ctx.data_unchecked::<ReviewRegistrar>();
    let listener = registrar.open(name).map_err(|e| e.extend())?;
    Ok(listener.map(|event| R::from(event.payload)).boxed())
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Book reviews as they are added
    async fn book_review_added(&self, ctx: &Context<'_>) -> Result<BoxStream<'static, BookReview>> {
        review_stream(ctx, "bookReviewAdded")
    }

    /// Book reviews as they are edited, with their merged state
    async fn book_review_updated(
        &self,
        ctx: &Context<'_>,
    ) -> Result<BoxStream<'static, BookReview>> {
        review_stream(ctx, "bookReviewUpdated")
    }

    /// Book reviews as they are deleted, with their last state
    async fn book_review_deleted(
        &self,
        ctx: &Context<'_>,
    ) -> Result<BoxStream<'static, BookReview>> {
        review_stream(ctx, "bookReviewDeleted")
    }

    /// Author reviews as they are added
    async fn author_review_added(
        &self,
        ctx: &Context<'_>,
    ) -> Result<BoxStream<'static, AuthorReview>> {
        review_stream(ctx, "authorReviewAdded")
    }

    /// Author reviews as they are edited, with their merged state
    async fn author_review_updated(
        &self,
        ctx: &Context<'_>,
    ) -> Result<BoxStream<'static, AuthorReview>> {
        review_stream(ctx, "authorReviewUpdated")
    }

    /// Author reviews as they are deleted, with their last state
    async fn author_review_deleted(
        &self,
        ctx: &Context<'_>,
    ) -> Result<BoxStream<'static, AuthorReview>> {
        review_stream(ctx, "authorReviewDeleted")
    }
}
