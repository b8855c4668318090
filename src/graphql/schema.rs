//! GraphQL schema definition with queries, mutations, and subscriptions

use async_graphql::extensions::Tracing;
use async_graphql::{MergedObject, Schema};

use crate::db::Database;
use crate::events::{ReviewEventHub, ReviewRegistrar};
use crate::services::ReviewServices;

use super::mutations::ReviewMutations;
use super::queries::{AuthorQueries, BookQueries};
use super::subscriptions::SubscriptionRoot;

#[derive(MergedObject, Default)]
pub struct QueryRoot(BookQueries, AuthorQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(ReviewMutations);

/// The GraphQL schema type
pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the GraphQL schema. Mutations publish to `hub`; subscriptions listen on it.
pub fn build_schema(db: Database, hub: ReviewEventHub) -> BookshelfSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(ReviewServices::new(db.clone(), hub.clone()))
    .data(ReviewRegistrar::new(hub))
    .data(db)
    .extension(Tracing)
    .finish()
}
