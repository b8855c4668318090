//! GraphQL API with subscriptions for real-time review updates
//!
//! Queries read the catalogue straight from the [Database](crate::db::Database).
//! Mutations go through [ReviewServices](crate::services::ReviewServices), which publish
//! to the event hub that the subscription fields listen on.

pub mod mutations;
pub mod queries;
mod schema;
pub mod service;
mod subscriptions;
pub mod types;

pub use schema::{BookshelfSchema, MutationRoot, QueryRoot, build_schema};
pub use service::router;
pub use subscriptions::SubscriptionRoot;
