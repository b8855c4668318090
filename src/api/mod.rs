//! REST routes alongside GraphQL
//!
//! The primary API is GraphQL at /graphql; only health checks live here.

pub mod health;
