//! Bookshelf: a GraphQL server for books, authors and their reviews, with live
//! subscriptions fed by review mutations.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod graphql;
pub mod logging;
pub mod services;

pub use app::{AppState, build_app};
pub use error::{ReviewError, ReviewResult};
