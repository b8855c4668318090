//! Application services

pub mod reviews;

pub use reviews::{ReviewService, ReviewServices};
