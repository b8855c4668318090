//! Seed data for the in-memory store.
//!
//! The default catalogue is embedded from `seed.json`; a different file can be
//! supplied at startup via `SEED_FILE`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::{AuthorRecord, BookRecord, ReviewRecord};

const EMBEDDED_SEED: &str = include_str!("seed.json");

/// Initial contents of every collection.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub books: Vec<BookRecord>,
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
    #[serde(default)]
    pub book_reviews: Vec<ReviewRecord>,
    #[serde(default)]
    pub author_reviews: Vec<ReviewRecord>,
}

impl SeedData {
    /// The catalogue bundled with the binary
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(EMBEDDED_SEED).context("embedded seed data is not valid JSON")
    }

    /// Load a seed file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seed: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;
        info!(
            path = %path.display(),
            books = seed.books.len(),
            authors = seed.authors.len(),
            book_reviews = seed.book_reviews.len(),
            author_reviews = seed.author_reviews.len(),
            "Seed file loaded"
        );
        Ok(seed)
    }
}
