//! Book and author records

use serde::{Deserialize, Serialize};

use super::collection::Record;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub about: String,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    /// Authors credited on this book
    #[serde(default)]
    pub author_ids: Vec<String>,
}

impl Record for BookRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    pub about: String,
    #[serde(default)]
    pub is_favorite: bool,
    /// Books this author is credited on
    #[serde(default)]
    pub book_ids: Vec<String>,
}

impl Record for AuthorRecord {
    fn id(&self) -> &str {
        &self.id
    }
}
