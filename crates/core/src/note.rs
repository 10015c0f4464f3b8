//! Note model: tenant-scoped content records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribution carried on every note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAuthor {
    pub email: String,
}

/// A note within a tenant's notes space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: NoteAuthor,
}
