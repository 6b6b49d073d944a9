use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Comment on an entry
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EntryComment {
    pub id: i32,
    pub entry: i32,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub time: DateTime<Utc>,
}

impl fmt::Display for EntryComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
