use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Image attached to an entry
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EntryImage {
    pub id: i32,
    /// Owning entry
    pub entry: i32,
    /// Stored file reference
    pub image: String,
    pub description: Option<String>,
    /// Account that uploaded the image
    pub author: Option<String>,
    pub time: DateTime<Utc>,
}
