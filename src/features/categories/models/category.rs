use std::fmt;

use sqlx::FromRow;

/// Database model for a bill-board category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i32,
    pub title: String,
    pub description: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
