use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::entries::models::{Entry, EntryComment, EntryImage};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{validate_not_blank, validate_title};

fn default_true() -> bool {
    true
}

/// Request DTO for posting an entry
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEntryDto {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    pub category_id: i32,

    /// Defaults to true
    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default)]
    pub closed: bool,
}

/// Request DTO for editing an entry
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateEntryDto {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    pub category_id: i32,
    pub visible: bool,
    pub closed: bool,
}

/// Query parameters for listing entries
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct EntryListQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Only entries of this category
    pub category_id: Option<i32>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl EntryListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEntryImageDto {
    /// Stored file reference
    #[validate(custom(function = "validate_not_blank"))]
    pub image: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEntryCommentDto {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryImageResponseDto {
    pub id: i32,
    pub image: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub time: DateTime<Utc>,
}

impl From<EntryImage> for EntryImageResponseDto {
    fn from(i: EntryImage) -> Self {
        Self {
            id: i.id,
            image: i.image,
            description: i.description,
            author: i.author,
            time: i.time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryCommentResponseDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub time: DateTime<Utc>,
}

impl From<EntryComment> for EntryCommentResponseDto {
    fn from(c: EntryComment) -> Self {
        Self {
            id: c.id,
            title: c.title,
            content: c.content,
            author: c.author,
            time: c.time,
        }
    }
}

/// Response DTO for entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryResponseDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub time: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: CategoryResponseDto,
    /// Account name of the author, if still set
    pub author: Option<String>,
    /// Author name, or `?` once the account is gone
    pub author_display: String,
    pub visible: bool,
    pub closed: bool,
    pub images: Vec<EntryImageResponseDto>,
    pub comments: Vec<EntryCommentResponseDto>,
}

impl TryFrom<Entry> for EntryResponseDto {
    type Error = AppError;

    /// Only persisted entries (id, timestamps and category set) can be rendered
    fn try_from(entry: Entry) -> Result<Self, Self::Error> {
        let unpersisted = || AppError::Internal("Entry has not been persisted".to_string());

        let id = entry.id().ok_or_else(unpersisted)?;
        let time = entry.time().ok_or_else(unpersisted)?;
        let updated_at = entry.updated_at().ok_or_else(unpersisted)?;
        let category = entry.category().cloned().ok_or_else(unpersisted)?;

        Ok(Self {
            id,
            title: entry.title().to_string(),
            description: entry.description().to_string(),
            time,
            updated_at,
            category: category.into(),
            author: entry.author_act().map(str::to_string),
            author_display: entry.author_display(),
            visible: entry.is_visible(),
            closed: entry.is_closed(),
            images: entry.images().iter().cloned().map(Into::into).collect(),
            comments: entry.comments().iter().cloned().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::Category;

    #[test]
    fn test_create_defaults_to_visible_and_open() {
        let dto: CreateEntryDto = serde_json::from_value(serde_json::json!({
            "title": "Assembly",
            "description": "Monday 9am",
            "category_id": 1
        }))
        .unwrap();

        assert!(dto.visible);
        assert!(!dto.closed);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_title_is_bounded() {
        let dto = CreateEntryDto {
            title: "a".repeat(256),
            description: "Monday 9am".to_string(),
            category_id: 1,
            visible: true,
            closed: false,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let dto = CreateEntryDto {
            title: "a".repeat(255),
            ..dto
        };
        assert!(dto.validate().is_ok());

        // stored trimmed, so padding does not count against the limit
        let dto = UpdateEntryDto {
            title: format!(" {} ", "a".repeat(255)),
            description: "Monday 9am".to_string(),
            category_id: 1,
            visible: true,
            closed: false,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_blank_comment_is_rejected() {
        let dto = CreateEntryCommentDto {
            title: "Thanks".to_string(),
            content: " \n".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn test_unpersisted_entry_is_not_rendered() {
        let mut entry = Entry::new();
        entry.set_title("Assembly");
        assert!(EntryResponseDto::try_from(entry).is_err());
    }

    #[test]
    fn test_response_carries_author_display() {
        let mut entry = Entry::new();
        entry.set_title("Assembly");
        entry.set_description("Monday 9am");
        entry.set_category(Category {
            id: 1,
            title: "Events".to_string(),
            description: "School events".to_string(),
        });
        entry.on_create();
        entry.mark_persisted(5);

        let dto = EntryResponseDto::try_from(entry).unwrap();
        assert_eq!(dto.id, 5);
        assert_eq!(dto.author, None);
        assert_eq!(dto.author_display, "?");
        assert_eq!(dto.category.title, "Events");
        assert_eq!(dto.time, dto.updated_at);
    }

    #[test]
    fn test_list_query_maps_to_pagination() {
        let query = EntryListQuery {
            page: 3,
            page_size: 500,
            category_id: Some(2),
        };
        let pagination = query.pagination();
        assert_eq!(pagination.limit(), 100);
        assert_eq!(pagination.offset(), 200);
    }
}
