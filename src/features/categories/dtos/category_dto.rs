use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::validate_not_blank;

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
}

/// Request DTO for editing a category; the form always submits every field
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub title: String,
    pub description: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_blank_fields() {
        let dto = CreateCategoryDto {
            title: "  ".to_string(),
            description: "School events".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let dto = CreateCategoryDto {
            title: "Events".to_string(),
            description: String::new(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_create_accepts_filled_fields() {
        let dto = CreateCategoryDto {
            title: "Events".to_string(),
            description: "School events".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
