use std::sync::Arc;

use sqlx::PgPool;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::admin::CategoryAdmin;
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::shared::crud::MutationHooks;
use crate::shared::types::PaginationQuery;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
    admin: Arc<CategoryAdmin>,
}

impl CategoryService {
    pub fn new(pool: PgPool, admin: Arc<CategoryAdmin>) -> Self {
        Self { pool, admin }
    }

    /// List categories ordered by title
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<Category>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billboard_category")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                AppError::Database(e)
            })?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, description
            FROM billboard_category
            ORDER BY title, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((categories, total))
    }

    /// Get category by id
    pub async fn get(&self, id: i32) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, description
            FROM billboard_category
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Resolve a category an entry is about to reference.
    ///
    /// A missing category is a validation failure of the entry, not a 404.
    pub async fn resolve_reference(&self, id: i32) -> Result<Category> {
        match self.get(id).await {
            Err(AppError::NotFound(_)) => Err(AppError::Validation(format!(
                "category: Category {} does not exist",
                id
            ))),
            other => other,
        }
    }

    pub async fn create(
        &self,
        dto: CreateCategoryDto,
        actor: &AuthenticatedUser,
    ) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO billboard_category (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description
            "#,
        )
        .bind(dto.title.trim())
        .bind(dto.description.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category created: id={}, by={}", category.id, actor.act);
        self.admin.post_persist(&category, actor).await;

        Ok(category)
    }

    pub async fn update(
        &self,
        id: i32,
        dto: UpdateCategoryDto,
        actor: &AuthenticatedUser,
    ) -> Result<Category> {
        let previous = self.get(id).await?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE billboard_category
            SET title = $1, description = $2
            WHERE id = $3
            RETURNING id, title, description
            "#,
        )
        .bind(dto.title.trim())
        .bind(dto.description.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Category updated: id={}, by={}", category.id, actor.act);
        self.admin.post_update(&category, &previous, actor).await;

        Ok(category)
    }

    /// Delete a category; refused while entries still reference it
    pub async fn delete(&self, id: i32, actor: &AuthenticatedUser) -> Result<()> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            DELETE FROM billboard_category
            WHERE id = $1
            RETURNING id, title, description
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                AppError::Conflict(format!(
                    "Category {} still has entries and cannot be deleted",
                    id
                ))
            })
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Category deleted: id={}, by={}", category.id, actor.act);
        self.admin.post_remove(&category, actor).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BillboardConfig;
    use crate::modules::audit::PgAuditLog;
    use crate::shared::test_helpers::create_manager_user;

    fn service(pool: PgPool) -> CategoryService {
        let config = BillboardConfig::default();
        let audit_log = Arc::new(PgAuditLog::new(pool.clone(), config.log_module.clone()));
        CategoryService::new(pool, Arc::new(CategoryAdmin::new(audit_log, &config)))
    }

    fn events() -> CreateCategoryDto {
        CreateCategoryDto {
            title: " Events ".to_string(),
            description: "School events".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_persists_and_logs(pool: PgPool) {
        let service = service(pool.clone());
        let manager = create_manager_user();

        let created = service.create(events(), &manager).await.unwrap();
        assert_eq!(created.title, "Events");
        assert_eq!(service.get(created.id).await.unwrap(), created);

        let (module, text, act): (String, String, Option<String>) =
            sqlx::query_as("SELECT module, text, act FROM log ORDER BY id")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(module, BillboardConfig::default().log_module);
        assert_eq!(text, "Kategorie \"Events\" hinzugefügt");
        assert_eq!(act.as_deref(), Some("anna.schmidt"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_rename_is_logged_with_both_titles(pool: PgPool) {
        let service = service(pool.clone());
        let manager = create_manager_user();
        let created = service.create(events(), &manager).await.unwrap();

        let dto = UpdateCategoryDto {
            title: "Festivals".to_string(),
            description: "School events".to_string(),
        };
        service.update(created.id, dto, &manager).await.unwrap();

        let lines: Vec<String> = sqlx::query_scalar("SELECT text FROM log ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(
            lines[1],
            "Kategorie \"Events\" umbenannt nach \"Festivals\""
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_referenced_category_cannot_be_deleted(pool: PgPool) {
        let service = service(pool.clone());
        let manager = create_manager_user();
        let created = service.create(events(), &manager).await.unwrap();

        sqlx::query(
            r#"
            INSERT INTO billboard (title, description, time, updated_at, category)
            VALUES ('Assembly', 'Monday 9am', NOW(), NOW(), $1)
            "#,
        )
        .bind(created.id)
        .execute(&pool)
        .await
        .unwrap();

        let err = service.delete(created.id, &manager).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "{:?}", err);
        assert_eq!(service.get(created.id).await.unwrap(), created);

        // no audit line for a delete that did not happen
        let logged: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM log")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(logged, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unused_category_is_deleted(pool: PgPool) {
        let service = service(pool);
        let manager = create_manager_user();
        let created = service.create(events(), &manager).await.unwrap();

        service.delete(created.id, &manager).await.unwrap();
        let err = service.get(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "{:?}", err);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_reference_is_a_validation_error(pool: PgPool) {
        let service = service(pool);

        let err = service.resolve_reference(4711).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{:?}", err);

        let err = service.get(4711).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "{:?}", err);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_pages_past_the_end_are_empty(pool: PgPool) {
        let service = service(pool);
        service.create(events(), &create_manager_user()).await.unwrap();

        let (categories, total) = service
            .list(&PaginationQuery {
                page: i64::MAX,
                page_size: 20,
            })
            .await
            .unwrap();
        assert!(categories.is_empty());
        assert_eq!(total, 1);
    }
}
