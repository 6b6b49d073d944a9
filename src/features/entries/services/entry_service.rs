use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::services::CategoryService;
use crate::features::entries::admin::{AttachmentChange, EntryAdmin};
use crate::features::entries::dtos::{
    CreateEntryCommentDto, CreateEntryDto, CreateEntryImageDto, EntryListQuery, UpdateEntryDto,
};
use crate::features::entries::models::{Entry, EntryComment, EntryImage, EntryRow};
use crate::features::users::User;
use crate::shared::crud::MutationHooks;

const ENTRY_SELECT: &str = r#"
    SELECT e.id, e.title, e.description, e.time, e.updated_at, e.visible, e.closed,
           c.id AS category_id, c.title AS category_title,
           c.description AS category_description,
           u.act AS author_act, u.firstname AS author_firstname,
           u.lastname AS author_lastname, u.deleted AS author_deleted
    FROM billboard e
    JOIN billboard_category c ON c.id = e.category
    LEFT JOIN users u ON u.act = e.author
"#;

// $1: principal sees everything, $2: principal act
const VISIBLE_TO: &str = "($1 OR e.visible OR e.author = $2)";

/// Service for entries and their images and comments
pub struct EntryService {
    pool: PgPool,
    admin: Arc<EntryAdmin>,
    categories: Arc<CategoryService>,
}

impl EntryService {
    pub fn new(pool: PgPool, admin: Arc<EntryAdmin>, categories: Arc<CategoryService>) -> Self {
        Self {
            pool,
            admin,
            categories,
        }
    }

    /// List entries the principal may see, newest first
    pub async fn list(
        &self,
        query: &EntryListQuery,
        user: &AuthenticatedUser,
    ) -> Result<(Vec<Entry>, i64)> {
        let pagination = query.pagination();

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM billboard e WHERE {} AND ($3::int IS NULL OR e.category = $3)",
            VISIBLE_TO
        ))
        .bind(user.can_manage_billboard())
        .bind(&user.act)
        .bind(query.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count entries: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            r#"{}
            WHERE {} AND ($3::int IS NULL OR e.category = $3)
            ORDER BY e.time DESC, e.id DESC
            LIMIT $4 OFFSET $5
            "#,
            ENTRY_SELECT, VISIBLE_TO
        ))
        .bind(user.can_manage_billboard())
        .bind(&user.act)
        .bind(query.category_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list entries: {:?}", e);
            AppError::Database(e)
        })?;

        let mut entries: Vec<Entry> = rows.into_iter().map(Entry::from).collect();
        self.load_attachments(&mut entries).await?;

        Ok((entries, total))
    }

    /// Get an entry with its images and comments.
    ///
    /// Hidden entries of other authors are reported as missing to non-managers.
    pub async fn get(&self, id: i32, user: &AuthenticatedUser) -> Result<Entry> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            "{} WHERE e.id = $3 AND {}",
            ENTRY_SELECT, VISIBLE_TO
        ))
        .bind(user.can_manage_billboard())
        .bind(&user.act)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get entry {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))?;

        let mut entries = vec![Entry::from(row)];
        self.load_attachments(&mut entries).await?;

        entries
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))
    }

    pub async fn create(&self, dto: CreateEntryDto, actor: &AuthenticatedUser) -> Result<Entry> {
        let category = self.categories.resolve_reference(dto.category_id).await?;
        let author = self.find_author(&actor.act).await?;

        let mut entry = Entry::new();
        entry.set_title(dto.title.trim());
        entry.set_description(dto.description.trim());
        entry.set_category(category);
        entry.set_author(author);
        entry.set_visible(dto.visible);
        entry.set_closed(dto.closed);
        entry.on_create();

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO billboard (title, description, time, updated_at, category, author, visible, closed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(entry.title())
        .bind(entry.description())
        .bind(entry.time())
        .bind(entry.updated_at())
        .bind(dto.category_id)
        .bind(entry.author_act())
        .bind(entry.is_visible())
        .bind(entry.is_closed())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || category_vanished(dto.category_id)))?;

        entry.mark_persisted(id);

        tracing::info!("Entry created: id={}, by={}", id, actor.act);
        self.admin.post_persist(&entry, actor).await;

        Ok(entry)
    }

    pub async fn update(
        &self,
        id: i32,
        dto: UpdateEntryDto,
        actor: &AuthenticatedUser,
    ) -> Result<Entry> {
        let mut entry = self.get(id, actor).await?;
        self.admin.authorize_modify(actor, &entry)?;
        let previous = entry.clone();

        if entry.category().map(|c| c.id) != Some(dto.category_id) {
            let category = self.categories.resolve_reference(dto.category_id).await?;
            entry.set_category(category);
        }
        entry.set_title(dto.title.trim());
        entry.set_description(dto.description.trim());
        entry.set_visible(dto.visible);
        entry.set_closed(dto.closed);
        entry.on_update();

        let result = sqlx::query(
            r#"
            UPDATE billboard
            SET title = $1, description = $2, category = $3, visible = $4, closed = $5,
                updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(entry.title())
        .bind(entry.description())
        .bind(dto.category_id)
        .bind(entry.is_visible())
        .bind(entry.is_closed())
        .bind(entry.updated_at())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || category_vanished(dto.category_id)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Entry {} not found", id)));
        }

        tracing::info!("Entry updated: id={}, by={}", id, actor.act);
        self.admin.post_update(&entry, &previous, actor).await;

        Ok(entry)
    }

    /// Delete an entry; its images and comments go with it
    pub async fn delete(&self, id: i32, actor: &AuthenticatedUser) -> Result<()> {
        let entry = self.get(id, actor).await?;
        self.admin.authorize_modify(actor, &entry)?;

        let result = sqlx::query("DELETE FROM billboard WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete entry {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Entry {} not found", id)));
        }

        tracing::info!("Entry deleted: id={}, by={}", id, actor.act);
        self.admin.post_remove(&entry, actor).await;

        Ok(())
    }

    pub async fn add_image(
        &self,
        id: i32,
        dto: CreateEntryImageDto,
        actor: &AuthenticatedUser,
    ) -> Result<EntryImage> {
        let mut entry = self.get(id, actor).await?;
        self.admin.authorize_modify(actor, &entry)?;
        let author = self.find_author(&actor.act).await?;

        let description = dto
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let image = sqlx::query_as::<_, EntryImage>(
            r#"
            INSERT INTO billboard_images (entry, image, description, author)
            VALUES ($1, $2, $3, $4)
            RETURNING id, entry, image, description, author, time
            "#,
        )
        .bind(id)
        .bind(dto.image.trim())
        .bind(description)
        .bind(author.as_ref().map(|a| a.act.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || entry_vanished(id)))?;

        entry.add_image(image.clone());

        tracing::info!("Image added: id={}, entry={}, by={}", image.id, id, actor.act);
        self.admin
            .post_attachment(&entry, AttachmentChange::ImageAdded, actor)
            .await;

        Ok(image)
    }

    pub async fn remove_image(
        &self,
        id: i32,
        image_id: i32,
        actor: &AuthenticatedUser,
    ) -> Result<()> {
        let mut entry = self.get(id, actor).await?;
        self.admin.authorize_modify(actor, &entry)?;

        let image = entry
            .images()
            .iter()
            .find(|i| i.id == image_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Image {} not found on entry {}", image_id, id))
            })?;

        sqlx::query("DELETE FROM billboard_images WHERE id = $1 AND entry = $2")
            .bind(image_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete image {}: {:?}", image_id, e);
                AppError::Database(e)
            })?;

        entry.remove_image(&image);

        tracing::info!("Image removed: id={}, entry={}, by={}", image_id, id, actor.act);
        self.admin
            .post_attachment(&entry, AttachmentChange::ImageRemoved, actor)
            .await;

        Ok(())
    }

    /// Comment on an entry; closed entries take no new comments
    pub async fn add_comment(
        &self,
        id: i32,
        dto: CreateEntryCommentDto,
        actor: &AuthenticatedUser,
    ) -> Result<EntryComment> {
        let mut entry = self.get(id, actor).await?;

        if entry.is_closed() {
            return Err(AppError::Conflict(format!(
                "Entry \"{}\" is closed for comments",
                entry
            )));
        }

        let author = self.find_author(&actor.act).await?;

        let comment = sqlx::query_as::<_, EntryComment>(
            r#"
            INSERT INTO billboard_comments (entry, title, content, author)
            VALUES ($1, $2, $3, $4)
            RETURNING id, entry, title, content, author, time
            "#,
        )
        .bind(id)
        .bind(dto.title.trim())
        .bind(dto.content.trim())
        .bind(author.as_ref().map(|a| a.act.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || entry_vanished(id)))?;

        entry.add_comment(comment.clone());

        tracing::info!(
            "Comment added: id={}, entry={}, by={}",
            comment.id,
            id,
            actor.act
        );
        self.admin
            .post_attachment(&entry, AttachmentChange::CommentAdded(&comment), actor)
            .await;

        Ok(comment)
    }

    pub async fn remove_comment(
        &self,
        id: i32,
        comment_id: i32,
        actor: &AuthenticatedUser,
    ) -> Result<()> {
        let mut entry = self.get(id, actor).await?;

        let comment = entry
            .comments()
            .iter()
            .find(|c| c.id == comment_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Comment {} not found on entry {}", comment_id, id))
            })?;
        self.admin.authorize_comment_removal(actor, &comment)?;

        sqlx::query("DELETE FROM billboard_comments WHERE id = $1 AND entry = $2")
            .bind(comment_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete comment {}: {:?}", comment_id, e);
                AppError::Database(e)
            })?;

        entry.remove_comment(&comment);

        tracing::info!(
            "Comment removed: id={}, entry={}, by={}",
            comment_id,
            id,
            actor.act
        );
        self.admin
            .post_attachment(&entry, AttachmentChange::CommentRemoved(&comment), actor)
            .await;

        Ok(())
    }

    /// Platform account of the principal, if it has one
    async fn find_author(&self, act: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT act, firstname, lastname, deleted
            FROM users
            WHERE act = $1
            "#,
        )
        .bind(act)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user {}: {:?}", act, e);
            AppError::Database(e)
        })
    }

    async fn load_attachments(&self, entries: &mut [Entry]) -> Result<()> {
        let index: HashMap<i32, usize> = entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.id().map(|id| (id, i)))
            .collect();

        if index.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = index.keys().copied().collect();

        let images = sqlx::query_as::<_, EntryImage>(
            r#"
            SELECT id, entry, image, description, author, time
            FROM billboard_images
            WHERE entry = ANY($1)
            ORDER BY time, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load entry images: {:?}", e);
            AppError::Database(e)
        })?;

        let comments = sqlx::query_as::<_, EntryComment>(
            r#"
            SELECT id, entry, title, content, author, time
            FROM billboard_comments
            WHERE entry = ANY($1)
            ORDER BY time, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load entry comments: {:?}", e);
            AppError::Database(e)
        })?;

        for image in images {
            if let Some(&i) = index.get(&image.entry) {
                entries[i].add_image(image);
            }
        }
        for comment in comments {
            if let Some(&i) = index.get(&comment.entry) {
                entries[i].add_comment(comment);
            }
        }

        Ok(())
    }
}

fn category_vanished(category_id: i32) -> AppError {
    AppError::Validation(format!("category: Category {} does not exist", category_id))
}

fn entry_vanished(id: i32) -> AppError {
    AppError::NotFound(format!("Entry {} not found", id))
}
