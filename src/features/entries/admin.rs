use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::BillboardConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::entries::models::{Entry, EntryComment};
use crate::modules::audit::AuditLog;
use crate::shared::constants::PUBLIC_ROUTES_PREFIX;
use crate::shared::crud::routing::default_route_pattern;
use crate::shared::crud::{
    AdminMetadata, Authorization, Breadcrumb, CrudAction, CrudRouting, FieldConfiguration,
    FieldKind, FieldOptions, FormMapper, ListMapper, Mutation, MutationHooks, Responsive,
    ShowMapper,
};

/// Change to the images or comments of an entry
#[derive(Debug)]
pub enum AttachmentChange<'a> {
    ImageAdded,
    ImageRemoved,
    CommentAdded(&'a EntryComment),
    CommentRemoved(&'a EntryComment),
}

/// Admin of the bill-board entries.
///
/// Every authenticated user may read the board. Posting needs the create
/// privilege; authors look after their own entries and managers after all
/// of them.
pub struct EntryAdmin {
    audit_log: Arc<dyn AuditLog>,
    help: String,
}

impl EntryAdmin {
    pub fn new(audit_log: Arc<dyn AuditLog>, config: &BillboardConfig) -> Self {
        Self {
            audit_log,
            help: config.help_url.clone(),
        }
    }

    pub fn authorize_modify(&self, user: &AuthenticatedUser, entry: &Entry) -> Result<()> {
        if user.can_modify(entry.author_act()) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only the author or a Bill-Board manager may change this entry".to_string(),
            ))
        }
    }

    pub fn authorize_comment_removal(
        &self,
        user: &AuthenticatedUser,
        comment: &EntryComment,
    ) -> Result<()> {
        if user.can_modify(comment.author.as_deref()) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only the author or a Bill-Board manager may delete this comment".to_string(),
            ))
        }
    }

    pub fn describe_attachment(&self, entry: &Entry, change: AttachmentChange<'_>) -> String {
        match change {
            AttachmentChange::ImageAdded => format!("Bild zu Eintrag \"{}\" hinzugefügt", entry),
            AttachmentChange::ImageRemoved => format!("Bild von Eintrag \"{}\" entfernt", entry),
            AttachmentChange::CommentAdded(comment) => format!(
                "Kommentar \"{}\" zu Eintrag \"{}\" hinzugefügt",
                comment, entry
            ),
            AttachmentChange::CommentRemoved(comment) => format!(
                "Kommentar \"{}\" von Eintrag \"{}\" gelöscht",
                comment, entry
            ),
        }
    }

    pub async fn post_attachment(
        &self,
        entry: &Entry,
        change: AttachmentChange<'_>,
        actor: &AuthenticatedUser,
    ) {
        let message = self.describe_attachment(entry, change);
        self.audit_log.record(&message, Some(&actor.act)).await;
    }
}

impl Authorization for EntryAdmin {
    fn is_authorized(&self, _user: &AuthenticatedUser) -> bool {
        true
    }
}

impl AdminMetadata for EntryAdmin {
    fn id(&self) -> &str {
        "billboard"
    }

    fn title(&self) -> &str {
        "Entries"
    }

    fn item_title(&self) -> &str {
        "Entry"
    }

    fn help(&self) -> Option<&str> {
        Some(&self.help)
    }

    fn prepare_breadcrumbs(&self, _user: &AuthenticatedUser) -> Vec<Breadcrumb> {
        vec![Breadcrumb {
            label: "Bill-Board".to_string(),
            path: self.route_pattern(CrudAction::Index),
        }]
    }
}

impl FieldConfiguration for EntryAdmin {
    fn configure_list_fields(&self, mapper: &mut ListMapper) {
        mapper
            .add_identifier("title", FieldOptions::label("Title"))
            .add(
                "category",
                FieldOptions::label("Category").responsive(Responsive::Desktop),
            )
            .add(
                "author_display",
                FieldOptions::label("Author").responsive(Responsive::Desktop),
            )
            .add("time", FieldOptions::label("Added"));
    }

    fn configure_show_fields(&self, mapper: &mut ShowMapper) {
        mapper
            .add("title", FieldOptions::label("Title"))
            .add("description", FieldOptions::label("Text"))
            .add("category", FieldOptions::label("Category"))
            .add("author_display", FieldOptions::label("Author"))
            .add("time", FieldOptions::label("Added"))
            .add("updated_at", FieldOptions::label("Last refresh"))
            .add("images", FieldOptions::label("Images"))
            .add("comments", FieldOptions::label("Comments"));
    }

    fn configure_form_fields(&self, mapper: &mut FormMapper) {
        mapper
            .add(
                "title",
                FieldOptions::label("Title").kind(FieldKind::Text).required(),
            )
            .add(
                "description",
                FieldOptions::label("Text")
                    .kind(FieldKind::Textarea)
                    .required(),
            )
            .add(
                "category_id",
                FieldOptions::label("Category")
                    .kind(FieldKind::Choice)
                    .required(),
            )
            .add(
                "visible",
                FieldOptions::label("Visible").kind(FieldKind::Checkbox),
            )
            .add(
                "closed",
                FieldOptions::label("Closed for comments").kind(FieldKind::Checkbox),
            );
    }
}

impl CrudRouting for EntryAdmin {
    fn routes_prefix(&self) -> &str {
        PUBLIC_ROUTES_PREFIX
    }

    fn route_identifier(&self) -> &str {
        "entry"
    }

    fn route_pattern(&self, action: CrudAction) -> String {
        if action == CrudAction::Index {
            return format!("{}entries", self.routes_prefix());
        }

        default_route_pattern(self.routes_prefix(), self.route_identifier(), action)
    }
}

#[async_trait]
impl MutationHooks for EntryAdmin {
    type Entity = Entry;

    fn audit_log(&self) -> &dyn AuditLog {
        self.audit_log.as_ref()
    }

    fn describe(&self, mutation: Mutation<'_, Entry>) -> String {
        match mutation {
            Mutation::Persisted(entry) => format!("Eintrag \"{}\" hinzugefügt", entry),
            Mutation::Updated { entity, previous } if entity.title() != previous.title() => {
                format!("Eintrag \"{}\" umbenannt nach \"{}\"", previous, entity)
            }
            Mutation::Updated { entity, .. } => format!("Eintrag \"{}\" verändert", entity),
            Mutation::Removed(entry) => format!("Eintrag \"{}\" gelöscht", entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::features::users::User;
    use crate::shared::test_helpers::{
        create_guest_user, create_manager_user, create_member_user, MemoryAuditLog,
    };

    fn admin_with_log() -> (EntryAdmin, Arc<MemoryAuditLog>) {
        let log = Arc::new(MemoryAuditLog::default());
        let admin = EntryAdmin::new(log.clone(), &BillboardConfig::default());
        (admin, log)
    }

    fn entry(title: &str) -> Entry {
        let mut entry = Entry::new();
        entry.set_title(title);
        entry.set_description("Monday 9am");
        entry
    }

    fn comment(author: Option<&str>) -> EntryComment {
        EntryComment {
            id: 1,
            entry: 1,
            title: "Thanks".to_string(),
            content: "See you there".to_string(),
            author: author.map(str::to_string),
            time: Utc::now(),
        }
    }

    #[test]
    fn test_index_route_uses_proper_plural() {
        let (admin, _) = admin_with_log();
        assert_eq!(
            admin.route_pattern(CrudAction::Index),
            "/api/billboard/entries"
        );
        assert_eq!(
            admin.route_pattern(CrudAction::Edit),
            "/api/billboard/entry/{id}/edit"
        );
    }

    #[test]
    fn test_rename_and_change_branches() {
        let (admin, _) = admin_with_log();
        let before = entry("Assembly");
        let renamed = entry("General Assembly");

        assert_eq!(
            admin.describe(Mutation::Updated {
                entity: &renamed,
                previous: &before
            }),
            "Eintrag \"Assembly\" umbenannt nach \"General Assembly\""
        );

        let mut changed = before.clone();
        changed.set_closed(true);
        assert_eq!(
            admin.describe(Mutation::Updated {
                entity: &changed,
                previous: &before
            }),
            "Eintrag \"Assembly\" verändert"
        );
    }

    #[test]
    fn test_only_authors_and_managers_modify() {
        let (admin, _) = admin_with_log();
        let mut own = entry("Assembly");
        own.set_author(Some(User {
            act: "max.mustermann".to_string(),
            firstname: "Max".to_string(),
            lastname: "Mustermann".to_string(),
            deleted: None,
        }));

        assert!(admin.authorize_modify(&create_member_user(), &own).is_ok());
        assert!(admin.authorize_modify(&create_manager_user(), &own).is_ok());
        assert!(admin.authorize_modify(&create_guest_user(), &own).is_err());

        let orphaned = entry("Assembly");
        assert!(admin
            .authorize_modify(&create_member_user(), &orphaned)
            .is_err());
        assert!(admin
            .authorize_modify(&create_manager_user(), &orphaned)
            .is_ok());
    }

    #[test]
    fn test_comment_removal_rights() {
        let (admin, _) = admin_with_log();
        let foreign = comment(Some("erika.musterfrau"));

        assert!(admin
            .authorize_comment_removal(&create_member_user(), &foreign)
            .is_err());
        assert!(admin
            .authorize_comment_removal(&create_manager_user(), &foreign)
            .is_ok());
    }

    #[tokio::test]
    async fn test_attachment_lines() {
        let (admin, log) = admin_with_log();
        let assembly = entry("Assembly");
        let thanks = comment(None);
        let member = create_member_user();

        admin
            .post_attachment(&assembly, AttachmentChange::ImageAdded, &member)
            .await;
        admin
            .post_attachment(&assembly, AttachmentChange::ImageRemoved, &member)
            .await;
        admin
            .post_attachment(&assembly, AttachmentChange::CommentAdded(&thanks), &member)
            .await;
        admin
            .post_attachment(&assembly, AttachmentChange::CommentRemoved(&thanks), &member)
            .await;

        assert_eq!(
            log.messages(),
            vec![
                "Bild zu Eintrag \"Assembly\" hinzugefügt".to_string(),
                "Bild von Eintrag \"Assembly\" entfernt".to_string(),
                "Kommentar \"Thanks\" zu Eintrag \"Assembly\" hinzugefügt".to_string(),
                "Kommentar \"Thanks\" von Eintrag \"Assembly\" gelöscht".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_hooks_write_audit_lines() {
        let (admin, log) = admin_with_log();
        let assembly = entry("Assembly");

        admin.post_persist(&assembly, &create_member_user()).await;
        admin.post_remove(&assembly, &create_manager_user()).await;

        assert_eq!(
            log.messages(),
            vec![
                "Eintrag \"Assembly\" hinzugefügt".to_string(),
                "Eintrag \"Assembly\" gelöscht".to_string(),
            ]
        );
        assert_eq!(
            log.actors(),
            vec![
                Some("max.mustermann".to_string()),
                Some("anna.schmidt".to_string())
            ]
        );
    }
}
