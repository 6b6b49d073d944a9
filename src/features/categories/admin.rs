use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::BillboardConfig;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::models::Category;
use crate::modules::audit::AuditLog;
use crate::shared::constants::{MANAGE_ROUTES_PREFIX, PUBLIC_ROUTES_PREFIX};
use crate::shared::crud::routing::default_route_pattern;
use crate::shared::crud::{
    AdminMetadata, Authorization, Breadcrumb, CrudAction, CrudRouting, FieldConfiguration,
    FieldKind, FieldOptions, FormMapper, ListMapper, Mutation, MutationHooks, Responsive,
    ShowMapper,
};

/// Admin of the bill-board categories.
///
/// Only holders of the manage privilege get in; every write ends up as a
/// German line in the platform log.
pub struct CategoryAdmin {
    audit_log: Arc<dyn AuditLog>,
    help: String,
}

impl CategoryAdmin {
    pub fn new(audit_log: Arc<dyn AuditLog>, config: &BillboardConfig) -> Self {
        Self {
            audit_log,
            help: config.help_url.clone(),
        }
    }
}

impl Authorization for CategoryAdmin {
    fn is_authorized(&self, user: &AuthenticatedUser) -> bool {
        user.can_manage_billboard()
    }
}

impl AdminMetadata for CategoryAdmin {
    fn id(&self) -> &str {
        "billboard_category"
    }

    fn title(&self) -> &str {
        "Categories"
    }

    fn item_title(&self) -> &str {
        "Category"
    }

    fn help(&self) -> Option<&str> {
        Some(&self.help)
    }

    fn prepare_breadcrumbs(&self, user: &AuthenticatedUser) -> Vec<Breadcrumb> {
        let path = if user.can_manage_billboard() {
            MANAGE_ROUTES_PREFIX.trim_end_matches('/')
        } else {
            PUBLIC_ROUTES_PREFIX.trim_end_matches('/')
        };

        vec![Breadcrumb {
            label: "Bill-Board".to_string(),
            path: path.to_string(),
        }]
    }
}

impl FieldConfiguration for CategoryAdmin {
    fn configure_list_fields(&self, mapper: &mut ListMapper) {
        mapper
            .add_identifier("title", FieldOptions::label("Title"))
            .add(
                "description",
                FieldOptions::label("Description").responsive(Responsive::Desktop),
            );
    }

    fn configure_show_fields(&self, mapper: &mut ShowMapper) {
        mapper
            .add("title", FieldOptions::label("Title"))
            .add("description", FieldOptions::label("Description"));
    }

    fn configure_form_fields(&self, mapper: &mut FormMapper) {
        mapper
            .add(
                "title",
                FieldOptions::label("Title").kind(FieldKind::Text).required(),
            )
            .add(
                "description",
                FieldOptions::label("Description")
                    .kind(FieldKind::Textarea)
                    .required(),
            );
    }
}

impl CrudRouting for CategoryAdmin {
    fn routes_prefix(&self) -> &str {
        MANAGE_ROUTES_PREFIX
    }

    // billboard/manage/category reads better than billboard/manage/billboard_category
    fn route_identifier(&self) -> &str {
        "category"
    }

    fn route_pattern(&self, action: CrudAction) -> String {
        // "categories", not "categorys"
        if action == CrudAction::Index {
            return format!("{}categories", self.routes_prefix());
        }

        default_route_pattern(self.routes_prefix(), self.route_identifier(), action)
    }
}

#[async_trait]
impl MutationHooks for CategoryAdmin {
    type Entity = Category;

    fn audit_log(&self) -> &dyn AuditLog {
        self.audit_log.as_ref()
    }

    fn describe(&self, mutation: Mutation<'_, Category>) -> String {
        match mutation {
            Mutation::Persisted(category) => {
                format!("Kategorie \"{}\" hinzugefügt", category.title)
            }
            Mutation::Updated { entity, previous } if entity.title != previous.title => format!(
                "Kategorie \"{}\" umbenannt nach \"{}\"",
                previous.title, entity.title
            ),
            Mutation::Updated { entity, .. } => format!("Kategorie \"{}\" verändert", entity.title),
            Mutation::Removed(category) => format!("Kategorie \"{}\" gelöscht", category.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::crud::AdminSchema;
    use crate::shared::test_helpers::{create_manager_user, create_member_user, MemoryAuditLog};

    fn admin_with_log() -> (CategoryAdmin, Arc<MemoryAuditLog>) {
        let log = Arc::new(MemoryAuditLog::default());
        let admin = CategoryAdmin::new(log.clone(), &BillboardConfig::default());
        (admin, log)
    }

    fn category(title: &str) -> Category {
        Category {
            id: 1,
            title: title.to_string(),
            description: "School events".to_string(),
        }
    }

    #[test]
    fn test_only_managers_are_authorized() {
        let (admin, _) = admin_with_log();
        assert!(admin.is_authorized(&create_manager_user()));
        assert!(!admin.is_authorized(&create_member_user()));
        assert!(admin.authorize(&create_member_user()).is_err());
    }

    #[test]
    fn test_index_route_uses_proper_plural() {
        let (admin, _) = admin_with_log();
        assert_eq!(
            admin.route_pattern(CrudAction::Index),
            "/api/billboard/manage/categories"
        );
        assert_eq!(
            admin.route_pattern(CrudAction::Show),
            "/api/billboard/manage/category/{id}"
        );
        assert_eq!(
            admin.route_pattern(CrudAction::Add),
            "/api/billboard/manage/category/add"
        );
    }

    #[test]
    fn test_rename_and_change_branches() {
        let (admin, _) = admin_with_log();
        let a = category("A");
        let b = category("B");

        assert_eq!(
            admin.describe(Mutation::Updated {
                entity: &b,
                previous: &a
            }),
            "Kategorie \"A\" umbenannt nach \"B\""
        );

        let mut a_changed = a.clone();
        a_changed.description = "Other".to_string();
        assert_eq!(
            admin.describe(Mutation::Updated {
                entity: &a_changed,
                previous: &a
            }),
            "Kategorie \"A\" verändert"
        );
    }

    #[tokio::test]
    async fn test_hooks_write_audit_lines() {
        let (admin, log) = admin_with_log();
        let manager = create_manager_user();
        let events = category("Events");

        admin.post_persist(&events, &manager).await;
        admin.post_remove(&events, &manager).await;

        assert_eq!(
            log.messages(),
            vec![
                "Kategorie \"Events\" hinzugefügt".to_string(),
                "Kategorie \"Events\" gelöscht".to_string(),
            ]
        );
        assert_eq!(log.actors()[0].as_deref(), Some("anna.schmidt"));
    }

    #[test]
    fn test_schema_mirrors_field_configuration() {
        let (admin, _) = admin_with_log();
        let schema = AdminSchema::describe(&admin, &create_member_user());

        assert_eq!(schema.id, "billboard_category");
        assert_eq!(schema.list_fields.len(), 2);
        assert!(schema.list_fields[0].identifier);
        assert_eq!(
            schema.list_fields[1].responsive,
            Some(Responsive::Desktop)
        );
        assert_eq!(schema.form_fields.len(), 2);
        assert_eq!(schema.breadcrumbs[0].path, "/api/billboard");
        assert_eq!(
            schema.help.as_deref(),
            Some(BillboardConfig::DEFAULT_HELP_URL)
        );
    }
}
