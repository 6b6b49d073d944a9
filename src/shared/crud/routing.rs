use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CrudAction {
    Index,
    Add,
    Show,
    Edit,
    Delete,
}

impl CrudAction {
    pub const ALL: [CrudAction; 5] = [
        CrudAction::Index,
        CrudAction::Add,
        CrudAction::Show,
        CrudAction::Edit,
        CrudAction::Delete,
    ];

    /// HTTP method the action is served under
    pub fn method(&self) -> &'static str {
        match self {
            CrudAction::Index | CrudAction::Show => "GET",
            CrudAction::Add => "POST",
            CrudAction::Edit => "PUT",
            CrudAction::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RouteDescriptor {
    pub action: CrudAction,
    pub method: String,
    pub path: String,
}

/// Route pattern an admin gets unless it overrides one.
///
/// Index pluralizes the identifier naively by appending `s`.
pub fn default_route_pattern(prefix: &str, identifier: &str, action: CrudAction) -> String {
    match action {
        CrudAction::Index => format!("{}{}s", prefix, identifier),
        CrudAction::Add => format!("{}{}/add", prefix, identifier),
        CrudAction::Show => format!("{}{}/{{id}}", prefix, identifier),
        CrudAction::Edit => format!("{}{}/{{id}}/edit", prefix, identifier),
        CrudAction::Delete => format!("{}{}/{{id}}/delete", prefix, identifier),
    }
}

/// Route naming capability of an admin
pub trait CrudRouting {
    /// Common prefix, ending in `/`
    fn routes_prefix(&self) -> &str;

    /// Singular path segment naming the entity
    fn route_identifier(&self) -> &str;

    fn route_pattern(&self, action: CrudAction) -> String {
        default_route_pattern(self.routes_prefix(), self.route_identifier(), action)
    }

    fn route_table(&self) -> Vec<RouteDescriptor> {
        CrudAction::ALL
            .iter()
            .map(|action| RouteDescriptor {
                action: *action,
                method: action.method().to_string(),
                path: self.route_pattern(*action),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl CrudRouting for Plain {
        fn routes_prefix(&self) -> &str {
            "/api/things/"
        }

        fn route_identifier(&self) -> &str {
            "thing"
        }
    }

    #[test]
    fn test_default_patterns() {
        let admin = Plain;
        assert_eq!(admin.route_pattern(CrudAction::Index), "/api/things/things");
        assert_eq!(admin.route_pattern(CrudAction::Add), "/api/things/thing/add");
        assert_eq!(admin.route_pattern(CrudAction::Show), "/api/things/thing/{id}");
        assert_eq!(
            admin.route_pattern(CrudAction::Edit),
            "/api/things/thing/{id}/edit"
        );
        assert_eq!(
            admin.route_pattern(CrudAction::Delete),
            "/api/things/thing/{id}/delete"
        );
    }

    #[test]
    fn test_route_table_covers_every_action() {
        let table = Plain.route_table();
        assert_eq!(table.len(), CrudAction::ALL.len());
        assert_eq!(table[1].method, "POST");
        assert_eq!(table[4].method, "DELETE");
    }
}
