//! Capabilities an entity admin is composed of.
//!
//! An admin implements only the traits it needs: field configuration,
//! authorization, route naming ([`CrudRouting`]) and mutation hooks.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::mapper::{FieldDescriptor, FormMapper, ListMapper, ShowMapper};
use super::routing::{CrudRouting, RouteDescriptor};
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::modules::audit::AuditLog;

pub trait FieldConfiguration {
    fn configure_list_fields(&self, mapper: &mut ListMapper);
    fn configure_show_fields(&self, mapper: &mut ShowMapper);
    fn configure_form_fields(&self, mapper: &mut FormMapper);
}

pub trait Authorization {
    /// Whether the principal may use this admin at all
    fn is_authorized(&self, user: &AuthenticatedUser) -> bool;

    fn authorize(&self, user: &AuthenticatedUser) -> Result<()> {
        if self.is_authorized(user) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You are not allowed to access this area".to_string(),
            ))
        }
    }
}

/// Extractor yielding the principal once admin `A` authorized it.
///
/// Runs before the request body is read, so unauthorized callers never get
/// validation feedback.
pub struct Authorized<A> {
    pub user: AuthenticatedUser,
    _admin: PhantomData<fn() -> A>,
}

impl<A, S> FromRequestParts<S> for Authorized<A>
where
    A: Authorization + Send + Sync + 'static,
    Arc<A>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        Arc::<A>::from_ref(state).authorize(&user)?;

        Ok(Self {
            user,
            _admin: PhantomData,
        })
    }
}

/// A completed write, as seen by the post hooks
#[derive(Debug)]
pub enum Mutation<'a, E> {
    Persisted(&'a E),
    Updated { entity: &'a E, previous: &'a E },
    Removed(&'a E),
}

#[async_trait]
pub trait MutationHooks: Send + Sync {
    type Entity: Send + Sync;

    fn audit_log(&self) -> &dyn AuditLog;

    /// Human readable audit line for a mutation
    fn describe(&self, mutation: Mutation<'_, Self::Entity>) -> String;

    async fn on_mutated(&self, mutation: Mutation<'_, Self::Entity>, actor: &AuthenticatedUser) {
        let message = self.describe(mutation);
        self.audit_log().record(&message, Some(&actor.act)).await;
    }

    async fn post_persist(&self, entity: &Self::Entity, actor: &AuthenticatedUser) {
        self.on_mutated(Mutation::Persisted(entity), actor).await;
    }

    async fn post_update(
        &self,
        entity: &Self::Entity,
        previous: &Self::Entity,
        actor: &AuthenticatedUser,
    ) {
        self.on_mutated(Mutation::Updated { entity, previous }, actor)
            .await;
    }

    async fn post_remove(&self, entity: &Self::Entity, actor: &AuthenticatedUser) {
        self.on_mutated(Mutation::Removed(entity), actor).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
}

/// Titles and navigation of an admin
pub trait AdminMetadata {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn item_title(&self) -> &str;

    fn help(&self) -> Option<&str> {
        None
    }

    fn prepare_breadcrumbs(&self, _user: &AuthenticatedUser) -> Vec<Breadcrumb> {
        Vec::new()
    }
}

/// Everything a client needs to render an admin's list, show and form views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminSchema {
    pub id: String,
    pub title: String,
    pub item_title: String,
    pub help: Option<String>,
    pub list_fields: Vec<FieldDescriptor>,
    pub show_fields: Vec<FieldDescriptor>,
    pub form_fields: Vec<FieldDescriptor>,
    pub routes: Vec<RouteDescriptor>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl AdminSchema {
    pub fn describe<A>(admin: &A, user: &AuthenticatedUser) -> Self
    where
        A: AdminMetadata + FieldConfiguration + CrudRouting,
    {
        let mut list = ListMapper::default();
        admin.configure_list_fields(&mut list);
        let mut show = ShowMapper::default();
        admin.configure_show_fields(&mut show);
        let mut form = FormMapper::default();
        admin.configure_form_fields(&mut form);

        Self {
            id: admin.id().to_string(),
            title: admin.title().to_string(),
            item_title: admin.item_title().to_string(),
            help: admin.help().map(str::to_string),
            list_fields: list.into_fields(),
            show_fields: show.into_fields(),
            form_fields: form.into_fields(),
            routes: admin.route_table(),
            breadcrumbs: admin.prepare_breadcrumbs(user),
        }
    }
}
