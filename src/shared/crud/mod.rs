//! Generic admin-CRUD building blocks shared by the bill-board admins.

pub mod admin;
pub mod mapper;
pub mod routing;

pub use admin::{
    AdminMetadata, AdminSchema, Authorization, Authorized, Breadcrumb, FieldConfiguration,
    Mutation, MutationHooks,
};
pub use mapper::{FieldKind, FieldOptions, FormMapper, ListMapper, Responsive, ShowMapper};
pub use routing::{CrudAction, CrudRouting};
