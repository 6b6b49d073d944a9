//! Bill-Board categories, managed through the category admin.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Privilege | Description |
//! |--------|----------|-----------|-------------|
//! | GET | `/api/billboard/manage/categories` | manage | List categories |
//! | GET | `/api/billboard/manage/categories/schema` | manage | Admin fields and routes |
//! | POST | `/api/billboard/manage/category/add` | manage | Create category |
//! | GET | `/api/billboard/manage/category/{id}` | manage | Show category |
//! | PUT | `/api/billboard/manage/category/{id}/edit` | manage | Edit category |
//! | DELETE | `/api/billboard/manage/category/{id}/delete` | manage | Delete category |

pub mod admin;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use admin::CategoryAdmin;
pub use services::CategoryService;
pub use state::CategoryState;
