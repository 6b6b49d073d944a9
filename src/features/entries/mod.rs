//! Bill-Board entries with their images and comments.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/billboard/entries` | List visible entries |
//! | GET | `/api/billboard/entries/schema` | Admin fields and routes |
//! | POST | `/api/billboard/entry/add` | Post entry (create privilege) |
//! | GET | `/api/billboard/entry/{id}` | Show entry |
//! | PUT | `/api/billboard/entry/{id}/edit` | Edit entry (author or manager) |
//! | DELETE | `/api/billboard/entry/{id}/delete` | Delete entry (author or manager) |
//! | POST | `/api/billboard/entry/{id}/images` | Attach image (author or manager) |
//! | DELETE | `/api/billboard/entry/{id}/images/{image_id}` | Remove image (author or manager) |
//! | POST | `/api/billboard/entry/{id}/comments` | Comment, unless the entry is closed |
//! | DELETE | `/api/billboard/entry/{id}/comments/{comment_id}` | Delete comment (comment author or manager) |

pub mod admin;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use admin::EntryAdmin;
pub use services::EntryService;
pub use state::EntryState;
