pub mod auth;
pub mod categories;
pub mod entries;
pub mod users;
