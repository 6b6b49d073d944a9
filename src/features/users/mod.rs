//! Platform users as seen by the bill-board.
//!
//! Accounts are owned by the platform; the bill-board only reads them to
//! resolve entry authors.

pub mod models;

pub use models::User;
