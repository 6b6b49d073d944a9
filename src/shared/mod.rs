pub mod constants;
pub mod crud;
pub mod test_helpers;
pub mod types;
pub mod validation;
