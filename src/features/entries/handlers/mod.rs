mod entry_handler;

pub use entry_handler::*;
