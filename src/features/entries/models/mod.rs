mod entry;
mod entry_comment;
mod entry_image;

pub use entry::{Entry, EntryRow};
pub use entry_comment::EntryComment;
pub use entry_image::EntryImage;
