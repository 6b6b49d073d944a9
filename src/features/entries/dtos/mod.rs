mod entry_dto;

pub use entry_dto::{
    CreateEntryCommentDto, CreateEntryDto, CreateEntryImageDto, EntryCommentResponseDto,
    EntryImageResponseDto, EntryListQuery, EntryResponseDto, UpdateEntryDto,
};
