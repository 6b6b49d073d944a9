/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// PRIVILEGES
// =============================================================================

/// Manage categories and moderate every entry
pub const PRIV_BILLBOARD_MANAGE: &str = "billboard_manage";

/// Post entries and edit own entries
pub const PRIV_BILLBOARD_CREATE: &str = "billboard_create";

// =============================================================================
// BILL-BOARD
// =============================================================================

/// Route prefix of the management area (categories)
pub const MANAGE_ROUTES_PREFIX: &str = "/api/billboard/manage/";

/// Route prefix of the user-facing bill-board (entries)
pub const PUBLIC_ROUTES_PREFIX: &str = "/api/billboard/";

/// Longest entry or comment title, counted after trimming
pub const TITLE_MAX_LENGTH: usize = 255;

/// Shown instead of an author that no longer resolves
pub const AUTHOR_PLACEHOLDER: &str = "?";
