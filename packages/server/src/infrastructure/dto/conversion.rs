//! Conversion logic between domain entities and DTOs.

use crate::domain::FileEntry;
use crate::infrastructure::dto::http as dto;

impl From<FileEntry> for dto::FileEntryDto {
    fn from(entry: FileEntry) -> Self {
        Self {
            id: entry.content_id,
            name: entry.display_name,
            realname: entry.stored_name.as_str().to_string(),
            size: entry.size,
            time: entry.modified_at,
        }
    }
}
