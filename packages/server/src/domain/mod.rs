//! ドメイン層: Value Object・エンティティ・エラーと、ストレージ／セッションの trait

pub mod entity;
pub mod error;
pub mod repository;
pub mod session;
pub mod value_object;

pub use entity::{ByteStream, ContentStream, FileDownload, FileEntry, RoomHandle};
pub use error::{RoomCodeError, StorageError};
pub use repository::{FileRegistry, RoomStore};
pub use session::{SessionBinder, SessionId};
pub use value_object::{
    MAX_FILENAME_LENGTH, RoomCode, RoomCodePolicy, StoredName, is_content_id, sanitize_filename,
    sanitize_room_code,
};
