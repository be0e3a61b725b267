//! UseCase layer: application operations orchestrating the domain seams.

mod authorize_room;
mod delete_file;
mod download_file;
mod error;
mod join_room;
mod leave_room;
mod list_files;
mod sweep_expired_files;
mod upload_file;

pub use authorize_room::AuthorizeRoomUseCase;
pub use delete_file::DeleteFileUseCase;
pub use download_file::DownloadFileUseCase;
pub use error::{FileOperationError, JoinRoomError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_files::ListFilesUseCase;
pub use sweep_expired_files::{SweepExpiredFilesUseCase, SweepReport};
pub use upload_file::UploadFileUseCase;
