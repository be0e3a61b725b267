//! Server state shared by the handlers.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    AuthorizeRoomUseCase, DeleteFileUseCase, DownloadFileUseCase, JoinRoomUseCase,
    LeaveRoomUseCase, ListFilesUseCase, UploadFileUseCase,
};

/// Shared application state
pub struct AppState {
    /// AuthorizeRoomUseCase（セッションのルーム確認）
    pub authorize_room_usecase: Arc<AuthorizeRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// ListFilesUseCase（ファイル一覧）
    pub list_files_usecase: Arc<ListFilesUseCase>,
    /// UploadFileUseCase（アップロード）
    pub upload_file_usecase: Arc<UploadFileUseCase>,
    /// DownloadFileUseCase（ダウンロード）
    pub download_file_usecase: Arc<DownloadFileUseCase>,
    /// DeleteFileUseCase（削除）
    pub delete_file_usecase: Arc<DeleteFileUseCase>,
    /// セッション Cookie の Max-Age（バインディングの無操作期限と同じ）
    pub session_ttl: Duration,
}
