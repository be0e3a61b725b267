//! UseCase: ファイルダウンロード

use std::sync::Arc;

use crate::domain::{FileDownload, FileRegistry, RoomHandle};

use super::error::FileOperationError;

/// ファイルダウンロードのユースケース
pub struct DownloadFileUseCase {
    /// FileRegistry（ルーム内ファイルの管理）
    file_registry: Arc<dyn FileRegistry>,
}

impl DownloadFileUseCase {
    /// 新しい DownloadFileUseCase を作成
    pub fn new(file_registry: Arc<dyn FileRegistry>) -> Self {
        Self { file_registry }
    }

    /// 保存名または content_id でファイルを開く。内容はストリームで返す
    pub async fn execute(
        &self,
        room: &RoomHandle,
        identifier: &str,
    ) -> Result<FileDownload, FileOperationError> {
        Ok(self.file_registry.fetch_for_download(room, identifier).await?)
    }
}
