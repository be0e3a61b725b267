//! UseCase: ファイル一覧取得

use std::sync::Arc;

use crate::domain::{FileEntry, FileRegistry, RoomHandle};

use super::error::FileOperationError;

/// ファイル一覧取得のユースケース
pub struct ListFilesUseCase {
    /// FileRegistry（ルーム内ファイルの管理）
    file_registry: Arc<dyn FileRegistry>,
}

impl ListFilesUseCase {
    /// 新しい ListFilesUseCase を作成
    pub fn new(file_registry: Arc<dyn FileRegistry>) -> Self {
        Self { file_registry }
    }

    /// ルーム内のファイルを新しい順に取得
    pub async fn execute(&self, room: &RoomHandle) -> Result<Vec<FileEntry>, FileOperationError> {
        Ok(self.file_registry.list(room).await?)
    }
}
