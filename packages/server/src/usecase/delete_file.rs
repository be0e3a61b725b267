//! UseCase: ファイル削除

use std::sync::Arc;

use crate::domain::{FileRegistry, RoomHandle};

use super::error::FileOperationError;

/// ファイル削除のユースケース
pub struct DeleteFileUseCase {
    /// FileRegistry（ルーム内ファイルの管理）
    file_registry: Arc<dyn FileRegistry>,
}

impl DeleteFileUseCase {
    /// 新しい DeleteFileUseCase を作成
    pub fn new(file_registry: Arc<dyn FileRegistry>) -> Self {
        Self { file_registry }
    }

    /// 保存名または content_id でファイルを削除
    ///
    /// 既に削除・期限切れになったファイルは `FileNotFound` として扱い、
    /// 他の利用者による削除と区別しない
    pub async fn execute(&self, room: &RoomHandle, identifier: &str) -> Result<(), FileOperationError> {
        Ok(self.file_registry.delete(room, identifier).await?)
    }
}
