//! UseCase: ファイルアップロード
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UploadFileUseCase::execute() メソッド
//! - FileRegistry への委譲とエラーの変換
//!
//! ### どのような状況を想定しているか
//! - 正常系：アップロード後に一覧へ反映される
//! - 異常系：サイズ超過、空のファイル名

use std::sync::Arc;

use crate::domain::{ContentStream, FileEntry, FileRegistry, RoomHandle};

use super::error::FileOperationError;

/// ファイルアップロードのユースケース
pub struct UploadFileUseCase {
    /// FileRegistry（ルーム内ファイルの管理）
    file_registry: Arc<dyn FileRegistry>,
}

impl UploadFileUseCase {
    /// 新しい UploadFileUseCase を作成
    pub fn new(file_registry: Arc<dyn FileRegistry>) -> Self {
        Self { file_registry }
    }

    /// アップロードを実行
    ///
    /// # Arguments
    ///
    /// * `room` - アクセス確認済みのルーム
    /// * `original_name` - クライアントが送ったファイル名（サニタイズ前）
    /// * `declared_size` - 転送層が事前に把握しているサイズ（あれば）
    /// * `content` - ファイル内容のストリーム
    pub async fn execute<'a>(
        &self,
        room: &RoomHandle,
        original_name: &str,
        declared_size: Option<u64>,
        content: ContentStream<'a>,
    ) -> Result<FileEntry, FileOperationError> {
        Ok(self
            .file_registry
            .store(room, original_name, declared_size, content)
            .await?)
    }
}
