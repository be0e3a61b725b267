//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RoomCodeError, StorageError};

/// ルーム参加時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// ルームコードの長さが範囲外
    #[error(transparent)]
    InvalidRoomCode(#[from] RoomCodeError),

    /// ルームが存在せず、作成も禁止されている
    ///
    /// 外部からは「存在しない」と「ポリシーで禁止」を区別させない
    #[error("Room code invalid.")]
    CreationDisallowed,

    /// ストレージ障害
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for JoinRoomError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::CreationDisallowed => Self::CreationDisallowed,
            other => Self::Storage(other),
        }
    }
}

/// ファイル操作時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileOperationError {
    /// 有効なルームにバインドされていない
    #[error("Invalid room")]
    Unauthorized,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
