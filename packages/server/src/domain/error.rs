//! ドメイン層のエラー定義

use thiserror::Error;

/// ルームコードの拒否理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomCodeError {
    #[error("Room code too short (min {min} characters)")]
    TooShort { min: usize },

    #[error("Room code too long (max {max} characters)")]
    TooLong { max: usize },
}

/// ルーム・ファイルストレージのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// ルームが存在しない
    #[error("Room not found")]
    RoomNotFound,

    /// ルームが存在せず、作成も禁止されている
    #[error("Room code invalid.")]
    CreationDisallowed,

    /// 指定されたファイルが存在しない（削除済み・期限切れ・最初から存在しない）
    #[error("File not found")]
    FileNotFound,

    /// サニタイズ後に空になる、またはルーム外を指すファイル名
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File too large (max {})", format_size(.limit))]
    TooLarge { limit: u64 },

    /// 転送層がアップロードの中断・失敗を報告した
    #[error("Upload failed: {0}")]
    UploadTransport(String),

    #[error("Storage not writable: {0}")]
    Unwritable(String),

    #[error("Storage not readable: {0}")]
    Unreadable(String),
}

/// 上限メッセージ用のサイズ表記
fn format_size(bytes: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if *bytes >= MIB {
        format!("{}MB", (*bytes + MIB / 2) / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
