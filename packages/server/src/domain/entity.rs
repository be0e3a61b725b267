//! Entity 定義
//!
//! ストレージの trait がやり取りするエンティティ。

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures_util::stream::BoxStream;

use super::value_object::{RoomCode, StoredName};

/// FileRegistry に渡されるアップロード本文（転送層から借用）
pub type ContentStream<'a> = BoxStream<'a, std::io::Result<Bytes>>;

/// 呼び出し元へストリームで返すダウンロード本文
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// 存在するルームへのハンドル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomHandle {
    code: RoomCode,
    path: PathBuf,
}

impl RoomHandle {
    pub fn new(code: RoomCode, path: PathBuf) -> Self {
        Self { code, path }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// ルームの実体となるディレクトリ
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// ルームに保存されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub stored_name: StoredName,
    /// サニタイズ後の元の名前（プレフィックスなし）
    pub display_name: String,
    pub size: u64,
    /// 最終更新時刻（Unix 秒）
    pub modified_at: i64,
    /// 保存名のハッシュ。クライアント向けの識別子
    pub content_id: String,
}

impl FileEntry {
    pub fn new(stored_name: StoredName, size: u64, modified_at: i64) -> Self {
        Self {
            display_name: stored_name.display_name().to_string(),
            content_id: stored_name.content_id(),
            stored_name,
            size,
            modified_at,
        }
    }
}

/// ストリームで返す準備ができたファイル
pub struct FileDownload {
    pub display_name: String,
    pub size: u64,
    pub content: ByteStream,
}
