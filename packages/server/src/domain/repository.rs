//! Repository trait 定義
//!
//! UseCase 層はこれらの trait のみに依存します。
//! ファイルシステムによる実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{ContentStream, FileDownload, FileEntry, RoomHandle},
    error::StorageError,
    value_object::RoomCode,
};

/// RoomStore trait
///
/// 1 ルーム 1 名前空間のレイアウトを管理する。
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// ストレージルートがなければ作成（冪等）
    async fn ensure_root(&self) -> Result<(), StorageError>;

    /// 既存のルームのハンドルを取得（作成はしない）
    async fn resolve(&self, code: &RoomCode) -> Result<RoomHandle, StorageError>;

    /// ルームのハンドルを取得。作成が許可されていれば必要に応じて作成
    ///
    /// 同じルームを同時に作成しても、全ての呼び出しが成功する。
    async fn open_or_create(&self, code: &RoomCode) -> Result<RoomHandle, StorageError>;

    /// 空の場合のみルームを削除し、削除したかどうかを返す
    ///
    /// 失敗しない: 中身のあるルームや既にないルームはそのまま。
    async fn destroy_if_empty(&self, room: &RoomHandle) -> bool;

    /// 現在存在する全てのルーム
    async fn list_rooms(&self) -> Result<Vec<RoomHandle>, StorageError>;

    /// 新しいルームの作成が許可されているか
    fn allows_creation(&self) -> bool;
}

/// FileRegistry trait
///
/// 1 つのルームに閉じたファイル操作。
#[async_trait]
pub trait FileRegistry: Send + Sync {
    /// ルーム内のファイル一覧（新しい順）。空のルーム・存在しないルームは空の一覧
    async fn list(&self, room: &RoomHandle) -> Result<Vec<FileEntry>, StorageError>;

    /// アップロードを新しい保存名で保存
    ///
    /// `declared_size` があれば読み込み前に上限超過を拒否できる。
    /// ストリームのサイズは常に検査される。
    async fn store<'a>(
        &self,
        room: &RoomHandle,
        original_name: &str,
        declared_size: Option<u64>,
        content: ContentStream<'a>,
    ) -> Result<FileEntry, StorageError>;

    /// 保存名または content_id でファイルを削除
    async fn delete(&self, room: &RoomHandle, identifier: &str) -> Result<(), StorageError>;

    /// 保存名または content_id でファイルをストリーム用に開く
    async fn fetch_for_download(
        &self,
        room: &RoomHandle,
        identifier: &str,
    ) -> Result<FileDownload, StorageError>;

    /// `cutoff`（Unix 秒）より前に更新されたエントリを全て削除し、削除件数を返す
    ///
    /// ベストエフォート: 同時に消えたエントリは削除済みとして扱い、
    /// その他の失敗はログに残す。
    async fn remove_expired(&self, room: &RoomHandle, cutoff: i64) -> usize;
}
