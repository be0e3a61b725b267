//! UseCase: ルームへのアクセス確認
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AuthorizeRoomUseCase::execute() / current_room()
//! - セッションにバインドされたルームの解決
//!
//! ### なぜこのテストが必要か
//! - 全てのファイル操作はストレージに触れる前にこの確認を通る
//! - 未バインド・作成禁止のルームは Unauthorized となり、内部エラーにならないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：バインド済みのルーム
//! - 異常系：セッションなし、未バインド、作成禁止で削除済みのルーム
//! - エッジケース：掃除で回収されたルームの再作成

use std::sync::Arc;

use crate::domain::{RoomCode, RoomHandle, RoomStore, SessionBinder, SessionId, StorageError};

use super::error::FileOperationError;

/// ルームへのアクセス確認のユースケース
pub struct AuthorizeRoomUseCase {
    /// SessionBinder（セッションとルームの対応）
    sessions: Arc<dyn SessionBinder>,
    /// RoomStore（ルーム名前空間の管理）
    room_store: Arc<dyn RoomStore>,
}

impl AuthorizeRoomUseCase {
    /// 新しい AuthorizeRoomUseCase を作成
    pub fn new(sessions: Arc<dyn SessionBinder>, room_store: Arc<dyn RoomStore>) -> Self {
        Self {
            sessions,
            room_store,
        }
    }

    /// セッションにバインドされているルームコードを取得
    pub async fn current_room(&self, session: Option<&SessionId>) -> Option<RoomCode> {
        match session {
            Some(session) => self.sessions.current(session).await,
            None => None,
        }
    }

    /// アクセス確認を実行
    ///
    /// バインド済みのルームが掃除で回収されていた場合は、作成が許可されていれば
    /// 空のルームとして開き直します。
    ///
    /// # Returns
    ///
    /// * `Ok(RoomHandle)` - 操作対象のルーム
    /// * `Err(FileOperationError::Unauthorized)` - 有効なルームにバインドされていない
    pub async fn execute(&self, session: Option<&SessionId>) -> Result<RoomHandle, FileOperationError> {
        let code = self
            .current_room(session)
            .await
            .ok_or(FileOperationError::Unauthorized)?;

        match self.room_store.open_or_create(&code).await {
            Ok(room) => Ok(room),
            Err(StorageError::CreationDisallowed) => {
                tracing::debug!("Room {} no longer exists", code);
                Err(FileOperationError::Unauthorized)
            }
            Err(e) => Err(e.into()),
        }
    }
}
