//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームコードの検証、ルームの作成、セッションへのバインド
//!
//! ### なぜこのテストが必要か
//! - 不正なコードでセッションがバインドされないことを保証
//! - 作成禁止時に存在しないルームへ参加できないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成と参加、既存ルームへの参加
//! - 異常系：短すぎる・長すぎるコード、作成禁止
//! - エッジケース：サニタイズ後に同じになるコード

use std::sync::Arc;

use crate::domain::{RoomCode, RoomCodePolicy, RoomStore, SessionBinder, SessionId};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// RoomStore（ルーム名前空間の管理）
    room_store: Arc<dyn RoomStore>,
    /// SessionBinder（セッションとルームの対応）
    sessions: Arc<dyn SessionBinder>,
    /// ルームコードの長さ制約
    policy: RoomCodePolicy,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        room_store: Arc<dyn RoomStore>,
        sessions: Arc<dyn SessionBinder>,
        policy: RoomCodePolicy,
    ) -> Self {
        Self {
            room_store,
            sessions,
            policy,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 参加するセッション
    /// * `raw_code` - 入力されたルームコード（サニタイズ前）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomCode)` - 参加したルームのコード（サニタイズ済み）
    /// * `Err(JoinRoomError)` - 参加失敗（セッションは変更されない）
    pub async fn execute(
        &self,
        session: SessionId,
        raw_code: &str,
    ) -> Result<RoomCode, JoinRoomError> {
        // 1. コードの検証
        let code = RoomCode::parse(raw_code, &self.policy)?;

        // 2. ルームを開く（必要なら作成）
        self.room_store.open_or_create(&code).await?;

        // 3. 検証・作成が済んでからバインド
        self.sessions.bind(session, code.clone()).await;
        tracing::info!("Session {} joined room {}", session, code);

        Ok(code)
    }
}
