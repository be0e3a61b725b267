//! UseCase: ルーム退出処理

use std::sync::Arc;

use crate::domain::{SessionBinder, SessionId};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// SessionBinder（セッションとルームの対応）
    sessions: Arc<dyn SessionBinder>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(sessions: Arc<dyn SessionBinder>) -> Self {
        Self { sessions }
    }

    /// セッションのバインドを解除する。未バインドでも成功する（冪等性）
    pub async fn execute(&self, session: Option<&SessionId>) {
        if let Some(session) = session {
            self.sessions.unbind(session).await;
            tracing::info!("Session {} left its room", session);
        }
    }
}
