//! SessionBinder trait 定義
//!
//! セッションを高々 1 つのルームコードに対応付けます。ストレージ側は
//! セッションを参照せず、ハンドラが解決したルームコードを明示的に渡します。

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use super::value_object::RoomCode;

/// クライアントが保持するセッション識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// 新しいランダムなセッション識別子を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// クライアント側に保存された文字列表現を解析
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// SessionBinder trait
///
/// UseCase 層はこの trait に依存し、インメモリ実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionBinder: Send + Sync {
    /// セッションをルームにバインド（以前のバインドは置き換えられる）
    async fn bind(&self, session: SessionId, room: RoomCode);

    /// バインドされているルームコードを取得
    async fn current(&self, session: &SessionId) -> Option<RoomCode>;

    /// バインドを解除
    async fn unbind(&self, session: &SessionId);
}
