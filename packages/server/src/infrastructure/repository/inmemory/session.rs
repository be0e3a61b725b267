//! InMemory SessionBinder 実装
//!
//! ドメイン層が定義する SessionBinder trait の具体的な実装。
//! HashMap をインメモリストアとして使用し、プロセス終了とともに破棄されます。
//!
//! 最後の利用から `idle_timeout` を過ぎたバインディングは無効となり、
//! `bind` のたびに掃除されます。Cookie を持たないクライアントが参加を
//! 繰り返してもマップが際限なく大きくならないようにするためです。

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use tokio::{sync::Mutex, time::Instant};

use crate::domain::{RoomCode, SessionBinder, SessionId};

/// バインディング 1 件
struct Binding {
    room: RoomCode,
    /// 最後に bind / current された時刻
    last_seen: Instant,
}

/// インメモリ SessionBinder 実装
pub struct InMemorySessionBinder {
    /// session → binding
    bindings: Mutex<HashMap<SessionId, Binding>>,
    /// この時間利用されなかったバインディングは破棄される
    idle_timeout: Duration,
}

impl InMemorySessionBinder {
    /// 新しい InMemorySessionBinder を作成
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            bindings: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// 現在のバインディング数を取得
    pub async fn count_bindings(&self) -> usize {
        self.bindings.lock().await.len()
    }

    /// 期限切れのバインディングを削除し、削除した件数を返す
    pub async fn evict_idle(&self) -> usize {
        let mut bindings = self.bindings.lock().await;
        let before = bindings.len();
        let now = Instant::now();
        bindings.retain(|_, binding| now.duration_since(binding.last_seen) <= self.idle_timeout);
        let evicted = before - bindings.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle session(s)", evicted);
        }
        evicted
    }
}

#[async_trait]
impl SessionBinder for InMemorySessionBinder {
    async fn bind(&self, session: SessionId, room: RoomCode) {
        self.evict_idle().await;
        self.bindings.lock().await.insert(
            session,
            Binding {
                room,
                last_seen: Instant::now(),
            },
        );
    }

    async fn current(&self, session: &SessionId) -> Option<RoomCode> {
        let mut bindings = self.bindings.lock().await;
        let now = Instant::now();
        match bindings.get_mut(session) {
            Some(binding) if now.duration_since(binding.last_seen) <= self.idle_timeout => {
                binding.last_seen = now;
                Some(binding.room.clone())
            }
            Some(_) => {
                bindings.remove(session);
                None
            }
            None => None,
        }
    }

    async fn unbind(&self, session: &SessionId) {
        self.bindings.lock().await.remove(session);
    }
}
