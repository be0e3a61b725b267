//! UseCase: 期限切れファイルの掃除
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SweepExpiredFilesUseCase::execute() メソッド
//! - 保持期間を過ぎたファイルの削除と、空になったルームの回収
//!
//! ### なぜこのテストが必要か
//! - ストレージ使用量を有限に保つ唯一の仕組み
//! - 保持期間内のファイルを誤って消さないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：保持期間 + 1 時間のファイルは削除、- 1 時間のファイルは残る
//! - 設定：保持期間 0 は無効、作成禁止時はルームを回収しない
//! - エッジケース：ルームが途中で消えている

use std::{sync::Arc, time::Duration};

use roomdrop_shared::time::{Clock, timestamp_to_rfc3339};

use crate::domain::{FileRegistry, RoomStore};

const SECS_PER_HOUR: i64 = 3600;

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub rooms_scanned: usize,
    pub files_removed: usize,
    pub rooms_removed: usize,
}

/// 期限切れファイル掃除のユースケース
pub struct SweepExpiredFilesUseCase {
    /// RoomStore（ルーム名前空間の管理）
    room_store: Arc<dyn RoomStore>,
    /// FileRegistry（ルーム内ファイルの管理）
    file_registry: Arc<dyn FileRegistry>,
    /// 現在時刻
    clock: Arc<dyn Clock>,
    /// 保持期間（時間）。0 は無効
    retention_hours: u64,
}

impl SweepExpiredFilesUseCase {
    /// 新しい SweepExpiredFilesUseCase を作成
    pub fn new(
        room_store: Arc<dyn RoomStore>,
        file_registry: Arc<dyn FileRegistry>,
        clock: Arc<dyn Clock>,
        retention_hours: u64,
    ) -> Self {
        Self {
            room_store,
            file_registry,
            clock,
            retention_hours,
        }
    }

    /// 掃除を 1 回実行
    ///
    /// エラーは呼び出し元に返さず、ログに残すだけ（ベストエフォート）
    pub async fn execute(&self) -> SweepReport {
        let mut report = SweepReport::default();
        if self.retention_hours == 0 {
            return report;
        }

        let retention_secs = i64::try_from(self.retention_hours)
            .unwrap_or(i64::MAX)
            .saturating_mul(SECS_PER_HOUR);
        let cutoff = self.clock.now_unix_secs().saturating_sub(retention_secs);

        let rooms = match self.room_store.list_rooms().await {
            Ok(rooms) => rooms,
            Err(e) => {
                tracing::debug!("Sweep skipped: {}", e);
                return report;
            }
        };

        // rooms cannot be recreated when creation is off, so keep them
        let reclaim_rooms = self.room_store.allows_creation();
        for room in rooms {
            report.rooms_scanned += 1;
            report.files_removed += self.file_registry.remove_expired(&room, cutoff).await;
            if reclaim_rooms && self.room_store.destroy_if_empty(&room).await {
                report.rooms_removed += 1;
            }
        }

        if report.files_removed > 0 || report.rooms_removed > 0 {
            tracing::info!(
                cutoff = %timestamp_to_rfc3339(cutoff).unwrap_or_default(),
                rooms_scanned = report.rooms_scanned,
                files_removed = report.files_removed,
                rooms_removed = report.rooms_removed,
                "Sweep finished"
            );
        }
        report
    }

    /// `period` ごとに掃除を繰り返す。最初の 1 回は即座に実行される
    pub async fn run_periodically(self: Arc<Self>, period: Duration) {
        if self.retention_hours == 0 {
            tracing::info!("Retention disabled, sweeper not started");
            return;
        }
        tracing::info!(
            "Sweeper started (retention {}h, every {:?})",
            self.retention_hours,
            period
        );
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.execute().await;
        }
    }
}
