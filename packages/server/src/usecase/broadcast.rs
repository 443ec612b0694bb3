//! UseCase: ルームへのブロードキャスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastUseCase::execute() メソッド
//! - メンバーのスナップショットに対するファンアウト配信
//!
//! ### なぜこのテストが必要か
//! - 他のユースケース（参加・退出・送信・切断）は全てここを経由して配信する
//! - 1 人への配信失敗が残りのメンバーへの配信を止めないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：全メンバーに 1 回ずつ届く
//! - 異常系：途中のメンバーの writer が停止している
//! - エッジケース：存在しないルームへの配信

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomName, RoomRepository};

/// 1 回のブロードキャストの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 配信キューに積めたメンバー数
    pub delivered: usize,
    /// 配信に失敗したメンバー（登録簿からは削除しない）
    pub failed: Vec<ConnectionId>,
}

impl BroadcastReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// ブロードキャストのユースケース
pub struct BroadcastUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl BroadcastUseCase {
    /// 新しい BroadcastUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームの現在のメンバー全員に `payload` を配信する
    ///
    /// メンバーのスナップショットを取得した後はロックを保持せずに送信する。
    /// 送信はスナップショットの順（参加順）で行い、失敗しても続行する。
    pub async fn execute(&self, room: &RoomName, payload: &str) -> BroadcastReport {
        let members = self.repository.members(room).await;
        let mut report = BroadcastReport::default();

        for member in members {
            match member.send_text(payload) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(room = %room, error = %e, "Failed to broadcast to member");
                    report.failed.push(member.id());
                }
            }
        }

        tracing::debug!(
            room = %room,
            delivered = report.delivered,
            failed = report.failed.len(),
            "Broadcast finished"
        );
        report
    }
}
