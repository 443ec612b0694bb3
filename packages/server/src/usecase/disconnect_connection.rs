//! UseCase: 接続切断時のクリーンアップ
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectConnectionUseCase::execute() メソッド
//! - 切断した接続を全てのルームから削除し、各ルームに切断通知を送る
//!
//! ### なぜこのテストが必要か
//! - 明示的に leave しないまま切断したクライアントが登録簿に残らないこと
//! - 複数のルームに参加していた場合も全てのルームから消えること
//! - 各ルームの残りメンバーに切断通知がちょうど 1 回届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 つのルームに参加したまま切断
//! - エッジケース：複数ルームに参加したまま切断
//! - エッジケース：どのルームにも参加していない接続の切断（通知なし）

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomName, RoomRepository};

use super::{
    broadcast::{BroadcastReport, BroadcastUseCase},
    notice,
};

/// 接続切断のユースケース
pub struct DisconnectConnectionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    broadcast: BroadcastUseCase,
}

impl DisconnectConnectionUseCase {
    /// 新しい DisconnectConnectionUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        let broadcast = BroadcastUseCase::new(repository.clone());
        Self {
            repository,
            broadcast,
        }
    }

    /// 切断処理を実行
    ///
    /// # Returns
    ///
    /// 接続が削除されたルームと、そのルームへの切断通知の配信結果
    pub async fn execute(&self, conn_id: &ConnectionId) -> Vec<(RoomName, BroadcastReport)> {
        let rooms = self
            .repository
            .remove_connection_from_all_rooms(conn_id)
            .await;

        let mut reports = Vec::with_capacity(rooms.len());
        for room in rooms {
            tracing::info!(room = %room, conn_id = %conn_id, "Client disconnected from room");
            let report = self.broadcast.execute(&room, &notice::disconnected()).await;
            reports.push((room, report));
        }
        reports
    }
}
