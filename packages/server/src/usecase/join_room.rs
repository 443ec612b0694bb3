//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 参加と同時に、参加者本人を含む現在のメンバーへ参加通知が届くこと
//! - 二重参加でメンバーは重複しないが、参加通知は毎回届くこと

use std::sync::Arc;

use crate::domain::{ConnectionHandle, RoomName, RoomRepository};

use super::{
    broadcast::{BroadcastReport, BroadcastUseCase},
    notice,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    broadcast: BroadcastUseCase,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        let broadcast = BroadcastUseCase::new(repository.clone());
        Self {
            repository,
            broadcast,
        }
    }

    /// ルーム参加を実行
    ///
    /// 既に参加済みでもメンバーは増えず、参加通知だけが現在のメンバーに配信される
    pub async fn execute(&self, room: &RoomName, conn: ConnectionHandle) -> BroadcastReport {
        let conn_id = conn.id();
        if self.repository.join(room, conn).await {
            tracing::info!(room = %room, conn_id = %conn_id, "Client joined room");
        } else {
            tracing::debug!(room = %room, conn_id = %conn_id, "Already a member");
        }

        self.broadcast.execute(room, &notice::joined(room)).await
    }
}
