//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 退出した本人には退出通知が届かず、残りのメンバーにだけ届くこと
//! - 最後のメンバーが退出するとルーム自体が消えること
//! - 参加していないルームからの退出でもメンバーは変わらず、退出通知は届くこと

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomName, RoomRepository};

use super::{
    broadcast::{BroadcastReport, BroadcastUseCase},
    notice,
};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    broadcast: BroadcastUseCase,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        let broadcast = BroadcastUseCase::new(repository.clone());
        Self {
            repository,
            broadcast,
        }
    }

    /// ルーム退出を実行
    ///
    /// 退出後に残っているメンバーへ退出通知を配信する
    pub async fn execute(&self, room: &RoomName, conn_id: &ConnectionId) -> BroadcastReport {
        if self.repository.leave(room, conn_id).await {
            tracing::info!(room = %room, conn_id = %conn_id, "Client left room");
        } else {
            tracing::debug!(room = %room, conn_id = %conn_id, "Not a member");
        }

        self.broadcast.execute(room, &notice::left(room)).await
    }
}
