//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 内容が加工されずにルームの現在のメンバー全員（送信者を含む）へ届くこと
//! - 送信者がメンバーでなくても配信され、登録簿は変化しないこと

use std::sync::Arc;

use crate::domain::{MessageContent, RoomName, RoomRepository};

use super::broadcast::{BroadcastReport, BroadcastUseCase};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    broadcast: BroadcastUseCase,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self {
            broadcast: BroadcastUseCase::new(repository),
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 宛先ルーム（Domain Model）
    /// * `content` - メッセージ内容（Domain Model）
    pub async fn execute(&self, room: &RoomName, content: &MessageContent) -> BroadcastReport {
        tracing::info!(room = %room, len = content.as_str().len(), "Broadcasting message");
        self.broadcast.execute(room, content.as_str()).await
    }
}
