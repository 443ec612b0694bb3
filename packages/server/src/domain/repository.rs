//! Repository trait
//!
//! ドメイン層が定義するルーム登録簿の抽象。
//! UseCase 層はこの trait に依存し、具体的な実装（InMemory など）には依存しません。

use async_trait::async_trait;

use super::{ConnectionHandle, ConnectionId, RoomName};

/// ルーム名 → メンバー集合 の登録簿
///
/// 全ての操作は他の操作に対してアトミックであり、
/// 途中まで更新されたメンバー集合を呼び出し側が観測することはない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 接続をルームに追加する（既に参加済みなら何もしない）。
    /// ルームが存在しなければ作成する。メンバーが増えた場合 `true`。
    async fn join(&self, room: &RoomName, conn: ConnectionHandle) -> bool;

    /// 接続をルームから削除する。空になったルームは削除する。
    /// メンバーが減った場合 `true`。
    async fn leave(&self, room: &RoomName, conn_id: &ConnectionId) -> bool;

    /// 現在のメンバーのスナップショット（参加順）。存在しないルームは空。
    async fn members(&self, room: &RoomName) -> Vec<ConnectionHandle>;

    /// 全てのルームから接続を削除し、削除元のルーム名を返す。
    async fn remove_connection_from_all_rooms(&self, conn_id: &ConnectionId) -> Vec<RoomName>;

    /// ルームが登録簿に存在するか
    async fn room_exists(&self, room: &RoomName) -> bool;

    /// 登録されているルーム数
    async fn room_count(&self) -> usize;
}
