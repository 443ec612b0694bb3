//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `DashMap` をインメモリ DB として使用します。
//!
//! ## ロック粒度
//!
//! `DashMap` はシャード単位でロックを持つため、別のルームに対する操作は
//! 互いにブロックしません。1 回の操作は対象エントリのシャードロックを
//! 1 つだけ保持し、await をまたいでロックを保持することはありません。
//!
//! ```text
//! join/leave   : entry() でシャードを排他 → 更新 → 空なら削除
//! members      : get() で共有ロック → クローン → 解放
//! remove_all   : retain() で各シャードを順に排他
//! ```

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{ConnectionHandle, ConnectionId, Room, RoomName, RoomRepository};

/// インメモリ Room Repository 実装
///
/// 「メンバーが 1 人以上いる ⇔ エントリが存在する」を常に保つ。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: DashMap<RoomName, Room>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(&self, room: &RoomName, conn: ConnectionHandle) -> bool {
        let conn_id = conn.id();
        let joined = self
            .rooms
            .entry(room.clone())
            .or_insert_with(|| Room::new(room.clone()))
            .join(conn);

        if joined {
            tracing::debug!(room = %room, conn_id = %conn_id, "Connection joined room");
        }
        joined
    }

    async fn leave(&self, room: &RoomName, conn_id: &ConnectionId) -> bool {
        let Entry::Occupied(mut entry) = self.rooms.entry(room.clone()) else {
            return false;
        };

        let left = entry.get_mut().leave(conn_id);
        if entry.get().is_empty() {
            entry.remove();
            tracing::debug!(room = %room, "Room emptied and removed");
        }

        if left {
            tracing::debug!(room = %room, conn_id = %conn_id, "Connection left room");
        }
        left
    }

    async fn members(&self, room: &RoomName) -> Vec<ConnectionHandle> {
        self.rooms
            .get(room)
            .map(|entry| entry.snapshot())
            .unwrap_or_default()
    }

    async fn remove_connection_from_all_rooms(&self, conn_id: &ConnectionId) -> Vec<RoomName> {
        let mut removed_from = Vec::new();
        self.rooms.retain(|name, room| {
            if room.leave(conn_id) {
                removed_from.push(name.clone());
            }
            !room.is_empty()
        });

        if !removed_from.is_empty() {
            tracing::debug!(
                conn_id = %conn_id,
                rooms = removed_from.len(),
                "Connection removed from all rooms"
            );
        }
        removed_from
    }

    async fn room_exists(&self, room: &RoomName) -> bool {
        self.rooms.contains_key(room)
    }

    async fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
