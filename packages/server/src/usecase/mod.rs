//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（ディスパッチャ）から呼び出され、Domain 層を操作します。

pub mod broadcast;
pub mod disconnect_connection;
pub mod join_room;
pub mod leave_room;
pub mod notice;
pub mod send_message;

pub use broadcast::{BroadcastReport, BroadcastUseCase};
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;
