//! Repository パターンの実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装を提供します。
//! UseCase 層は trait に依存し、この実装には直接依存しません（依存性の逆転）。

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;
