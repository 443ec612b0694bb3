//! Infrastructure layer
//!
//! ドメイン層の trait の実装と、ワイヤーフォーマット（DTO）を提供します。

pub mod dto;
pub mod repository;
