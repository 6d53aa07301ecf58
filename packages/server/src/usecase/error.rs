//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RoomError;

/// 参加（join）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Room の作成と削除が競合し続け、join できなかった
    #[error("Room '{0}' is unavailable")]
    RoomUnavailable(String),
}

/// デザイン更新のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateDesignError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// Room 詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}
