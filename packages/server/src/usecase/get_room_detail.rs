//! UseCase: Room 詳細取得

use std::sync::Arc;

use crate::domain::{RoomKey, RoomRepository, RoomSnapshot};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース（診断・テスト用、状態を変更しない）
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Room の現在のスナップショットを取得
    pub async fn execute(&self, room_key: &RoomKey) -> Result<RoomSnapshot, GetRoomDetailError> {
        match self.repository.find(room_key).await {
            Some(coordinator) => Ok(coordinator.snapshot().await),
            None => Err(GetRoomDetailError::RoomNotFound(
                room_key.as_str().to_string(),
            )),
        }
    }
}
