//! UseCase: Room 一覧取得

use std::sync::Arc;

use crate::domain::{RoomRepository, RoomSnapshot};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全 Room のスナップショットを Room キー順に取得
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for coordinator in self.repository.list().await {
            snapshots.push(coordinator.snapshot().await);
        }
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::RoomKey,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };
    use hiroba_shared::time::FixedClock;

    #[tokio::test]
    async fn test_get_rooms_sorted_by_key() {
        // テスト項目: Room 一覧が Room キー順に返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(
            WebSocketMessagePusher::factory(),
            Arc::new(FixedClock::new(1000)),
        ));
        let usecase = GetRoomsUseCase::new(repository.clone());
        for name in ["studio", "atelier", "gallery"] {
            repository
                .get_or_create(&RoomKey::new(name.to_string()).unwrap())
                .await;
        }

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let keys: Vec<&str> = rooms.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["atelier", "gallery", "studio"]);
    }
}
