//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリのテーブルとして使用します。プロセスを再起動すると全ての Room は失われます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePusherFactory, RoomCoordinator, RoomKey, RoomRepository, Timestamp};
use hiroba_shared::time::Clock;

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room キー → Coordinator
    rooms: Mutex<HashMap<RoomKey, Arc<RoomCoordinator>>>,
    /// Coordinator ごとに専用の MessagePusher を作る
    pusher_factory: MessagePusherFactory,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(pusher_factory: MessagePusherFactory, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            pusher_factory,
            clock,
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(&self, key: &RoomKey) -> Arc<RoomCoordinator> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(key.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", key);
                Arc::new(RoomCoordinator::new(
                    key.clone(),
                    Timestamp::new(self.clock.now_jst_millis()),
                    (self.pusher_factory)(),
                ))
            })
            .clone()
    }

    async fn find(&self, key: &RoomKey) -> Option<Arc<RoomCoordinator>> {
        let rooms = self.rooms.lock().await;
        rooms.get(key).cloned()
    }

    async fn list(&self) -> Vec<Arc<RoomCoordinator>> {
        let rooms = self.rooms.lock().await;
        let mut coordinators: Vec<Arc<RoomCoordinator>> = rooms.values().cloned().collect();
        coordinators.sort_by(|a, b| a.key().cmp(b.key()));
        coordinators
    }

    async fn remove_if_empty(&self, key: &RoomKey) -> bool {
        // Registry → Room の順にロックする（逆順で取得する経路はない）
        let mut rooms = self.rooms.lock().await;
        let Some(coordinator) = rooms.get(key).cloned() else {
            return false;
        };
        if !coordinator.close_if_empty().await {
            return false;
        }
        rooms.remove(key);
        tracing::info!("Room '{}' removed (no participants left)", key);
        true
    }
}
