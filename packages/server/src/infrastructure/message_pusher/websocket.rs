//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 参加者ごとの送信キュー（`PusherChannel`）を管理
//! - `RoomEvent` を JSON に変換し、キューへ積む（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成とソケットへの書き込みは UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装はキューへの追加だけを行うため、呼び出し側をブロックしません。
//! インスタンスは Room ごとに 1 つ作られ、他の Room の通知とロックを共有しません。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    domain::{
        MessagePushError, MessagePusher, MessagePusherFactory, ParticipantId, PusherChannel,
        RoomEvent,
    },
    infrastructure::dto::websocket::OutboundMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: Room に接続中の参加者と対応する送信キューのマップ
#[derive(Default)]
pub struct WebSocketMessagePusher {
    clients: Mutex<HashMap<ParticipantId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Room ごとに新しいインスタンスを作るファクトリ
    pub fn factory() -> MessagePusherFactory {
        Arc::new(|| Arc::new(WebSocketMessagePusher::new()) as Arc<dyn MessagePusher>)
    }

    fn clients(&self) -> MutexGuard<'_, HashMap<ParticipantId, PusherChannel>> {
        // 保持中に panic しうる処理はないため、poison されても中身はそのまま使える
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn serialize(event: &RoomEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&OutboundMessage::from(event))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn register_client(
        &self,
        participant_id: ParticipantId,
        channel: PusherChannel,
    ) -> Result<(), MessagePushError> {
        let mut clients = self.clients();
        if clients.contains_key(&participant_id) {
            return Err(MessagePushError::AlreadyRegistered(
                participant_id.into_string(),
            ));
        }
        tracing::debug!("Client '{}' registered to MessagePusher", participant_id);
        clients.insert(participant_id, channel);
        Ok(())
    }

    fn unregister_client(&self, participant_id: &ParticipantId) {
        self.clients().remove(participant_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", participant_id);
    }

    fn push_to(
        &self,
        participant_id: &ParticipantId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::serialize(event)?;
        let clients = self.clients();

        let channel = clients
            .get(participant_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(participant_id.to_string()))?;
        channel
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", event.kind(), participant_id);
        Ok(())
    }

    fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::serialize(event)?;
        let clients = self.clients();

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容（切断処理が後で leave する）
                Some(channel) => {
                    if let Err(e) = channel.send(content.clone()) {
                        tracing::warn!(
                            "Failed to push '{}' to client '{}', treating as disconnected: {}",
                            event.kind(),
                            target,
                            e
                        );
                    } else {
                        tracing::debug!("Broadcasted '{}' to client '{}'", event.kind(), target);
                    }
                }
                None => {
                    tracing::warn!(
                        "Client '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }
}
