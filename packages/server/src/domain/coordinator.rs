//! Room Coordinator
//!
//! 1 つの Room の状態（名簿とデザイン）を所有し、全ての更新を直列化して、
//! 更新のたびに参加者へイベントを通知するドメインサービス。
//!
//! ## 並行制御
//!
//! - 更新（join / leave / update_design）は Room ごとの Mutex を取得した順に適用される
//! - 通知は Mutex を保持したまま送信キューへ積む。キューへの追加はブロックしないため、
//!   ネットワーク I/O がロック中に発生することはない
//! - ロック取得後は `.await` しない。タスクが中断されても「更新したが通知していない」状態は残らない
//! - これにより、同じ Room のイベントが受信者ごとに入れ替わって届くことはなく、
//!   通知内容は常に直前の更新を反映した状態になる

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{
    Design, MessagePusher, MessagePushError, Participant, ParticipantId, PusherChannel, Room,
    RoomError, RoomEvent, RoomKey, RoomSnapshot, Timestamp,
};

struct CoordinatorState {
    room: Room,
    /// Registry から取り除かれた後は join を受け付けない
    closed: bool,
}

/// Room Coordinator
pub struct RoomCoordinator {
    key: RoomKey,
    state: Mutex<CoordinatorState>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomCoordinator {
    pub fn new(key: RoomKey, created_at: Timestamp, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            state: Mutex::new(CoordinatorState {
                room: Room::new(key.clone(), created_at),
                closed: false,
            }),
            key,
            message_pusher,
        }
    }

    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    /// 参加者を Room に追加する
    ///
    /// 本人にだけ `init` を送り、その後に新しい名簿（本人を含む）を全員へ送る。
    ///
    /// # Returns
    ///
    /// * `Ok(RoomSnapshot)` - `init` の元になった join 直後の状態
    /// * `Err(RoomError::DuplicateParticipant)` - 同じ ID が既に参加している
    /// * `Err(RoomError::RoomClosed)` - Room が Registry から取り除かれている
    pub async fn join(
        &self,
        participant: Participant,
        channel: PusherChannel,
    ) -> Result<RoomSnapshot, RoomError> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(RoomError::RoomClosed(self.key.as_str().to_string()));
        }

        let participant_id = participant.id.clone();
        if state.room.members().contains(&participant_id) {
            return Err(RoomError::DuplicateParticipant(
                participant_id.into_string(),
            ));
        }
        if let Err(MessagePushError::AlreadyRegistered(id)) = self
            .message_pusher
            .register_client(participant_id.clone(), channel)
        {
            return Err(RoomError::DuplicateParticipant(id));
        }
        state.room.join(participant)?;

        let snapshot = state.room.snapshot();
        if let Err(e) = self
            .message_pusher
            .push_to(&participant_id, &RoomEvent::init(&snapshot))
        {
            tracing::warn!(
                "Failed to send init to '{}' in room '{}': {}",
                participant_id,
                self.key,
                e
            );
        }

        let users = snapshot.users();
        self.broadcast(users.clone(), RoomEvent::Users { users });

        tracing::info!(
            "Participant '{}' joined room '{}' ({} connected)",
            participant_id,
            self.key,
            snapshot.participants.len()
        );
        Ok(snapshot)
    }

    /// 参加者を Room から取り除く
    ///
    /// 不在なら何もせず `false` を返す（切断通知の重複を許容する）。
    /// 取り除いた場合は残りの参加者へ新しい名簿を送る。デザインは残す。
    pub async fn leave(&self, participant_id: &ParticipantId) -> bool {
        let mut state = self.state.lock().await;
        if !state.room.leave(participant_id) {
            tracing::debug!(
                "Participant '{}' already left room '{}'",
                participant_id,
                self.key
            );
            return false;
        }
        self.message_pusher.unregister_client(participant_id);

        let users = state.room.members().ids();
        let remaining = users.len();
        self.broadcast(users.clone(), RoomEvent::Users { users });

        tracing::info!(
            "Participant '{}' left room '{}' ({} connected)",
            participant_id,
            self.key,
            remaining
        );
        true
    }

    /// 参加者のデザインを置き換え、全デザインを全員へ送る
    ///
    /// 参加者でなければ `RoomError::UnknownParticipant` を返し、何も変更しない。
    pub async fn update_design(
        &self,
        participant_id: &ParticipantId,
        design: Design,
    ) -> Result<(), RoomError> {
        let mut state = self.state.lock().await;
        state.room.update_design(participant_id, design)?;

        let targets = state.room.members().ids();
        let designs = state.room.designs().to_map();
        tracing::debug!(
            "Design of '{}' updated in room '{}' ({} designs)",
            participant_id,
            self.key,
            designs.len()
        );
        self.broadcast(targets, RoomEvent::Designs { designs });
        Ok(())
    }

    /// 現在の状態のコピー
    pub async fn snapshot(&self) -> RoomSnapshot {
        self.state.lock().await.room.snapshot()
    }

    pub async fn participant_count(&self) -> usize {
        self.state.lock().await.room.members().len()
    }

    /// 参加者がいなければ Room を閉じる。閉じた場合は `true`
    ///
    /// 閉じた Room への join は `RoomError::RoomClosed` になる。
    pub async fn close_if_empty(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.room.members().is_empty() {
            state.closed = true;
        }
        state.closed
    }

    fn broadcast(&self, targets: Vec<ParticipantId>, event: RoomEvent) {
        if let Err(e) = self.message_pusher.broadcast(targets, &event) {
            tracing::warn!(
                "Failed to broadcast '{}' in room '{}': {}",
                event.kind(),
                self.key,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockMessagePusher, infrastructure::message_pusher::WebSocketMessagePusher,
    };
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - RoomCoordinator の join / leave / update_design / snapshot
    // - 各更新の後、接続中の全員に「更新後の状態」を運ぶイベントがちょうど 1 つ届くこと
    //
    // 【なぜこのテストが必要か】
    // - Coordinator は Room の状態の唯一の書き手で、通知の順序と内容を保証する中核
    //
    // 【どのようなシナリオをテストするか】
    // 1. join / update / join / leave の一連の流れ（受信内容を JSON で検証）
    // 2. 重複 join・未参加者の更新・不在の leave
    // 3. 送信失敗が Coordinator に伝播しないこと
    // 4. 並行更新でも各受信者がイベントを更新順に受け取ること
    // 5. 更新中のタスクが中断されても、状態と通知が食い違わないこと
    // ========================================

    fn id(value: &str) -> ParticipantId {
        ParticipantId::new(value.to_string()).unwrap()
    }

    fn create_test_coordinator() -> RoomCoordinator {
        RoomCoordinator::new(
            RoomKey::new("gallery".to_string()).unwrap(),
            Timestamp::new(0),
            Arc::new(WebSocketMessagePusher::new()),
        )
    }

    async fn join(
        coordinator: &RoomCoordinator,
        participant_id: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        coordinator
            .join(Participant::new(id(participant_id), Timestamp::new(1)), tx)
            .await
            .unwrap();
        rx
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
        let mut received = Vec::new();
        while let Ok(text) = rx.try_recv() {
            received.push(serde_json::from_str(&text).unwrap());
        }
        received
    }

    #[tokio::test]
    async fn test_join_sends_init_then_users() {
        // テスト項目: join した本人に init、続いて users が届き、スナップショットが返される
        // given (前提条件):
        let coordinator = create_test_coordinator();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let snapshot = coordinator
            .join(Participant::new(id("u1"), Timestamp::new(1)), tx)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.users(), vec![id("u1")]);
        assert!(snapshot.designs.is_empty());
        assert_eq!(
            drain(&mut rx),
            vec![
                json!({"type": "init", "users": ["u1"], "designs": {}}),
                json!({"type": "users", "users": ["u1"]}),
            ]
        );
    }

    #[tokio::test]
    async fn test_gallery_scenario() {
        // テスト項目: join → update → join → leave の流れで、全員に更新後の状態が届く
        // given (前提条件):
        let coordinator = create_test_coordinator();
        let mut rx1 = join(&coordinator, "u1").await;
        drain(&mut rx1);

        // when (操作): u1 がデザインを送る
        coordinator
            .update_design(&id("u1"), Design::new(json!({"shapes": []})))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut rx1),
            vec![json!({"type": "designs", "designs": {"u1": {"shapes": []}}})]
        );

        // when (操作): u2 が join
        let mut rx2 = join(&coordinator, "u2").await;

        // then (期待する結果):
        assert_eq!(
            drain(&mut rx2),
            vec![
                json!({"type": "init", "users": ["u1", "u2"], "designs": {"u1": {"shapes": []}}}),
                json!({"type": "users", "users": ["u1", "u2"]}),
            ]
        );
        assert_eq!(
            drain(&mut rx1),
            vec![json!({"type": "users", "users": ["u1", "u2"]})]
        );

        // when (操作): u1 が leave
        assert!(coordinator.leave(&id("u1")).await);

        // then (期待する結果): 残った u2 に新しい名簿が届き、u1 のデザインは残る
        assert_eq!(
            drain(&mut rx2),
            vec![json!({"type": "users", "users": ["u2"]})]
        );
        assert!(drain(&mut rx1).is_empty());
        let snapshot = coordinator.snapshot().await;
        assert_eq!(snapshot.users(), vec![id("u2")]);
        assert_eq!(
            snapshot.designs.get(&id("u1")),
            Some(&Design::new(json!({"shapes": []})))
        );
    }

    #[tokio::test]
    async fn test_join_duplicate_is_rejected() {
        // テスト項目: 参加中の ID での join は DuplicateParticipant になり、通知も起きない
        // given (前提条件):
        let coordinator = create_test_coordinator();
        let mut rx1 = join(&coordinator, "u1").await;
        drain(&mut rx1);

        // when (操作):
        let (tx, mut rx_dup) = mpsc::unbounded_channel();
        let result = coordinator
            .join(Participant::new(id("u1"), Timestamp::new(2)), tx)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::DuplicateParticipant("u1".to_string()))
        );
        assert_eq!(coordinator.participant_count().await, 1);
        assert!(drain(&mut rx1).is_empty());
        assert!(drain(&mut rx_dup).is_empty());
    }

    #[tokio::test]
    async fn test_update_design_unknown_participant() {
        // テスト項目: 未参加者のデザイン更新は UnknownParticipant になり、状態も通知も変わらない
        // given (前提条件):
        let coordinator = create_test_coordinator();
        let mut rx1 = join(&coordinator, "u1").await;
        drain(&mut rx1);

        // when (操作):
        let result = coordinator
            .update_design(&id("ghost"), Design::new(json!({"shapes": []})))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::UnknownParticipant("ghost".to_string()))
        );
        assert!(coordinator.snapshot().await.designs.is_empty());
        assert!(drain(&mut rx1).is_empty());
    }

    #[tokio::test]
    async fn test_leave_absent_does_not_broadcast() {
        // テスト項目: 不在の参加者の leave はエラーにならず、通知も送らない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(0);
        pusher.expect_unregister_client().times(0);
        let coordinator = RoomCoordinator::new(
            RoomKey::new("gallery".to_string()).unwrap(),
            Timestamp::new(0),
            Arc::new(pusher),
        );

        // when (操作):
        let left = coordinator.leave(&id("ghost")).await;

        // then (期待する結果):
        assert!(!left);
        assert_eq!(coordinator.participant_count().await, 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_not_propagated() {
        // テスト項目: 通知の送信に失敗しても、更新自体は成功する
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_register_client().returning(|_, _| Ok(()));
        pusher
            .expect_push_to()
            .returning(|id, _| Err(MessagePushError::ClientNotFound(id.to_string())));
        pusher
            .expect_broadcast()
            .returning(|_, _| Err(MessagePushError::PushFailed("closed".to_string())));
        let coordinator = RoomCoordinator::new(
            RoomKey::new("gallery".to_string()).unwrap(),
            Timestamp::new(0),
            Arc::new(pusher),
        );
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let joined = coordinator
            .join(Participant::new(id("u1"), Timestamp::new(1)), tx)
            .await;
        let updated = coordinator
            .update_design(&id("u1"), Design::new(json!({"filters": []})))
            .await;

        // then (期待する結果):
        assert!(joined.is_ok());
        assert!(updated.is_ok());
        assert_eq!(coordinator.snapshot().await.designs.len(), 1);
    }

    #[tokio::test]
    async fn test_closed_room_rejects_join() {
        // テスト項目: 空の Room を閉じると join は RoomClosed になる。参加者がいれば閉じない
        // given (前提条件):
        let coordinator = create_test_coordinator();
        let _rx1 = join(&coordinator, "u1").await;

        // when (操作):
        let closed_while_occupied = coordinator.close_if_empty().await;
        coordinator.leave(&id("u1")).await;
        let closed_when_empty = coordinator.close_if_empty().await;
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = coordinator
            .join(Participant::new(id("u2"), Timestamp::new(2)), tx)
            .await;

        // then (期待する結果):
        assert!(!closed_while_occupied);
        assert!(closed_when_empty);
        assert_eq!(result, Err(RoomError::RoomClosed("gallery".to_string())));
    }

    #[tokio::test]
    async fn test_concurrent_updates_arrive_in_order() {
        // テスト項目: 並行に更新しても、全員が同じ順序で designs を受け取り、最後の通知が最終状態と一致する
        // given (前提条件):
        let coordinator = Arc::new(create_test_coordinator());
        let mut receivers = Vec::new();
        for name in ["a", "b", "c", "d"] {
            receivers.push(join(&coordinator, name).await);
        }

        // when (操作): 4 人がそれぞれ 25 回デザインを更新
        let mut handles = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let coordinator = coordinator.clone();
            handles.push(tokio::spawn(async move {
                for n in 0..25 {
                    coordinator
                        .update_design(&id(name), Design::new(json!({"n": n})))
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let final_designs = json!({
            "a": {"n": 24}, "b": {"n": 24}, "c": {"n": 24}, "d": {"n": 24}
        });
        let mut sequences = Vec::new();
        for rx in receivers.iter_mut() {
            let designs: Vec<Value> = drain(rx)
                .into_iter()
                .filter(|event| event["type"] == "designs")
                .collect();
            assert_eq!(designs.len(), 100);
            assert_eq!(designs.last().unwrap()["designs"], final_designs);
            sequences.push(designs);
        }
        assert!(sequences.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_aborted_update_never_leaves_state_without_broadcast() {
        // テスト項目: update_design のタスクがどの時点で中断されても、
        //            「デザインは保存されたが designs が届かない」状態にならない
        // given (前提条件):
        let coordinator = Arc::new(create_test_coordinator());
        let mut rx1 = join(&coordinator, "u1").await;
        let mut rx2 = join(&coordinator, "u2").await;
        drain(&mut rx1);
        drain(&mut rx2);

        for (n, yield_before_abort) in [(1, false), (2, true)] {
            // Room のロックを握った状態で更新タスクを起動し、ロック待ちにさせる
            let design = Design::new(json!({"shapes": [n]}));
            let guard = coordinator.state.lock().await;
            let task = {
                let coordinator = coordinator.clone();
                let design = design.clone();
                tokio::spawn(async move { coordinator.update_design(&id("u1"), design).await })
            };
            tokio::task::yield_now().await;

            // when (操作): ロックを解放し、更新タスクを中断する
            drop(guard);
            if yield_before_abort {
                tokio::task::yield_now().await;
            }
            task.abort();
            let _ = task.await;

            // then (期待する結果): 状態が変わったなら、全員に designs がちょうど 1 つ届いている
            let stored = coordinator.snapshot().await.designs.get(&id("u1")) == Some(&design);
            let events_u1 = drain(&mut rx1);
            let events_u2 = drain(&mut rx2);
            if stored {
                let expected = vec![json!({"type": "designs", "designs": {"u1": {"shapes": [n]}}})];
                assert_eq!(events_u1, expected);
                assert_eq!(events_u2, expected);
            } else {
                assert!(events_u1.is_empty());
                assert!(events_u2.is_empty());
            }
        }

        // 2 回目はロック解放後にタスクが最後まで走ってから中断される
        assert_eq!(
            coordinator.snapshot().await.designs.get(&id("u1")),
            Some(&Design::new(json!({"shapes": [2]})))
        );
    }
}
