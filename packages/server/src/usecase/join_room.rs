//! UseCase: 参加者の join 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - Room の遅延生成、init の送信、重複 ID の拒否
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しい Room への最初の join、既存 Room への join
//! - 異常系：同じ参加者 ID での join
//! - エッジケース：空になって取り除かれた Room への再 join

use std::sync::Arc;

use crate::domain::{
    Participant, ParticipantId, PusherChannel, RoomError, RoomKey, RoomRepository, RoomSnapshot,
    Timestamp,
};
use hiroba_shared::time::Clock;

use super::error::JoinRoomError;

/// 取り除かれた Room に当たったときに、Room を取り直す最大回数
const MAX_JOIN_ATTEMPTS: usize = 3;

/// 参加者 join のユースケース
pub struct JoinRoomUseCase {
    /// Repository（Room 一覧の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// join 時刻の取得元
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 参加者の join を実行
    ///
    /// Room がなければ作成する。`init` と `users` の送信は Coordinator が行う。
    ///
    /// # Arguments
    ///
    /// * `room_key` - join する Room のキー
    /// * `participant_id` - 接続受付時に払い出した参加者 ID
    /// * `channel` - 参加者への送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok(RoomSnapshot)` - join 直後の Room の状態
    /// * `Err(JoinRoomError)` - join 失敗
    pub async fn execute(
        &self,
        room_key: &RoomKey,
        participant_id: ParticipantId,
        channel: PusherChannel,
    ) -> Result<RoomSnapshot, JoinRoomError> {
        for attempt in 1..=MAX_JOIN_ATTEMPTS {
            let coordinator = self.repository.get_or_create(room_key).await;
            let participant = Participant::new(
                participant_id.clone(),
                Timestamp::new(self.clock.now_jst_millis()),
            );

            match coordinator.join(participant, channel.clone()).await {
                Ok(snapshot) => return Ok(snapshot),
                // 削除と競合した。次の get_or_create で新しい Room が作られる
                Err(RoomError::RoomClosed(_)) => {
                    tracing::debug!(
                        "Room '{}' was closed while '{}' was joining (attempt {})",
                        room_key,
                        participant_id,
                        attempt
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(JoinRoomError::RoomUnavailable(room_key.as_str().to_string()))
    }
}
