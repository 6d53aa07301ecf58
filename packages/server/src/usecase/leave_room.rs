//! UseCase: 参加者の leave 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 残りの参加者への名簿の通知、デザインの保持、空 Room の削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の leave と通知
//! - エッジケース：切断通知の重複（2 回目は何もしない）、存在しない Room
//! - 設定：空になった Room を取り除く／取り除かない

use std::sync::Arc;

use crate::domain::{ParticipantId, RoomKey, RoomRepository};

/// 参加者 leave のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（Room 一覧の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// 参加者がいなくなった Room を Registry から取り除くか
    evict_empty_rooms: bool,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, evict_empty_rooms: bool) -> Self {
        Self {
            repository,
            evict_empty_rooms,
        }
    }

    /// 参加者の leave を実行
    ///
    /// # Returns
    ///
    /// 参加者を取り除いた場合は `true`。既に不在だった場合は `false`（エラーにはしない）
    pub async fn execute(&self, room_key: &RoomKey, participant_id: &ParticipantId) -> bool {
        let Some(coordinator) = self.repository.find(room_key).await else {
            tracing::debug!(
                "Room '{}' not found while '{}' was leaving",
                room_key,
                participant_id
            );
            return false;
        };

        let left = coordinator.leave(participant_id).await;
        if left && self.evict_empty_rooms {
            self.repository.remove_if_empty(room_key).await;
        }
        left
    }
}
