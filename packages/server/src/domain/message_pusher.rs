//! MessagePusher trait 定義
//!
//! 参加者へのイベント通知のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use tokio::sync::mpsc;

use super::{MessagePushError, ParticipantId, RoomEvent};

/// 1 接続分の送信キュー
///
/// 送信はキューへの追加のみでブロックしない。ソケットへの書き込みは接続ごとのタスクが行う。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// Coordinator は Room のロックを保持したまま呼び出すため、全てのメソッドは同期的で、
/// キューへの追加だけを行う（`.await` を挟まないので、更新と通知の間で中断されない）。
///
/// ## 配送の方針
///
/// - `broadcast` は宛先ごとのベストエフォート。一部の宛先への送信失敗はログに残すだけで、
///   他の宛先への送信を妨げず、呼び出し元にもエラーを返さない
/// - 送信に失敗した宛先は切断済みとみなす。実際の leave はその接続のクローズ処理が行う
#[cfg_attr(test, mockall::automock)]
pub trait MessagePusher: Send + Sync {
    /// 参加者の送信キューを登録
    ///
    /// 同じ ID が登録済みなら `MessagePushError::AlreadyRegistered` を返し、既存の登録は変更しない。
    fn register_client(
        &self,
        participant_id: ParticipantId,
        channel: PusherChannel,
    ) -> Result<(), MessagePushError>;

    /// 参加者の送信キューを登録解除
    fn unregister_client(&self, participant_id: &ParticipantId);

    /// 特定の参加者にイベントを送信
    fn push_to(
        &self,
        participant_id: &ParticipantId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の参加者にイベントを送信
    fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}

/// Room ごとに新しい MessagePusher を作る関数
pub type MessagePusherFactory = Arc<dyn Fn() -> Arc<dyn MessagePusher> + Send + Sync>;
