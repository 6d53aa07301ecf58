//! Room から参加者へ通知するイベント

use std::collections::BTreeMap;

use super::{Design, ParticipantId, RoomSnapshot};

/// 参加者へ送るイベント
///
/// 差分ではなく、常に名簿またはデザインの全体を運ぶ。
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// join した本人にだけ、1 回だけ送る初期状態
    Init {
        users: Vec<ParticipantId>,
        designs: BTreeMap<ParticipantId, Design>,
    },
    /// 名簿が変わったときに全員へ送る
    Users { users: Vec<ParticipantId> },
    /// デザインが更新されたときに全員へ送る
    Designs {
        designs: BTreeMap<ParticipantId, Design>,
    },
}

impl RoomEvent {
    pub fn init(snapshot: &RoomSnapshot) -> Self {
        Self::Init {
            users: snapshot.users(),
            designs: snapshot.designs.clone(),
        }
    }

    /// ログ出力用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Users { .. } => "users",
            Self::Designs { .. } => "designs",
        }
    }
}
