//! Room 集約
//!
//! Membership Registry と Document Store をひとまとめにした、1 つの Room の状態。
//! 同期的で純粋な状態遷移のみを持ち、並行制御と通知は `RoomCoordinator` が担う。

use std::collections::BTreeMap;

use super::{
    Design, DocumentStore, MembershipRegistry, Participant, ParticipantId, RoomError, RoomKey,
    Timestamp,
};

/// Room エンティティ
#[derive(Debug, Clone)]
pub struct Room {
    pub key: RoomKey,
    pub created_at: Timestamp,
    members: MembershipRegistry,
    designs: DocumentStore,
}

impl Room {
    pub fn new(key: RoomKey, created_at: Timestamp) -> Self {
        Self {
            key,
            created_at,
            members: MembershipRegistry::new(),
            designs: DocumentStore::new(),
        }
    }

    /// 参加者を追加する
    pub fn join(&mut self, participant: Participant) -> Result<(), RoomError> {
        self.members.insert(participant)
    }

    /// 参加者を取り除く
    ///
    /// 不在なら `false` を返すだけでエラーにはしない（切断通知の重複を許容する）。
    /// 参加者のデザインは取り除かず、Room が存在する限り残す。
    pub fn leave(&mut self, id: &ParticipantId) -> bool {
        self.members.remove(id).is_some()
    }

    /// 参加者のデザインを作成、または置き換える
    ///
    /// 参加者でなければ `RoomError::UnknownParticipant` を返し、何も変更しない。
    pub fn update_design(&mut self, owner: &ParticipantId, design: Design) -> Result<(), RoomError> {
        if !self.members.contains(owner) {
            return Err(RoomError::UnknownParticipant(owner.as_str().to_string()));
        }
        self.designs.set(owner.clone(), design);
        Ok(())
    }

    pub fn members(&self) -> &MembershipRegistry {
        &self.members
    }

    pub fn designs(&self) -> &DocumentStore {
        &self.designs
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            key: self.key.clone(),
            created_at: self.created_at,
            participants: self.members.participants().to_vec(),
            designs: self.designs.to_map(),
        }
    }
}

/// ある時点の Room 状態の読み取り専用コピー
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub key: RoomKey,
    pub created_at: Timestamp,
    /// join 順の参加者
    pub participants: Vec<Participant>,
    pub designs: BTreeMap<ParticipantId, Design>,
}

impl RoomSnapshot {
    /// join 順の参加者 ID 一覧
    pub fn users(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }
}
