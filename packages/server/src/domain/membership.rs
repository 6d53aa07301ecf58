//! Membership Registry
//!
//! 接続中の参加者の集合。表示順を安定させるため join した順序を保持する。

use super::{ParticipantId, RoomError, Timestamp};

/// Room に接続中の参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: ParticipantId, joined_at: Timestamp) -> Self {
        Self { id, joined_at }
    }
}

/// 接続中の参加者の挿入順集合
#[derive(Debug, Clone, Default)]
pub struct MembershipRegistry {
    participants: Vec<Participant>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者を末尾に追加する
    ///
    /// 同じ ID が既に存在する場合は `RoomError::DuplicateParticipant` を返し、何も変更しない。
    pub fn insert(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.contains(&participant.id) {
            return Err(RoomError::DuplicateParticipant(
                participant.id.into_string(),
            ));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// 参加者を取り除く。存在しなければ `None`
    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.id == id)?;
        Some(self.participants.remove(index))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.iter().any(|p| &p.id == id)
    }

    /// join 順の参加者 ID 一覧
    pub fn ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
