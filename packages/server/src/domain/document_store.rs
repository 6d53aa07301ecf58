//! Document Store
//!
//! 参加者 ID からその参加者の最新デザインへの対応表。振る舞いは get / set / delete のみ。

use std::collections::BTreeMap;

use super::{Design, ParticipantId};

/// 参加者ごとのデザイン
///
/// デザインを一度も送っていない参加者はエントリを持たない（空のプレースホルダは作らない）。
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    designs: BTreeMap<ParticipantId, Design>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: &ParticipantId) -> Option<&Design> {
        self.designs.get(owner)
    }

    /// デザインを作成、または置き換える。以前のデザインがあれば返す
    pub fn set(&mut self, owner: ParticipantId, design: Design) -> Option<Design> {
        self.designs.insert(owner, design)
    }

    pub fn delete(&mut self, owner: &ParticipantId) -> Option<Design> {
        self.designs.remove(owner)
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// 全デザインのコピー
    pub fn to_map(&self) -> BTreeMap<ParticipantId, Design> {
        self.designs.clone()
    }
}
