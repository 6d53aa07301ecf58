//! Repository trait 定義
//!
//! プロセス全体で共有する Room の一覧（Room キー → `RoomCoordinator`）へのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;

use super::{RoomCoordinator, RoomKey};

/// Room Repository trait
///
/// ## ライフサイクル
///
/// - Room は最初の join で作られる（`get_or_create`）
/// - 参加者がいなくなった Room は `remove_if_empty` で取り除ける
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を取得し、なければ作成する
    ///
    /// 同じキーに対して並行に呼ばれても、Coordinator は 1 つしか作られない。
    async fn get_or_create(&self, key: &RoomKey) -> Arc<RoomCoordinator>;

    /// Room を取得
    async fn find(&self, key: &RoomKey) -> Option<Arc<RoomCoordinator>>;

    /// 全ての Room を Room キー順に取得
    async fn list(&self) -> Vec<Arc<RoomCoordinator>>;

    /// 参加者がいなければ Room を取り除く。取り除いた場合は `true`
    async fn remove_if_empty(&self, key: &RoomKey) -> bool;
}
