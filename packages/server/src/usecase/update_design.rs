//! UseCase: デザイン更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateDesignUseCase::execute() メソッド
//! - デザインの保存と、全デザインの全員へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者のデザイン更新
//! - 異常系：参加していない ID、存在しない Room

use std::sync::Arc;

use crate::domain::{Design, ParticipantId, RoomKey, RoomRepository};

use super::error::UpdateDesignError;

/// デザイン更新のユースケース
pub struct UpdateDesignUseCase {
    /// Repository（Room 一覧の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl UpdateDesignUseCase {
    /// 新しい UpdateDesignUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// デザイン更新を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 保存し、Room の全員へ `designs` を送った
    /// * `Err(UpdateDesignError)` - Room がない、または参加者でない（何も変更しない）
    pub async fn execute(
        &self,
        room_key: &RoomKey,
        participant_id: &ParticipantId,
        design: Design,
    ) -> Result<(), UpdateDesignError> {
        let coordinator = self
            .repository
            .find(room_key)
            .await
            .ok_or_else(|| UpdateDesignError::RoomNotFound(room_key.as_str().to_string()))?;

        coordinator.update_design(participant_id, design).await?;
        Ok(())
    }
}
