//! ドメイン層のエラー型

use thiserror::Error;

/// Value Object の生成時に発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Participant ID must not be empty")]
    ParticipantIdEmpty,

    #[error("Participant ID is too long: {actual} characters (max {max})")]
    ParticipantIdTooLong { actual: usize, max: usize },

    #[error("Room key must not be empty")]
    RoomKeyEmpty,

    #[error("Room key is too long: {actual} characters (max {max})")]
    RoomKeyTooLong { actual: usize, max: usize },

    #[error("Room key contains invalid character: '{0}'")]
    RoomKeyInvalidCharacter(char),
}

/// Room の状態遷移で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// 既に参加している ID で join しようとした
    #[error("Participant '{0}' is already a member of the room")]
    DuplicateParticipant(String),

    /// 参加していない ID で更新しようとした
    #[error("Participant '{0}' is not a member of the room")]
    UnknownParticipant(String),

    /// Registry から取り除かれた Room に join しようとした
    #[error("Room '{0}' has been closed")]
    RoomClosed(String),
}

/// メッセージ送信（通知）時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Client '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to serialize event: {0}")]
    Serialization(String),
}
