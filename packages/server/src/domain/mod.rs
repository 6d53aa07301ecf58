//! Domain layer
//!
//! Room の状態とその遷移規則、および外部へのインターフェース（trait）を定義します。
//! DTO やトランスポートの詳細には依存しません。

pub mod coordinator;
pub mod document_store;
pub mod error;
pub mod event;
pub mod membership;
pub mod message_pusher;
pub mod repository;
pub mod room;
pub mod value_object;

pub use coordinator::RoomCoordinator;
pub use document_store::DocumentStore;
pub use error::{MessagePushError, RoomError, ValueObjectError};
pub use event::RoomEvent;
pub use membership::{MembershipRegistry, Participant};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::{MessagePusher, MessagePusherFactory, PusherChannel};
pub use repository::RoomRepository;
pub use room::{Room, RoomSnapshot};
pub use value_object::{Design, ParticipantId, ParticipantIdFactory, RoomKey, Timestamp};
