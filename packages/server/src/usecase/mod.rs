//! UseCase layer
//!
//! UI 層（WebSocket / HTTP ハンドラ）から呼ばれるアプリケーションの操作。
//! Repository から Room を解決し、Room Coordinator に処理を委譲します。

pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod leave_room;
pub mod update_design;

pub use error::{GetRoomDetailError, JoinRoomError, UpdateDesignError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use update_design::UpdateDesignUseCase;
