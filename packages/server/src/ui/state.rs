//! Server state shared by every handler.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    UpdateDesignUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（参加者 join のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（参加者 leave のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// UpdateDesignUseCase（デザイン更新のユースケース）
    pub update_design_usecase: Arc<UpdateDesignUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// Interval between pings to each client; `None` disables heartbeats
    pub heartbeat_interval: Option<Duration>,
}
