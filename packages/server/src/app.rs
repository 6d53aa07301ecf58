//! Dependency wiring.
//!
//! Builds the object graph in order:
//! 1. MessagePusher factory (one WebSocket pusher per room)
//! 2. Repository (in-memory room registry)
//! 3. UseCases
//! 4. AppState

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::state::AppState,
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        UpdateDesignUseCase,
    },
};
use hiroba_shared::time::Clock;

/// Build the shared application state for the given configuration.
pub fn build_app_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> Arc<AppState> {
    // 1. Create MessagePusher factory (each room gets its own)
    let pusher_factory = WebSocketMessagePusher::factory();

    // 2. Create Repository
    let repository = Arc::new(InMemoryRoomRepository::new(pusher_factory, clock.clone()));

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone(), clock));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        repository.clone(),
        config.evict_empty_rooms,
    ));
    let update_design_usecase = Arc::new(UpdateDesignUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository));

    // 4. Create AppState
    Arc::new(AppState {
        join_room_usecase,
        leave_room_usecase,
        update_design_usecase,
        get_room_detail_usecase,
        get_rooms_usecase,
        heartbeat_interval: config.heartbeat_interval,
    })
}
