//! WebSocket connection handlers.
//!
//! Each accepted connection runs two tasks:
//! - a receive loop that parses client frames and calls the use cases
//! - a pusher loop that drains the participant's outbound queue to the socket
//!   and sends heartbeat pings
//!
//! A client that sends nothing (not even a pong) for `MISSED_HEARTBEAT_LIMIT`
//! heartbeat intervals is considered gone.
//!
//! When either task ends the other is aborted and the participant leaves the room.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{
    sync::{mpsc, watch},
    time::{Instant, Interval, MissedTickBehavior},
};

use crate::{
    domain::{Design, ParticipantId, ParticipantIdFactory, RoomKey},
    infrastructure::dto::websocket::{InboundMessage, parse_inbound_message},
    ui::state::AppState,
};

/// Heartbeat intervals without any inbound frame before the connection is dropped
const MISSED_HEARTBEAT_LIMIT: u32 = 2;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_key): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> RoomKey (Domain Model)
    let room_key = match RoomKey::try_from(room_key.clone()) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!("Invalid room key '{}': {}", room_key, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_key)))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, room_key: RoomKey) {
    // Identity is assigned by the server once the connection is accepted
    let participant_id = ParticipantIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    // init / users are queued on `tx` by the coordinator and flushed by the pusher loop
    match state
        .join_room_usecase
        .execute(&room_key, participant_id.clone(), tx)
        .await
    {
        Ok(snapshot) => {
            tracing::info!(
                "Client '{}' connected to room '{}' ({} designs)",
                participant_id,
                room_key,
                snapshot.designs.len()
            );
        }
        Err(e) => {
            tracing::error!(
                "Failed to join '{}' to room '{}': {}",
                participant_id,
                room_key,
                e
            );
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    }

    let (sender, receiver) = socket.split();
    // Time of the last frame received from the client
    let (last_seen_tx, last_seen_rx) = watch::channel(Instant::now());

    let mut send_task = pusher_loop(rx, sender, state.heartbeat_interval, last_seen_rx);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        room_key.clone(),
        participant_id.clone(),
        last_seen_tx,
    ));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state
        .leave_room_usecase
        .execute(&room_key, &participant_id)
        .await
    {
        tracing::info!(
            "Client '{}' disconnected from room '{}'",
            participant_id,
            room_key
        );
    }
}

/// Spawns a task that pushes queued messages to the WebSocket sender.
///
/// Also sends a ping every `heartbeat`. The task ends, and with it the
/// connection, when a write fails or when nothing has been received from the
/// client for `MISSED_HEARTBEAT_LIMIT` intervals.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    heartbeat: Option<Duration>,
    last_seen: watch::Receiver<Instant>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = heartbeat.map(|period| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                _ = tick(&mut ticker) => {
                    if let Some(period) = heartbeat {
                        let silent_for = last_seen.borrow().elapsed();
                        if silent_for > period * MISSED_HEARTBEAT_LIMIT {
                            tracing::info!(
                                "No frame from client for {:?}, closing connection",
                                silent_for
                            );
                            break;
                        }
                    }
                    if sender.send(Message::Ping(Default::default())).await.is_err() {
                        tracing::debug!("Heartbeat ping failed");
                        break;
                    }
                }
            }
        }
    })
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    room_key: RoomKey,
    participant_id: ParticipantId,
    last_seen: watch::Sender<Instant>,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error from '{}': {}", participant_id, e);
                break;
            }
        };
        last_seen.send_replace(Instant::now());

        match msg {
            Message::Text(text) => {
                handle_text(&state, &room_key, &participant_id, text.as_str()).await;
            }
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from '{}'", participant_id);
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", participant_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }
}

async fn handle_text(
    state: &AppState,
    room_key: &RoomKey,
    participant_id: &ParticipantId,
    text: &str,
) {
    match parse_inbound_message(text) {
        Ok(Some(InboundMessage::UpdateDesign(message))) => {
            // Convert DTO -> Design (Domain Model)
            let design = Design::from(message);
            if let Err(e) = state
                .update_design_usecase
                .execute(room_key, participant_id, design)
                .await
            {
                tracing::warn!("Failed to update design of '{}': {}", participant_id, e);
            }
        }
        Ok(None) => {
            tracing::debug!("Ignoring unrecognized message from '{}'", participant_id);
        }
        Err(e) => {
            tracing::warn!("Dropping malformed message from '{}': {}", participant_id, e);
        }
    }
}
