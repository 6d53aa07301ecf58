//! HTTP API response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Room summary for `GET /api/rooms`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Connected participant IDs in join order
    pub participants: Vec<String>,
    /// Number of stored designs, including those of departed participants
    pub design_count: usize,
    /// RFC 3339 (JST)
    pub created_at: String,
}

/// Room detail for `GET /api/rooms/{room_key}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoomDetailDto {
    pub id: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub designs: BTreeMap<String, Value>,
    /// RFC 3339 (JST)
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParticipantDetailDto {
    pub participant_id: String,
    /// RFC 3339 (JST)
    pub joined_at: String,
}
