//! Conversion logic between DTOs and domain models.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::{Design, ParticipantId, RoomEvent, RoomSnapshot};
use crate::infrastructure::dto::{http, websocket as dto};
use hiroba_shared::time::timestamp_to_jst_rfc3339;

fn users_to_dto(users: &[ParticipantId]) -> Vec<String> {
    users.iter().map(|id| id.as_str().to_string()).collect()
}

fn designs_to_dto(designs: &BTreeMap<ParticipantId, Design>) -> BTreeMap<String, Value> {
    designs
        .iter()
        .map(|(owner, design)| (owner.as_str().to_string(), design.as_value().clone()))
        .collect()
}

// ========================================
// DTO → Domain Model
// ========================================

impl From<dto::UpdateDesignMessage> for Design {
    fn from(dto: dto::UpdateDesignMessage) -> Self {
        Design::new(dto.design)
    }
}

// ========================================
// Domain Model → DTO
// ========================================

impl From<&RoomEvent> for dto::OutboundMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::Init { users, designs } => Self::Init(dto::InitMessage {
                r#type: dto::MessageType::Init,
                users: users_to_dto(users),
                designs: designs_to_dto(designs),
            }),
            RoomEvent::Users { users } => Self::Users(dto::UsersMessage {
                r#type: dto::MessageType::Users,
                users: users_to_dto(users),
            }),
            RoomEvent::Designs { designs } => Self::Designs(dto::DesignsMessage {
                r#type: dto::MessageType::Designs,
                designs: designs_to_dto(designs),
            }),
        }
    }
}

impl From<&RoomSnapshot> for http::RoomSummaryDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            id: snapshot.key.as_str().to_string(),
            participants: users_to_dto(&snapshot.users()),
            design_count: snapshot.designs.len(),
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        }
    }
}

impl From<&RoomSnapshot> for http::RoomDetailDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            id: snapshot.key.as_str().to_string(),
            participants: snapshot
                .participants
                .iter()
                .map(|p| http::ParticipantDetailDto {
                    participant_id: p.id.as_str().to_string(),
                    joined_at: timestamp_to_jst_rfc3339(p.joined_at.value()),
                })
                .collect(),
            designs: designs_to_dto(&snapshot.designs),
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        }
    }
}
