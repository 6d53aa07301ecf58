//! WebSocket message DTOs.
//!
//! Every frame is a JSON object with a `type` field.
//!
//! Inbound (client → server): `update_design`.
//! Outbound (server → client): `init`, `users`, `designs`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Value of the `type` field
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    UpdateDesign,
    Init,
    Users,
    Designs,
}

/// Client replaces its own design
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpdateDesignMessage {
    pub r#type: MessageType,
    pub design: Value,
}

/// Initial state, sent once to a newly joined participant
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InitMessage {
    pub r#type: MessageType,
    pub users: Vec<String>,
    pub designs: BTreeMap<String, Value>,
}

/// Current roster, in join order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UsersMessage {
    pub r#type: MessageType,
    pub users: Vec<String>,
}

/// Every design in the room, including those of participants who already left
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DesignsMessage {
    pub r#type: MessageType,
    pub designs: BTreeMap<String, Value>,
}

/// Any server → client frame
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OutboundMessage {
    Init(InitMessage),
    Users(UsersMessage),
    Designs(DesignsMessage),
}

/// Recognized client → server frames
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    UpdateDesign(UpdateDesignMessage),
}

/// A frame that could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InboundMessageError {
    #[error("Message is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Message has no string 'type' field")]
    MissingType,

    #[error("Invalid '{kind}' message: {reason}")]
    InvalidPayload { kind: String, reason: String },
}

/// Parse a text frame sent by a client.
///
/// # Returns
///
/// * `Ok(Some(message))` - a recognized message
/// * `Ok(None)` - well-formed, but of a `type` the server does not handle
/// * `Err(InboundMessageError)` - malformed
pub fn parse_inbound_message(text: &str) -> Result<Option<InboundMessage>, InboundMessageError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| InboundMessageError::InvalidJson(e.to_string()))?;

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(InboundMessageError::MissingType)?
        .to_string();

    match kind.as_str() {
        "update_design" => serde_json::from_value::<UpdateDesignMessage>(value)
            .map(|message| Some(InboundMessage::UpdateDesign(message)))
            .map_err(|e| InboundMessageError::InvalidPayload {
                kind,
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_update_design() {
        // テスト項目: update_design メッセージのデザインがそのまま取り出せる
        // given (前提条件):
        let text = r#"{"type":"update_design","design":{"shapes":[{"type":"circle","x":1}],"filters":[]}}"#;

        // when (操作):
        let result = parse_inbound_message(text);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(Some(InboundMessage::UpdateDesign(UpdateDesignMessage {
                r#type: MessageType::UpdateDesign,
                design: json!({"shapes": [{"type": "circle", "x": 1}], "filters": []}),
            })))
        );
    }

    #[test]
    fn test_parse_unknown_type_is_ignored() {
        // テスト項目: 未知の type はエラーではなく None になる
        // given (前提条件):
        let text = r#"{"type":"cursor_move","x":10,"y":20}"#;

        // when (操作):
        let result = parse_inbound_message(text);

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_parse_invalid_json_is_malformed() {
        // テスト項目: JSON として解釈できない文字列はエラーになる
        // given (前提条件):
        let text = "{not json";

        // when (操作):
        let result = parse_inbound_message(text);

        // then (期待する結果):
        assert!(matches!(result, Err(InboundMessageError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_without_type_is_malformed() {
        // テスト項目: type を持たない、または文字列でない type はエラーになる
        // given (前提条件):
        let missing = r#"{"design":{}}"#;
        let numeric = r#"{"type":1,"design":{}}"#;
        let array = "[1,2,3]";

        // when (操作) / then (期待する結果):
        assert_eq!(
            parse_inbound_message(missing),
            Err(InboundMessageError::MissingType)
        );
        assert_eq!(
            parse_inbound_message(numeric),
            Err(InboundMessageError::MissingType)
        );
        assert_eq!(
            parse_inbound_message(array),
            Err(InboundMessageError::MissingType)
        );
    }

    #[test]
    fn test_parse_update_design_without_design_is_malformed() {
        // テスト項目: design フィールドのない update_design はエラーになる
        // given (前提条件):
        let text = r#"{"type":"update_design"}"#;

        // when (操作):
        let result = parse_inbound_message(text);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(InboundMessageError::InvalidPayload { ref kind, .. }) if kind == "update_design"
        ));
    }

    #[test]
    fn test_outbound_serializes_with_type_tag() {
        // テスト項目: 送信メッセージは type フィールド付きの JSON になる
        // given (前提条件):
        let message = OutboundMessage::Users(UsersMessage {
            r#type: MessageType::Users,
            users: vec!["u1".to_string(), "u2".to_string()],
        });

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type": "users", "users": ["u1", "u2"]}));
    }
}
