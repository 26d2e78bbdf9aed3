//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboard clients and the statboard server.

use serde::{Deserialize, Serialize};

use crate::dashboard::{Component, Output};

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Open a dashboard at its default inputs
    Open { dashboard: String },
    /// Change one input of an open dashboard
    SetInput {
        dashboard: String,
        input_id: String,
        value: serde_json::Value,
    },
    /// Forget a dashboard's input state
    Close { dashboard: String },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// View template of a freshly opened dashboard
    Layout { dashboard: String, layout: Component },
    /// Recomputed outputs.
    ///
    /// `sequence` grows per connection; a client drops anything older than
    /// the last sequence it applied.
    Outputs {
        dashboard: String,
        sequence: u64,
        outputs: Vec<Output>,
    },
    /// Dashboard closed
    Closed { dashboard: String },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    pub fn error(message: impl std::fmt::Display) -> Self {
        ServerMessage::Error {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_message_deserialize_set_input() {
        let json = r#"{"type": "set_input", "dashboard": "flight-delays", "input_id": "input-year", "value": "2012"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::SetInput {
                dashboard: "flight-delays".to_string(),
                input_id: "input-year".to_string(),
                value: json!("2012"),
            }
        );
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_client_message_rejects_unknown_type() {
        let json = r#"{"type": "subscribe", "topics": []}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serialize_outputs() {
        let msg = ServerMessage::Outputs {
            dashboard: "automobile-sales".to_string(),
            sequence: 3,
            outputs: vec![Output::nothing("output-container")],
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "outputs");
        assert_eq!(value["sequence"], 3);
        assert_eq!(value["outputs"][0]["id"], "output-container");
        assert_eq!(value["outputs"][0]["value"]["type"], "nothing");
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"connection_id\":\"abc-123\""));
    }
}
