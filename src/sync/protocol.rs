//! Wire protocol for the agenda broadcast channel.
//!
//! Messages are JSON text frames discriminated by an `event` field. Clients
//! put mutation requests on the channel; the broker assigns ids and fans the
//! accepted events out to every subscriber, the originator included.

use serde::{Deserialize, Serialize};

/// Mutation requests a client sends on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ClientRequest {
    /// Ask the broker to create an entry; the broker assigns the id.
    Create {
        name: String,
        talk_type: String,
        desc: String,
    },
    /// Ask the broker to remove the entry with this id.
    Hide { id: i32 },
}

/// Accepted mutations broadcast by the broker.
///
/// The wire carries discriminants beyond these (the server also emits
/// bookkeeping events such as `Authenticate`); receivers drop anything they
/// do not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ServerEvent {
    /// A Create request was accepted and assigned an id.
    Show {
        id: i32,
        name: String,
        talk_type: String,
        desc: String,
    },
    /// A Hide request was accepted.
    Hide { id: i32 },
}

/// Response from the registration endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// Whether this viewer is authorized to send mutations
    pub authenticated: bool,
    /// Channel endpoint to connect to
    pub url: String,
}

impl ClientRequest {
    /// Encodes the request as a JSON text frame.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a request from a JSON text frame.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ServerEvent {
    /// Decodes an inbound text frame.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_wire_format() {
        let request = ClientRequest::Create {
            name: "A".to_string(),
            talk_type: "forum topic".to_string(),
            desc: "d".to_string(),
        };

        assert_eq!(
            request.encode().unwrap(),
            r#"{"event":"Create","name":"A","talk_type":"forum topic","desc":"d"}"#
        );
    }

    #[test]
    fn test_hide_request_wire_format() {
        let request = ClientRequest::Hide { id: 3 };
        assert_eq!(request.encode().unwrap(), r#"{"event":"Hide","id":3}"#);
    }

    #[test]
    fn test_show_event_decode() {
        let event = ServerEvent::decode(
            r#"{"event":"Show","id":1,"name":"A","talk_type":"forum topic","desc":"d"}"#,
        )
        .unwrap();

        assert_eq!(
            event,
            ServerEvent::Show {
                id: 1,
                name: "A".to_string(),
                talk_type: "forum topic".to_string(),
                desc: "d".to_string(),
            }
        );
    }

    #[test]
    fn test_unrecognized_discriminant_is_rejected() {
        // the server also emits these; callers drop them on decode failure
        assert!(ServerEvent::decode(r#"{"event":"Authenticate","authenticated":true}"#).is_err());
        assert!(ServerEvent::decode(r#"{"event":"NOP"}"#).is_err());
        assert!(ServerEvent::decode("not json").is_err());
    }

    #[test]
    fn test_register_response_parse() {
        let response: RegisterResponse =
            serde_json::from_str(r#"{"authenticated":true,"url":"ws://localhost:8080/ws"}"#)
                .unwrap();

        assert!(response.authenticated);
        assert_eq!(response.url, "ws://localhost:8080/ws");
    }
}
