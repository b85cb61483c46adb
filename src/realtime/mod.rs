//! Real-time messaging channel.
//!
//! Frames are JSON envelopes `{"event": <name>, "data": <payload>}`.
//!
//! # Events
//!
//! - inbound `new_message`: [`ChatMessage`]
//! - inbound `message_count`: `{ "count": n }`
//! - outbound `send_message`: `{ "conversation_id": id, "content": text }`
//!
//! The transport itself is not implemented here. A [`Connection`] pairs an
//! emitting [`RealtimeChannel`] with a stream of raw inbound frames; the
//! [`LocalChannel`] builds one over tokio channels.

mod local;

use std::fmt;
use std::sync::Arc;

use futures::stream::BoxStream;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ChatMessage;
use crate::error::Result;

pub use local::{LocalChannel, LocalPeer};

/// Event name of a pushed chat message.
pub const NEW_MESSAGE: &str = "new_message";
/// Event name of an unread-count update.
pub const MESSAGE_COUNT: &str = "message_count";
/// Event name of an outgoing chat message.
pub const SEND_MESSAGE: &str = "send_message";

/// Wire envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payload of `message_count`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageCount {
    /// Unread count; fractions are truncated, non-numbers read as absent.
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<i64>,
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().filter(|n| n.is_finite()).map(|n| n.trunc() as i64))
    }))
}

/// Events the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    NewMessage(ChatMessage),
    MessageCount(MessageCount),
}

/// Events the controller emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutboundEvent {
    SendMessage {
        conversation_id: i64,
        content: String,
    },
}

impl Frame {
    /// Decode an inbound frame.
    ///
    /// Returns `Ok(None)` for event names the controller does not handle.
    pub fn decode(text: &str) -> Result<Option<InboundEvent>> {
        let frame: Frame = serde_json::from_str(text)?;
        let event = match frame.event.as_str() {
            NEW_MESSAGE => Some(InboundEvent::NewMessage(serde_json::from_value(frame.data)?)),
            MESSAGE_COUNT => Some(InboundEvent::MessageCount(
                // A bare `message_count` with no payload hides the badge.
                if frame.data.is_null() {
                    MessageCount::default()
                } else {
                    serde_json::from_value(frame.data)?
                },
            )),
            _ => None,
        };
        Ok(event)
    }

    /// Encode an outbound event.
    pub fn encode(event: &OutboundEvent) -> Result<String> {
        let frame = match event {
            OutboundEvent::SendMessage {
                conversation_id,
                content,
            } => Frame {
                event: SEND_MESSAGE.to_string(),
                data: serde_json::json!({
                    "conversation_id": conversation_id,
                    "content": content,
                }),
            },
        };
        Ok(serde_json::to_string(&frame)?)
    }
}

/// Outbound half of a real-time connection.
pub trait RealtimeChannel: Send + Sync {
    /// Send `event` without waiting for delivery.
    fn emit(&self, event: OutboundEvent) -> Result<()>;
}

/// An established connection.
pub struct Connection {
    pub channel: Arc<dyn RealtimeChannel>,
    /// Raw inbound frames, in arrival order.
    pub frames: BoxStream<'static, String>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    #[test]
    fn test_decode_new_message() {
        let event = Frame::decode(
            r#"{"event":"new_message","data":{"content":"hi","timestamp":"2024-01-01T00:00:00","is_sender":false}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            Some(InboundEvent::NewMessage(ChatMessage {
                content: "hi".into(),
                timestamp: Timestamp::Text("2024-01-01T00:00:00".into()),
                is_sender: false,
            }))
        );
    }

    #[test]
    fn test_decode_message_count_variants() {
        assert_eq!(
            Frame::decode(r#"{"event":"message_count","data":{"count":12}}"#).unwrap(),
            Some(InboundEvent::MessageCount(MessageCount { count: Some(12) }))
        );
        assert_eq!(
            Frame::decode(r#"{"event":"message_count"}"#).unwrap(),
            Some(InboundEvent::MessageCount(MessageCount { count: None }))
        );
    }

    #[test]
    fn test_decode_message_count_out_of_range() {
        let count = |data: &str| {
            match Frame::decode(&format!(r#"{{"event":"message_count","data":{data}}}"#)).unwrap() {
                Some(InboundEvent::MessageCount(c)) => c.count,
                other => panic!("unexpected event: {other:?}"),
            }
        };
        assert_eq!(count(r#"{"count":-1}"#), Some(-1));
        assert_eq!(count(r#"{"count":2.7}"#), Some(2));
        assert_eq!(count(r#"{"count":"5"}"#), None);
        assert_eq!(count(r#"{"count":null}"#), None);
        assert_eq!(count(r#"{"count":18446744073709551615}"#), Some(i64::MAX));
    }

    #[test]
    fn test_decode_new_message_with_float_millis() {
        for millis in ["1709296200000.5", "1.7092962e12"] {
            let frame = format!(
                r#"{{"event":"new_message","data":{{"content":"hi","timestamp":{millis},"is_sender":true}}}}"#
            );
            let Some(InboundEvent::NewMessage(message)) = Frame::decode(&frame).unwrap() else {
                panic!("expected a new message for {millis}");
            };
            assert!(matches!(message.timestamp, Timestamp::Millis(_)));
            assert_eq!(
                message.timestamp.to_datetime().map(|dt| dt.timestamp()),
                Some(1_709_296_200)
            );
        }
    }

    #[test]
    fn test_unknown_and_malformed_frames() {
        assert_eq!(Frame::decode(r#"{"event":"typing","data":{}}"#).unwrap(), None);
        assert!(Frame::decode("not json").is_err());
        assert!(Frame::decode(r#"{"event":"new_message","data":{"content":1}}"#).is_err());
    }

    #[test]
    fn test_encode_send_message() {
        let text = Frame::encode(&OutboundEvent::SendMessage {
            conversation_id: 9,
            content: "hello".into(),
        })
        .unwrap();
        let frame: Frame = serde_json::from_str(&text).unwrap();
        assert_eq!(frame.event, SEND_MESSAGE);
        assert_eq!(frame.data["conversation_id"], 9);
        assert_eq!(frame.data["content"], "hello");
    }
}
