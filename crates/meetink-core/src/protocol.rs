//! Wire protocol for whiteboard replication.
//!
//! Events are JSON objects tagged by `type` and are carried by the
//! conference's application-messaging channel: delivery is at-least-once to
//! all current participants, unordered, with no acknowledgment. Every event
//! carries the author's opaque `userId` so receivers can drop their own
//! echoes.

use serde::{Deserialize, Serialize};

use crate::stroke::Stroke;

/// A broadcast whiteboard event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WhiteboardEvent {
    /// A participant opened the whiteboard for everyone.
    #[serde(rename = "whiteboard-open")]
    Open {
        #[serde(rename = "userId")]
        user_id: String,
        #[serde(rename = "userName", default)]
        user_name: String,
    },
    /// A participant closed the whiteboard for everyone.
    #[serde(rename = "whiteboard-close")]
    Close {
        #[serde(rename = "userId")]
        user_id: String,
    },
    /// A stroke snapshot: the full point list accumulated so far for one
    /// gesture. Re-sent on every extension, so late deliveries still
    /// converge on the complete stroke.
    #[serde(rename = "whiteboard-draw")]
    Draw {
        #[serde(rename = "userId")]
        user_id: String,
        stroke: Stroke,
    },
    /// Wipe the shared picture.
    #[serde(rename = "whiteboard-clear")]
    Clear {
        #[serde(rename = "userId")]
        user_id: String,
    },
    /// Remove the receiver's most recent committed stroke, whoever drew it.
    #[serde(rename = "whiteboard-undo")]
    Undo {
        #[serde(rename = "userId")]
        user_id: String,
    },
}

impl WhiteboardEvent {
    /// The id of the participant that emitted this event.
    pub fn author_id(&self) -> &str {
        match self {
            Self::Open { user_id, .. }
            | Self::Close { user_id }
            | Self::Draw { user_id, .. }
            | Self::Clear { user_id }
            | Self::Undo { user_id } => user_id,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse an inbound payload.
    ///
    /// Malformed JSON and unrecognized `type` tags are silently ignored
    /// (logged at debug), per the tolerance policy for this channel.
    pub fn decode(payload: &str) -> Option<Self> {
        match serde_json::from_str(payload) {
            Ok(event) => Some(event),
            Err(err) => {
                log::debug!("ignoring unrecognized whiteboard payload: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Rgba, StrokePoint};

    #[test]
    fn test_event_tags_on_the_wire() {
        let event = WhiteboardEvent::Open {
            user_id: "u1".into(),
            user_name: "Ada".into(),
        };
        let json = event.encode().unwrap();
        assert!(json.contains(r#""type":"whiteboard-open""#));
        assert!(json.contains(r#""userId":"u1""#));
        assert!(json.contains(r#""userName":"Ada""#));
    }

    #[test]
    fn test_draw_round_trip() {
        let mut stroke = Stroke::new(
            StrokePoint::new(10.0, 10.0),
            Rgba::opaque(59, 130, 246),
            4.0,
            7,
            "u1",
            "Ada",
        );
        stroke.add_point(StrokePoint::new(20.0, 20.0));
        let event = WhiteboardEvent::Draw { user_id: "u1".into(), stroke: stroke.clone() };

        let decoded = WhiteboardEvent::decode(&event.encode().unwrap()).unwrap();
        match decoded {
            WhiteboardEvent::Draw { stroke: back, .. } => assert_eq!(back, stroke),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        assert!(WhiteboardEvent::decode(r#"{"type":"whiteboard-zoom","userId":"u1"}"#).is_none());
        assert!(WhiteboardEvent::decode("not json").is_none());
    }

    #[test]
    fn test_open_without_name_decodes() {
        let event =
            WhiteboardEvent::decode(r#"{"type":"whiteboard-open","userId":"u1"}"#).unwrap();
        match event {
            WhiteboardEvent::Open { user_name, .. } => assert!(user_name.is_empty()),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_author_id_accessor() {
        let event = WhiteboardEvent::Undo { user_id: "u9".into() };
        assert_eq!(event.author_id(), "u9");
    }
}
