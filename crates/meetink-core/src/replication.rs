//! Replication engine: outbound event queue and inbound event application.

use std::collections::VecDeque;

use crate::board::WhiteboardState;
use crate::error::WhiteboardError;
use crate::protocol::WhiteboardEvent;
use crate::session::FALLBACK_NAME;
use crate::stroke::Stroke;

/// The externally-supplied messaging collaborator.
///
/// Implementations deliver the payload to all current conference
/// participants with at-least-once semantics, no ordering guarantee and no
/// acknowledgment. Sends are fire-and-forget from the engine's perspective:
/// a failure is logged and the event dropped, never retried.
pub trait EventBroadcast {
    fn send(&self, payload: &str) -> Result<(), WhiteboardError>;
}

/// What an applied remote event did, so the caller can pick the right
/// render path and user notification.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteChange {
    /// A named peer opened the whiteboard; the overlay should activate with
    /// an empty picture.
    Opened { author_name: String },
    /// A peer closed the whiteboard; the overlay should tear down.
    Closed,
    /// A stroke was appended to the committed list (it is now the last
    /// element); an incremental render suffices.
    StrokeAdded,
    /// The committed list was emptied; the canvas needs a full render.
    Cleared,
    /// The last committed stroke was removed; the remaining list needs a
    /// full replay.
    Undone,
}

/// Maps local commands to outbound events and applies inbound ones.
///
/// All outbound traffic goes through one queue owned here; callers enqueue
/// and a single [`ReplicationEngine::flush`] drains it, which keeps
/// transport failure handling in one place.
#[derive(Debug)]
pub struct ReplicationEngine {
    local_id: String,
    outbound: VecDeque<WhiteboardEvent>,
}

impl ReplicationEngine {
    pub fn new(local_id: impl Into<String>) -> Self {
        Self { local_id: local_id.into(), outbound: VecDeque::new() }
    }

    // --- Outbound ---

    pub fn queue_open(&mut self, user_name: &str) {
        self.outbound.push_back(WhiteboardEvent::Open {
            user_id: self.local_id.clone(),
            user_name: user_name.to_string(),
        });
    }

    pub fn queue_close(&mut self) {
        self.outbound.push_back(WhiteboardEvent::Close { user_id: self.local_id.clone() });
    }

    /// Queue a cumulative stroke snapshot (called on every gesture
    /// extension).
    pub fn queue_draw(&mut self, stroke: Stroke) {
        self.outbound.push_back(WhiteboardEvent::Draw {
            user_id: self.local_id.clone(),
            stroke,
        });
    }

    pub fn queue_clear(&mut self) {
        self.outbound.push_back(WhiteboardEvent::Clear { user_id: self.local_id.clone() });
    }

    pub fn queue_undo(&mut self) {
        self.outbound.push_back(WhiteboardEvent::Undo { user_id: self.local_id.clone() });
    }

    pub fn pending(&self) -> usize {
        self.outbound.len()
    }

    /// Drain the queue through the transport.
    ///
    /// A send failure is logged and the event dropped; drawing continuity
    /// never blocks on the channel and a lost message has no recovery
    /// beyond later cumulative re-sends.
    pub fn flush(&mut self, transport: &dyn EventBroadcast) {
        while let Some(event) = self.outbound.pop_front() {
            let payload = match event.encode() {
                Ok(payload) => payload,
                Err(err) => {
                    log::warn!("dropping unencodable whiteboard event: {err}");
                    continue;
                }
            };
            if let Err(err) = transport.send(&payload) {
                log::warn!("whiteboard broadcast failed: {err}");
            }
        }
    }

    // --- Inbound ---

    /// Apply a remote event to the local board.
    ///
    /// Returns `None` for own echoes, for events that changed nothing, and
    /// for picture events that arrive while the overlay is closed (a late
    /// joiner only sees events after the next open).
    pub fn apply(
        &self,
        board: &mut WhiteboardState,
        event: WhiteboardEvent,
    ) -> Option<RemoteChange> {
        if event.author_id() == self.local_id {
            return None;
        }

        match event {
            WhiteboardEvent::Open { user_name, .. } => {
                if board.is_active() {
                    log::debug!("ignoring whiteboard-open while already active");
                    return None;
                }
                board.open();
                let author_name = if user_name.is_empty() {
                    FALLBACK_NAME.to_string()
                } else {
                    user_name
                };
                Some(RemoteChange::Opened { author_name })
            }
            WhiteboardEvent::Close { .. } => {
                if !board.is_active() {
                    return None;
                }
                board.close();
                Some(RemoteChange::Closed)
            }
            WhiteboardEvent::Draw { mut stroke, .. } => {
                if !board.is_active() {
                    log::debug!("ignoring whiteboard-draw while closed");
                    return None;
                }
                if stroke.author_name.is_empty() {
                    stroke.author_name = FALLBACK_NAME.to_string();
                }
                board.commit(stroke).then_some(RemoteChange::StrokeAdded)
            }
            WhiteboardEvent::Clear { .. } => {
                if !board.is_active() {
                    return None;
                }
                board.clear();
                Some(RemoteChange::Cleared)
            }
            WhiteboardEvent::Undo { .. } => {
                if !board.is_active() {
                    return None;
                }
                board.undo().then_some(RemoteChange::Undone)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Rgba, StrokePoint};
    use std::cell::RefCell;

    /// Records payloads; optionally fails every send.
    struct MemoryBus {
        sent: RefCell<Vec<String>>,
        failing: bool,
    }

    impl MemoryBus {
        fn new() -> Self {
            Self { sent: RefCell::new(Vec::new()), failing: false }
        }

        fn failing() -> Self {
            Self { sent: RefCell::new(Vec::new()), failing: true }
        }
    }

    impl EventBroadcast for MemoryBus {
        fn send(&self, payload: &str) -> Result<(), WhiteboardError> {
            if self.failing {
                return Err(WhiteboardError::Transport("channel down".into()));
            }
            self.sent.borrow_mut().push(payload.to_string());
            Ok(())
        }
    }

    fn stroke(author: &str, n_points: usize) -> Stroke {
        let mut stroke = Stroke::new(
            StrokePoint::new(0.0, 0.0),
            Rgba::black(),
            4.0,
            0,
            author,
            "Peer",
        );
        for i in 1..n_points {
            stroke.add_point(StrokePoint::new(i as f64, i as f64));
        }
        stroke
    }

    #[test]
    fn test_flush_drains_in_order() {
        let mut engine = ReplicationEngine::new("me");
        let bus = MemoryBus::new();

        engine.queue_open("Ada");
        engine.queue_draw(stroke("me", 2));
        engine.queue_clear();
        engine.flush(&bus);

        let sent = bus.sent.borrow();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].contains("whiteboard-open"));
        assert!(sent[1].contains("whiteboard-draw"));
        assert!(sent[2].contains("whiteboard-clear"));
        assert_eq!(engine.pending(), 0);
    }

    #[test]
    fn test_send_failure_is_swallowed() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut engine = ReplicationEngine::new("me");
        let bus = MemoryBus::failing();

        engine.queue_undo();
        engine.flush(&bus);

        // Dropped, not retried.
        assert_eq!(engine.pending(), 0);
    }

    #[test]
    fn test_own_echo_is_ignored() {
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();
        board.open();

        let change = engine.apply(
            &mut board,
            WhiteboardEvent::Draw { user_id: "me".into(), stroke: stroke("me", 2) },
        );
        assert!(change.is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn test_remote_open_close_lifecycle() {
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();

        let change = engine.apply(
            &mut board,
            WhiteboardEvent::Open { user_id: "peer".into(), user_name: "Ada".into() },
        );
        assert_eq!(change, Some(RemoteChange::Opened { author_name: "Ada".into() }));
        assert!(board.is_active());

        // A duplicate open delivery does not wipe the picture.
        board.commit(stroke("peer", 2));
        let change = engine.apply(
            &mut board,
            WhiteboardEvent::Open { user_id: "peer".into(), user_name: "Ada".into() },
        );
        assert!(change.is_none());
        assert_eq!(board.len(), 1);

        let change =
            engine.apply(&mut board, WhiteboardEvent::Close { user_id: "peer".into() });
        assert_eq!(change, Some(RemoteChange::Closed));
        assert!(!board.is_active());
        assert!(board.is_empty());
    }

    #[test]
    fn test_remote_open_without_name_uses_fallback() {
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();

        let change = engine.apply(
            &mut board,
            WhiteboardEvent::Open { user_id: "peer".into(), user_name: String::new() },
        );
        assert_eq!(
            change,
            Some(RemoteChange::Opened { author_name: FALLBACK_NAME.into() })
        );
    }

    #[test]
    fn test_draw_patches_missing_author_name() {
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();
        board.open();

        let mut anonymous = stroke("peer", 2);
        anonymous.author_name.clear();
        let change = engine.apply(
            &mut board,
            WhiteboardEvent::Draw { user_id: "peer".into(), stroke: anonymous },
        );
        assert_eq!(change, Some(RemoteChange::StrokeAdded));
        assert_eq!(board.last().unwrap().author_name, FALLBACK_NAME);
    }

    #[test]
    fn test_duplicate_draw_deliveries_both_append() {
        // The sender re-broadcasts the full point list on every extension;
        // a receiver that got both a partial and the final snapshot keeps
        // two entries for the same gesture. Accepted protocol behavior.
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();
        board.open();

        let partial = stroke("peer", 2);
        let full = stroke("peer", 3);
        engine.apply(
            &mut board,
            WhiteboardEvent::Draw { user_id: "peer".into(), stroke: partial },
        );
        engine.apply(
            &mut board,
            WhiteboardEvent::Draw { user_id: "peer".into(), stroke: full },
        );

        assert_eq!(board.len(), 2);
        assert_eq!(board.strokes()[0].len(), 2);
        assert_eq!(board.strokes()[1].len(), 3);
    }

    #[test]
    fn test_picture_events_ignored_while_closed() {
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();

        assert!(engine
            .apply(
                &mut board,
                WhiteboardEvent::Draw { user_id: "peer".into(), stroke: stroke("peer", 2) }
            )
            .is_none());
        assert!(engine
            .apply(&mut board, WhiteboardEvent::Clear { user_id: "peer".into() })
            .is_none());
        assert!(engine
            .apply(&mut board, WhiteboardEvent::Undo { user_id: "peer".into() })
            .is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn test_remote_undo_removes_any_authors_tail() {
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();
        board.open();
        board.commit(stroke("me", 2));
        board.commit(stroke("other-peer", 2));

        let change =
            engine.apply(&mut board, WhiteboardEvent::Undo { user_id: "peer".into() });
        assert_eq!(change, Some(RemoteChange::Undone));
        assert_eq!(board.len(), 1);
        assert_eq!(board.last().unwrap().author_id, "me");

        // Undo on an empty board changes nothing.
        board.clear();
        let change =
            engine.apply(&mut board, WhiteboardEvent::Undo { user_id: "peer".into() });
        assert!(change.is_none());
    }

    #[test]
    fn test_remote_clear_empties_the_picture() {
        let engine = ReplicationEngine::new("me");
        let mut board = WhiteboardState::new();
        board.open();
        board.commit(stroke("me", 3));

        let change =
            engine.apply(&mut board, WhiteboardEvent::Clear { user_id: "peer".into() });
        assert_eq!(change, Some(RemoteChange::Cleared));
        assert!(board.is_empty());
    }
}
