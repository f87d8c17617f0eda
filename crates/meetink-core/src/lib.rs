//! MeetInk Core Library
//!
//! Platform-agnostic state machine for the MeetInk conference whiteboard:
//! stroke capture, the committed picture, and the broadcast replication
//! protocol. Rendering and host integration live in the companion crates.

pub mod board;
pub mod capture;
pub mod error;
pub mod input;
pub mod protocol;
pub mod replication;
pub mod session;
pub mod stroke;
pub mod time;
pub mod tools;

pub use board::WhiteboardState;
pub use capture::StrokeCapture;
pub use error::WhiteboardError;
pub use input::{MouseButton, MouseInput, PointerEvent, TouchInput};
pub use protocol::WhiteboardEvent;
pub use replication::{EventBroadcast, RemoteChange, ReplicationEngine};
pub use session::{FALLBACK_NAME, SessionIdentity};
pub use stroke::{Rgba, Stroke, StrokePoint};
pub use tools::{BackgroundMode, ERASER_WIDTH, PALETTE, ToolSettings};
