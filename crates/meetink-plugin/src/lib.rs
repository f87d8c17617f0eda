//! MeetInk plugin integration.
//!
//! The controller that owns a participant's whiteboard session, plus the
//! seams to the host conference runtime ([`HostUi`]) and the messaging
//! channel (`meetink_core::EventBroadcast`).

pub mod controller;
pub mod host;
pub mod toolbar;

pub use controller::WhiteboardController;
pub use host::{ContainerInfo, HostUi, ToolbarButton, launcher_button};
pub use toolbar::ToolbarAction;
