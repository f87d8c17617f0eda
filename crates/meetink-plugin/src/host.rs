//! The host conference runtime, seen from the plugin.
//!
//! The host owns the DOM, the toolbar and all presentation chrome; the
//! plugin only needs the small set of capabilities below. Click routing is
//! the host's job: it mounts the registered button and calls back into
//! [`crate::WhiteboardController`] when the user presses it.

use meetink_core::WhiteboardError;

/// Dimensions of the conference's video display container, which the
/// overlay canvas covers exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub width: u32,
    pub height: u32,
}

/// A button the host should mount in the conference toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    /// Icon identifier in the host's icon set.
    pub icon: &'static str,
    pub tooltip: &'static str,
}

/// Capabilities the host environment provides to the plugin.
pub trait HostUi {
    /// Mount a toolbar button with icon and tooltip.
    fn add_toolbar_button(&mut self, button: ToolbarButton) -> Result<(), WhiteboardError>;

    /// Show a transient notification (toast) to the local user.
    fn show_notification(&mut self, message: &str);

    /// Locate the video display container the overlay attaches to.
    ///
    /// `None` means the container cannot be found — fatal to opening the
    /// whiteboard.
    fn video_container(&self) -> Option<ContainerInfo>;

    /// Hand a finished export to the user as a client-side download. No
    /// network upload is involved.
    fn deliver_download(&mut self, filename: &str, bytes: &[u8]) -> Result<(), WhiteboardError>;
}

/// The single button the plugin registers at load.
pub fn launcher_button() -> ToolbarButton {
    ToolbarButton { icon: "edit", tooltip: "Shared whiteboard" }
}
