//! On-canvas toolbar actions.
//!
//! The host renders the toolbar; the plugin only defines what each control
//! does. Everything user-visible goes through
//! [`crate::WhiteboardController::handle_action`].

/// A press on one of the on-canvas toolbar controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Close the whiteboard for everyone.
    Close,
    /// Wipe the shared picture.
    Clear,
    /// Remove the most recent stroke, whoever drew it.
    Undo,
    /// Download the picture as a PNG.
    Export,
    /// Pick one of the eight fixed palette colors (also leaves eraser
    /// mode).
    SelectColor(usize),
    /// Switch between pen and eraser.
    ToggleEraser,
    /// Switch presentation mode on or off.
    TogglePresentation,
    /// Flip the white/transparent background (disabled while presentation
    /// mode is active).
    ToggleBackground,
}
