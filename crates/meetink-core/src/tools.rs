//! Tool selection state: pen color and width, eraser, background modes.

use crate::stroke::Rgba;

/// Width applied to every new pen stroke.
pub const DEFAULT_PEN_WIDTH: f64 = 4.0;

/// Eraser strokes are plain strokes with a fixed, larger width.
pub const ERASER_WIDTH: f64 = 24.0;

/// The fixed color palette offered by the toolbar.
///
/// Black and white plus six 500-level accents.
pub const PALETTE: [Rgba; 8] = [
    Rgba::opaque(0, 0, 0),       // Black
    Rgba::opaque(239, 68, 68),   // Red
    Rgba::opaque(245, 158, 11),  // Amber
    Rgba::opaque(16, 185, 129),  // Emerald
    Rgba::opaque(59, 130, 246),  // Blue
    Rgba::opaque(168, 85, 247),  // Purple
    Rgba::opaque(236, 72, 153),  // Pink
    Rgba::opaque(255, 255, 255), // White
];

/// Background rendering mode for the overlay canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    /// Opaque white fill; strokes drawn normally.
    #[default]
    White,
    /// Cleared on every full render so the video underneath shows through.
    Transparent,
}

impl BackgroundMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::White => Self::Transparent,
            Self::Transparent => Self::White,
        }
    }

    /// Opaque fill color, or `None` when the canvas is cleared instead.
    pub fn fill(self) -> Option<Rgba> {
        match self {
            Self::White => Some(Rgba::white()),
            Self::Transparent => None,
        }
    }

    /// Effective pen color for eraser strokes drawn against this background.
    ///
    /// The color is baked into the stroke when the gesture begins, so
    /// switching the background afterwards does not restyle old eraser
    /// strokes. Known artifact of the protocol, kept as-is.
    pub fn eraser_color(self) -> Rgba {
        match self {
            Self::White => Rgba::white(),
            Self::Transparent => Rgba::black(),
        }
    }
}

/// The participant's current tool selection.
///
/// Owned by the controller and passed to the capture component when a
/// gesture begins; a stroke's appearance is fixed at that moment and never
/// updated retroactively.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub color: Rgba,
    pub width: f64,
    pub eraser: bool,
    pub background: BackgroundMode,
    /// Presentation mode forces a transparent background and disables the
    /// background toggle while active.
    pub presentation: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: PALETTE[0],
            width: DEFAULT_PEN_WIDTH,
            eraser: false,
            background: BackgroundMode::default(),
            presentation: false,
        }
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a palette color by index; leaves eraser mode.
    ///
    /// Returns false for an out-of-range index.
    pub fn select_color(&mut self, index: usize) -> bool {
        match PALETTE.get(index) {
            Some(&color) => {
                self.color = color;
                self.eraser = false;
                true
            }
            None => false,
        }
    }

    pub fn toggle_eraser(&mut self) {
        self.eraser = !self.eraser;
    }

    /// The background mode actually in effect.
    pub fn effective_background(&self) -> BackgroundMode {
        if self.presentation {
            BackgroundMode::Transparent
        } else {
            self.background
        }
    }

    /// Flip the white/transparent toggle.
    ///
    /// A no-op while presentation mode is active (the toggle control is
    /// disabled); returns whether the mode changed.
    pub fn toggle_background(&mut self) -> bool {
        if self.presentation {
            return false;
        }
        self.background = self.background.toggled();
        true
    }

    pub fn toggle_presentation(&mut self) {
        self.presentation = !self.presentation;
    }

    /// Color for a stroke begun right now.
    pub fn stroke_color(&self) -> Rgba {
        if self.eraser {
            self.effective_background().eraser_color()
        } else {
            self.color
        }
    }

    /// Width for a stroke begun right now.
    pub fn stroke_width(&self) -> f64 {
        if self.eraser { ERASER_WIDTH } else { self.width }
    }
}
