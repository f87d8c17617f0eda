//! Full and incremental rendering of the committed picture.

use meetink_core::{BackgroundMode, Stroke};
use peniko::Color;

use crate::font;
use crate::surface::DrawSurface;

/// How long after its creation a stroke keeps its author label suppressed
/// (unless it is the newest stroke). A clutter heuristic, not a correctness
/// requirement; tune freely.
pub const LABEL_LINGER_MS: u64 = 2000;

/// Gap between a stroke's final point and its label.
const LABEL_OFFSET: f64 = 8.0;

/// Everything a render pass needs to know about the picture.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Committed strokes in arrival order.
    pub strokes: &'a [Stroke],
    /// The user's white/transparent toggle.
    pub background: BackgroundMode,
    /// Presentation mode forces a transparent background regardless of the
    /// toggle.
    pub presentation: bool,
    /// Render time in epoch milliseconds, used by the label policy.
    pub now_ms: u64,
}

impl<'a> RenderContext<'a> {
    pub fn new(strokes: &'a [Stroke], now_ms: u64) -> Self {
        Self {
            strokes,
            background: BackgroundMode::default(),
            presentation: false,
            now_ms,
        }
    }

    pub fn with_background(mut self, background: BackgroundMode) -> Self {
        self.background = background;
        self
    }

    pub fn with_presentation(mut self, presentation: bool) -> Self {
        self.presentation = presentation;
        self
    }

    /// The background mode actually applied.
    pub fn effective_background(&self) -> BackgroundMode {
        if self.presentation {
            BackgroundMode::Transparent
        } else {
            self.background
        }
    }

    /// Recompute the whole canvas: background, then every committed stroke
    /// in list order.
    ///
    /// Used after undo, clear, or a background/mode change, where the
    /// picture must reflect a recomputed set rather than a delta. Given the
    /// same stroke list and render time this is deterministic and
    /// reproduces exactly the pixels of incrementally drawing each stroke
    /// in order onto the fresh background.
    pub fn render_full(&self, surface: &mut dyn DrawSurface) {
        match self.effective_background().fill() {
            Some(color) => surface.fill(color.into()),
            None => surface.clear(),
        }
        for stroke in self.strokes {
            self.draw_stroke(surface, stroke, self.should_label(stroke));
        }
    }

    /// Draw one committed stroke on top of the existing canvas contents.
    ///
    /// The low-latency path for `draw` events; no clearing, no replay.
    pub fn render_incremental(&self, surface: &mut dyn DrawSurface, stroke: &Stroke) {
        self.draw_stroke(surface, stroke, self.should_label(stroke));
    }

    /// Draw the local in-progress stroke. Never labeled; labels appear at
    /// commit.
    pub fn render_in_progress(&self, surface: &mut dyn DrawSurface, stroke: &Stroke) {
        self.draw_stroke(surface, stroke, false);
    }

    /// A stroke is labeled when it is the most recently committed one, or
    /// when it has been on the board longer than [`LABEL_LINGER_MS`].
    fn should_label(&self, stroke: &Stroke) -> bool {
        self.strokes.last().is_some_and(|last| last == stroke)
            || self.now_ms.saturating_sub(stroke.timestamp) > LABEL_LINGER_MS
    }

    fn draw_stroke(&self, surface: &mut dyn DrawSurface, stroke: &Stroke, label: bool) {
        if stroke.is_empty() {
            return;
        }
        let color: Color = stroke.color.into();
        surface.stroke_polyline(&stroke.points, color, stroke.width);

        if !label || stroke.author_name.is_empty() {
            return;
        }
        let Some(anchor) = stroke.last_point() else {
            return;
        };
        let max_x = f64::from(surface.width()) - f64::from(font::text_width(&stroke.author_name));
        let max_y = f64::from(surface.height()) - f64::from(font::GLYPH_HEIGHT);
        let x = (anchor.x + LABEL_OFFSET).clamp(0.0, max_x.max(0.0));
        let y = (anchor.y + LABEL_OFFSET).clamp(0.0, max_y.max(0.0));
        surface.draw_text(&stroke.author_name, x, y, color);
    }
}
