//! Whiteboard state: the committed stroke list and its lifecycle.

use crate::stroke::Stroke;

/// The per-participant record of the shared picture.
///
/// `strokes` holds committed strokes in arrival order. Arrival order may
/// differ between participants; the only guarantee is that every committed
/// stroke a participant has received is present. The whole state is created
/// empty when the whiteboard opens and discarded when it closes — nothing is
/// persisted across sessions.
#[derive(Debug, Clone, Default)]
pub struct WhiteboardState {
    strokes: Vec<Stroke>,
    is_active: bool,
}

impl WhiteboardState {
    /// Create a closed, empty whiteboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the overlay with an empty picture.
    pub fn open(&mut self) {
        self.strokes.clear();
        self.is_active = true;
    }

    /// Deactivate and discard all state.
    pub fn close(&mut self) {
        self.strokes.clear();
        self.is_active = false;
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Append a committed stroke.
    ///
    /// A stroke with zero points is discarded and never stored; returns
    /// whether the stroke was kept.
    pub fn commit(&mut self, stroke: Stroke) -> bool {
        if stroke.is_empty() {
            log::debug!("discarding empty stroke from {}", stroke.author_id);
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    /// Remove every committed stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Remove the most recently committed stroke, regardless of author.
    ///
    /// Returns false when there is nothing to remove. There is no redo and
    /// no per-author history: last action wins.
    pub fn undo(&mut self) -> bool {
        self.strokes.pop().is_some()
    }

    /// Committed strokes in arrival order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
