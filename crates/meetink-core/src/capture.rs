//! Local capture: turns a pointer gesture into a committed stroke.

use crate::session::SessionIdentity;
use crate::stroke::{Stroke, StrokePoint};
use crate::tools::ToolSettings;

/// Gesture state machine for the local participant.
///
/// A pointer-down begins an in-progress stroke, each pointer-move extends
/// it, and pointer-up commits it. The in-progress stroke lives here, not in
/// [`crate::board::WhiteboardState`], so a remote clear cannot touch it and
/// gesture handling is testable with synthetic event sequences.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    current: Option<Stroke>,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture, fixing color, width and authorship from the current
    /// tool selection.
    ///
    /// A begin while a gesture is already in progress is dropped rather than
    /// overwriting it (duplicate down events happen); returns whether a new
    /// gesture started.
    pub fn begin(
        &mut self,
        point: StrokePoint,
        tools: &ToolSettings,
        session: &SessionIdentity,
        timestamp_ms: u64,
    ) -> bool {
        if self.current.is_some() {
            log::debug!("ignoring pointer-down during an active gesture");
            return false;
        }
        self.current = Some(Stroke::new(
            point,
            tools.stroke_color(),
            tools.stroke_width(),
            timestamp_ms,
            session.user_id(),
            session.display_name(),
        ));
        true
    }

    /// Append a point to the in-progress stroke.
    ///
    /// Returns the accumulated stroke so the caller can broadcast the full
    /// point list (every extension is re-sent in full; a peer that missed
    /// earlier deliveries converges on a later one). `None` when no gesture
    /// is in progress.
    pub fn extend(&mut self, point: StrokePoint) -> Option<&Stroke> {
        let stroke = self.current.as_mut()?;
        stroke.add_point(point);
        Some(&*stroke)
    }

    /// Finish the gesture and hand the stroke over for commit.
    ///
    /// A click with no drag still yields a one-point stroke; renderers treat
    /// it as a dot.
    pub fn end(&mut self) -> Option<Stroke> {
        self.current.take()
    }

    /// Drop the in-progress stroke without committing (overlay closed
    /// mid-gesture).
    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// The in-progress stroke, for immediate local rendering.
    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Rgba;
    use crate::tools::ERASER_WIDTH;

    fn session() -> SessionIdentity {
        SessionIdentity::with_name("Ada")
    }

    #[test]
    fn test_begin_extend_end() {
        let mut capture = StrokeCapture::new();
        let tools = ToolSettings::new();
        let session = session();

        assert!(capture.begin(StrokePoint::new(10.0, 10.0), &tools, &session, 42));
        assert!(capture.is_active());

        let snapshot = capture.extend(StrokePoint::new(20.0, 20.0)).unwrap();
        assert_eq!(snapshot.len(), 2);
        let snapshot = capture.extend(StrokePoint::new(30.0, 10.0)).unwrap();
        assert_eq!(snapshot.len(), 3);

        let stroke = capture.end().unwrap();
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.timestamp, 42);
        assert_eq!(stroke.author_name, "Ada");
        assert!(!capture.is_active());
    }

    #[test]
    fn test_duplicate_begin_is_dropped() {
        let mut capture = StrokeCapture::new();
        let tools = ToolSettings::new();
        let session = session();

        assert!(capture.begin(StrokePoint::new(1.0, 1.0), &tools, &session, 0));
        assert!(!capture.begin(StrokePoint::new(9.0, 9.0), &tools, &session, 1));

        // The original gesture is untouched.
        let stroke = capture.end().unwrap();
        assert_eq!(stroke.len(), 1);
        assert!((stroke.points[0].x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_click_without_drag_yields_one_point_stroke() {
        let mut capture = StrokeCapture::new();
        capture.begin(StrokePoint::new(5.0, 5.0), &ToolSettings::new(), &session(), 0);
        let stroke = capture.end().unwrap();
        assert_eq!(stroke.len(), 1);
    }

    #[test]
    fn test_extend_without_gesture_is_none() {
        let mut capture = StrokeCapture::new();
        assert!(capture.extend(StrokePoint::new(1.0, 1.0)).is_none());
        assert!(capture.end().is_none());
    }

    #[test]
    fn test_appearance_fixed_at_begin() {
        let mut capture = StrokeCapture::new();
        let mut tools = ToolSettings::new();
        let session = session();

        capture.begin(StrokePoint::new(0.0, 0.0), &tools, &session, 0);

        // Changing the tool mid-gesture does not restyle the stroke.
        tools.select_color(1);
        tools.toggle_eraser();
        capture.extend(StrokePoint::new(1.0, 1.0));

        let stroke = capture.end().unwrap();
        assert_eq!(stroke.color, Rgba::black());
        assert!((stroke.width - ERASER_WIDTH).abs() > f64::EPSILON);
    }

    #[test]
    fn test_eraser_stroke_bakes_background_color() {
        let mut capture = StrokeCapture::new();
        let mut tools = ToolSettings::new();
        tools.toggle_eraser();

        capture.begin(StrokePoint::new(0.0, 0.0), &tools, &session(), 0);
        let stroke = capture.end().unwrap();
        assert_eq!(stroke.color, Rgba::white());
        assert!((stroke.width - ERASER_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let mut capture = StrokeCapture::new();
        capture.begin(StrokePoint::new(0.0, 0.0), &ToolSettings::new(), &session(), 0);
        capture.cancel();
        assert!(capture.end().is_none());
    }
}
