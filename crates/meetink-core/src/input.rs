//! Pointer input normalization for mouse and touch.
//!
//! Both adapters translate raw platform events into the same
//! down/move/up vocabulary so gesture handling has a single code path and
//! can be driven by synthetic sequences in tests.

use crate::stroke::StrokePoint;

/// A normalized pointer gesture event, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(StrokePoint),
    Move(StrokePoint),
    Up,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Translates raw mouse events into pointer gestures.
///
/// Only the primary button draws; motion outside a press is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseInput {
    pressed: bool,
}

impl MouseInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button_down(&mut self, button: MouseButton, x: f64, y: f64) -> Option<PointerEvent> {
        if button != MouseButton::Left || self.pressed {
            return None;
        }
        self.pressed = true;
        Some(PointerEvent::Down(StrokePoint::new(x, y)))
    }

    pub fn moved(&mut self, x: f64, y: f64) -> Option<PointerEvent> {
        self.pressed.then_some(PointerEvent::Move(StrokePoint::new(x, y)))
    }

    pub fn button_up(&mut self, button: MouseButton) -> Option<PointerEvent> {
        if button != MouseButton::Left || !self.pressed {
            return None;
        }
        self.pressed = false;
        Some(PointerEvent::Up)
    }
}

/// Translates raw touch events into pointer gestures.
///
/// Only the primary contact is tracked; second and further simultaneous
/// touches are ignored entirely (multi-touch is not supported).
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchInput {
    active: Option<u64>,
}

impl TouchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(
        &mut self,
        id: u64,
        x: f64,
        y: f64,
        force: Option<f64>,
    ) -> Option<PointerEvent> {
        if self.active.is_some() {
            return None;
        }
        self.active = Some(id);
        Some(PointerEvent::Down(point(x, y, force)))
    }

    pub fn touch_move(
        &mut self,
        id: u64,
        x: f64,
        y: f64,
        force: Option<f64>,
    ) -> Option<PointerEvent> {
        (self.active == Some(id)).then_some(PointerEvent::Move(point(x, y, force)))
    }

    pub fn touch_end(&mut self, id: u64) -> Option<PointerEvent> {
        if self.active != Some(id) {
            return None;
        }
        self.active = None;
        Some(PointerEvent::Up)
    }
}

fn point(x: f64, y: f64, force: Option<f64>) -> StrokePoint {
    match force {
        Some(force) => StrokePoint::with_pressure(x, y, force),
        None => StrokePoint::new(x, y),
    }
}
