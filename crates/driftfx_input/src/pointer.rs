//! Cursor tracking over the effect surface

use driftfx_math::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::WindowEvent;

/// Tracks where the cursor is, if it is over the surface at all
///
/// Window events feed in through [`Self::process_window_event`]; the effect
/// loop reads back a sampled position once per frame. While the cursor is
/// outside the window [`Self::sample`] returns `None` and interactive
/// forces switch off rather than pulling toward a stale position.
pub struct PointerTracker {
    position: Vec2,
    inside: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            inside: false,
        }
    }

    /// Fold a window event into the tracker
    ///
    /// Returns `true` when the event was a cursor event and was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.process_moved(*position);
                true
            }
            WindowEvent::CursorEntered { .. } => {
                self.process_entered();
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.process_left();
                true
            }
            _ => false,
        }
    }

    /// Process a cursor position in surface pixel coordinates
    pub fn process_moved(&mut self, position: PhysicalPosition<f64>) {
        self.position = Vec2::new(position.x as f32, position.y as f32);
        self.inside = true;
    }

    /// Process the cursor entering the window
    pub fn process_entered(&mut self) {
        self.inside = true;
    }

    /// Process the cursor leaving the window
    pub fn process_left(&mut self) {
        self.inside = false;
    }

    /// Current pointer position, or `None` when the cursor is outside
    pub fn sample(&self) -> Option<Vec2> {
        self.inside.then_some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::DeviceId;

    #[test]
    fn test_no_position_before_first_move() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.sample(), None);
    }

    #[test]
    fn test_moved_then_sampled() {
        let mut tracker = PointerTracker::new();
        tracker.process_moved(PhysicalPosition::new(120.0, 48.5));
        assert_eq!(tracker.sample(), Some(Vec2::new(120.0, 48.5)));
    }

    #[test]
    fn test_leaving_clears_sample() {
        let mut tracker = PointerTracker::new();
        tracker.process_moved(PhysicalPosition::new(10.0, 10.0));
        tracker.process_left();
        assert_eq!(tracker.sample(), None);
    }

    #[test]
    fn test_reentry_restores_last_position() {
        let mut tracker = PointerTracker::new();
        tracker.process_moved(PhysicalPosition::new(30.0, 40.0));
        tracker.process_left();
        tracker.process_entered();
        assert_eq!(tracker.sample(), Some(Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn test_window_events_fold_into_sample() {
        let mut tracker = PointerTracker::new();

        let moved = WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(64.0, 32.0),
        };
        assert!(tracker.process_window_event(&moved));
        assert_eq!(tracker.sample(), Some(Vec2::new(64.0, 32.0)));

        let left = WindowEvent::CursorLeft {
            device_id: DeviceId::dummy(),
        };
        assert!(tracker.process_window_event(&left));
        assert_eq!(tracker.sample(), None);

        // Unrelated events are not consumed
        assert!(!tracker.process_window_event(&WindowEvent::CloseRequested));
    }
}
