//! Pointer tracking for field interaction

use glam::Vec2;

/// Last known pointer position in logical surface coordinates
///
/// `None` means the pointer is off the surface; the stepper then applies no
/// interaction force to any entity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    position: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moved(&mut self, local: Vec2) {
        self.position = if local.is_finite() { Some(local) } else { None };
    }

    pub fn left(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_then_leave() {
        let mut pointer = PointerTracker::new();
        assert_eq!(pointer.position(), None);

        pointer.moved(Vec2::new(10.0, 20.0));
        assert_eq!(pointer.position(), Some(Vec2::new(10.0, 20.0)));

        pointer.moved(Vec2::new(11.0, 21.0));
        assert_eq!(pointer.position(), Some(Vec2::new(11.0, 21.0)));

        pointer.left();
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn test_non_finite_position_is_ignored() {
        let mut pointer = PointerTracker::new();
        pointer.moved(Vec2::new(f32::NAN, 0.0));
        assert_eq!(pointer.position(), None);
    }
}
