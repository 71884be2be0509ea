//! Pointer input consumed by particle integration.
//!
//! The input collaborator owns a [`Pointer`] and mutates it from device
//! events; the mesh only reads it once per frame.

use crate::float::Float;
use crate::vec::Vec2;

/// Which button is held. Only [`PointerButton::Drag`] grabs cloth; any
/// other button cuts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    #[default]
    Drag,
    Other,
}

/// Pointer state in normalized device coordinates (both axes in [-1, 1],
/// y up).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pointer<F: Float> {
    /// A button is held.
    pub active: bool,
    pub button: PointerButton,
    pub position: Vec2<F>,
    /// Position at the previous move event.
    pub previous: Vec2<F>,
}

impl<F: Float> Pointer<F> {
    /// Released pointer at the origin. Never interacts with cloth.
    pub fn idle() -> Self {
        Pointer {
            active: false,
            button: PointerButton::Drag,
            position: Vec2::zero(),
            previous: Vec2::zero(),
        }
    }

    /// Held pointer that has not moved since the last event.
    pub fn pressed_at(position: Vec2<F>, button: PointerButton) -> Self {
        Pointer { active: true, button, position, previous: position }
    }

    pub fn press(&mut self, button: PointerButton) {
        self.active = true;
        self.button = button;
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    /// Record a move: the current position becomes the previous one.
    pub fn move_to(&mut self, position: Vec2<F>) {
        self.previous = self.position;
        self.position = position;
    }

    /// Record a move given in canvas pixels.
    pub fn move_to_screen(&mut self, x: F, y: F, width: F, height: F) {
        self.move_to(screen_to_ndc(x, y, width, height));
    }

    /// Movement since the previous event.
    pub fn delta(&self) -> Vec2<F> {
        self.position - self.previous
    }
}

/// Convert a canvas pixel (origin top-left, y down) to normalized device
/// coordinates (origin centre, y up).
pub fn screen_to_ndc<F: Float>(x: F, y: F, width: F, height: F) -> Vec2<F> {
    let one = F::one();
    let two = F::two();
    Vec2::new(x / width * two - one, (height - y) / height * two - one)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn screen_corners_map_to_unit_square() {
        let top_left = screen_to_ndc(0.0f32, 0.0, 800.0, 600.0);
        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);

        let centre = screen_to_ndc(400.0f32, 300.0, 800.0, 600.0);
        assert_relative_eq!(centre.x, 0.0);
        assert_relative_eq!(centre.y, 0.0);

        let bottom_right = screen_to_ndc(800.0f32, 600.0, 800.0, 600.0);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);
    }

    #[test]
    fn move_tracks_previous_position() {
        let mut pointer: Pointer<f32> = Pointer::idle();
        pointer.move_to(Vec2::new(0.25, 0.5));
        pointer.move_to(Vec2::new(0.5, 0.25));
        assert_eq!(pointer.previous, Vec2::new(0.25, 0.5));
        assert_relative_eq!(pointer.delta().x, 0.25);
        assert_relative_eq!(pointer.delta().y, -0.25);
    }

    #[test]
    fn press_and_release_toggle_activity() {
        let mut pointer: Pointer<f64> = Pointer::idle();
        pointer.press(PointerButton::Other);
        assert!(pointer.active);
        assert_eq!(pointer.button, PointerButton::Other);
        pointer.release();
        assert!(!pointer.active);
    }
}
