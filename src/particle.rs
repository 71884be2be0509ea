//! Verlet particles with pointer interaction and boundary bounce.

use alloc::vec::Vec;

use crate::config::ClothConfig;
use crate::constraint::ConstraintId;
use crate::float::Float;
use crate::pointer::{Pointer, PointerButton};
use crate::vec::{Vec2, Vec3};

/// What the pointer did to a particle during [`Particle::integrate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    None,
    /// Moved rigidly with the pointer.
    Dragged,
    /// Inside the cut radius. The owner must free the particle.
    Cut,
}

/// A Verlet particle: velocity is implied by `pos - prev_pos`.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    /// Explicit velocity accumulator, consumed and zeroed each step.
    pub velocity: Vec3<F>,
    pin: Option<Vec2<F>>,
    constraints: Vec<ConstraintId>,
    freed: bool,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec3<F>) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            velocity: Vec3::zero(),
            pin: None,
            constraints: Vec::new(),
            freed: false,
        }
    }

    /// Anchor to a fixed world position. Pins are permanent.
    pub fn pin(&mut self, x: F, y: F) {
        self.pin = Some(Vec2::new(x, y));
    }

    pub fn pin_position(&self) -> Option<Vec2<F>> {
        self.pin
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    /// Removed from the cloth. The slot stays so indices remain stable.
    pub fn is_freed(&self) -> bool {
        self.freed
    }

    pub(crate) fn mark_freed(&mut self) {
        self.freed = true;
    }

    /// Every link touching this particle, in insertion order.
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub(crate) fn attach(&mut self, id: ConstraintId) {
        self.constraints.push(id);
    }

    pub(crate) fn detach(&mut self, id: ConstraintId) {
        self.constraints.retain(|&c| c != id);
    }

    pub(crate) fn take_constraints(&mut self) -> Vec<ConstraintId> {
        core::mem::take(&mut self.constraints)
    }

    pub fn apply_force(&mut self, force: Vec3<F>) {
        self.velocity = self.velocity + force;
    }

    /// Clamp to the pin. Returns false for a free particle.
    pub fn snap_to_pin(&mut self) -> bool {
        match self.pin {
            Some(pin) => {
                self.pos.x = pin.x;
                self.pos.y = pin.y;
                true
            }
            None => false,
        }
    }

    /// One Verlet step with pointer interaction, gravity and boundary
    /// bounce. Pinned particles do not move.
    ///
    /// Drag is tested before cut, so a held drag button never cuts.
    pub fn integrate(
        &mut self,
        dt: F,
        pointer: &Pointer<F>,
        config: &ClothConfig<F>,
        gravity: F,
    ) -> Interaction {
        if self.is_pinned() {
            return Interaction::None;
        }

        let mut interaction = Interaction::None;
        if pointer.active {
            let dist = self.pos.xy().distance(pointer.position);
            if pointer.button == PointerButton::Drag && dist < config.drag_radius {
                let delta = pointer.delta();
                self.prev_pos.x = self.pos.x - delta.x;
                self.prev_pos.y = self.pos.y - delta.y;
                interaction = Interaction::Dragged;
            } else if dist < config.cut_radius {
                interaction = Interaction::Cut;
            }
        }

        self.apply_force(Vec3::new(F::zero(), gravity, F::zero()));

        let nx = self.pos.x + (self.pos.x - self.prev_pos.x) * config.friction + self.velocity.x * dt;
        let ny = self.pos.y + (self.pos.y - self.prev_pos.y) * config.friction + self.velocity.y * dt;

        self.prev_pos.x = self.pos.x;
        self.prev_pos.y = self.pos.y;
        self.pos.x = nx;
        self.pos.y = ny;
        self.velocity = Vec3::zero();

        let (min, max, bounce) = (config.bounds_min, config.bounds_max, config.bounce);
        bounce_axis(&mut self.pos.x, &mut self.prev_pos.x, min, max, bounce);
        bounce_axis(&mut self.pos.y, &mut self.prev_pos.y, min, max, bounce);

        interaction
    }
}

/// Clamp one axis and mirror the previous position through the wall so
/// the particle rebounds on the next step.
fn bounce_axis<F: Float>(pos: &mut F, prev: &mut F, min: F, max: F, bounce: F) {
    if *pos >= max {
        *prev = max + (max - *prev) * bounce;
        *pos = max;
    } else if *pos <= min {
        *prev = min + (min - *prev) * bounce;
        *pos = min;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn still_config() -> ClothConfig<f64> {
        ClothConfig::new().with_friction(1.0)
    }

    #[test]
    fn pinned_particle_ignores_gravity() {
        let mut p = Particle::new(Vec3::new(0.3, 0.4, 0.0));
        p.pin(0.3, 0.4);
        let result = p.integrate(1.0 / 60.0, &Pointer::idle(), &still_config(), -10.0);
        assert_eq!(result, Interaction::None);
        assert_eq!(p.pos, Vec3::new(0.3, 0.4, 0.0));
    }

    #[test]
    fn gravity_is_scaled_by_dt_and_accumulator_resets() {
        let mut p = Particle::new(Vec3::new(0.0, 0.0, 0.0));
        p.integrate(0.5, &Pointer::idle(), &still_config(), -0.02);
        assert_relative_eq!(p.pos.y, -0.01, epsilon = 1e-12);
        assert_relative_eq!(p.prev_pos.y, 0.0, epsilon = 1e-12);
        assert_eq!(p.velocity, Vec3::zero());
    }

    #[test]
    fn friction_scales_implicit_velocity() {
        let mut p = Particle::new(Vec3::new(0.1, 0.0, 0.0));
        p.prev_pos.x = 0.0;
        let config = ClothConfig::new().with_friction(0.5);
        p.integrate(0.0, &Pointer::idle(), &config, 0.0);
        assert_relative_eq!(p.pos.x, 0.15, epsilon = 1e-12);
        assert_relative_eq!(p.prev_pos.x, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn upper_wall_reflects_previous_position() {
        let mut p = Particle::new(Vec3::new(0.95, 0.0, 0.0));
        p.prev_pos.x = 0.8;
        p.integrate(0.0, &Pointer::idle(), &still_config(), 0.0);
        // Unclamped x would be 1.1; prev was 0.95 before the wall.
        assert_eq!(p.pos.x, 1.0);
        assert_relative_eq!(p.prev_pos.x, 1.0 + (1.0 - 0.95) * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn lower_wall_reflects_previous_position() {
        let mut p = Particle::new(Vec3::new(0.0, -0.95, 0.0));
        p.prev_pos.y = -0.8;
        p.integrate(0.0, &Pointer::idle(), &still_config(), 0.0);
        assert_eq!(p.pos.y, -1.0);
        assert_relative_eq!(p.prev_pos.y, -1.0 + (-1.0 + 0.95) * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn drag_moves_with_pointer_delta() {
        let mut p = Particle::new(Vec3::new(0.0, 0.0, 0.0));
        let mut pointer = Pointer::pressed_at(Vec2::new(0.01, 0.0), PointerButton::Drag);
        pointer.move_to(Vec2::new(0.03, 0.01));
        let result = p.integrate(0.0, &pointer, &still_config(), 0.0);
        assert_eq!(result, Interaction::Dragged);
        assert_relative_eq!(p.pos.x, 0.02, epsilon = 1e-12);
        assert_relative_eq!(p.pos.y, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn drag_wins_over_cut_when_radii_overlap() {
        let mut p = Particle::new(Vec3::new(0.0, 0.0, 0.0));
        let pointer = Pointer::pressed_at(Vec2::new(0.005, 0.0), PointerButton::Drag);
        assert_eq!(
            p.integrate(0.0, &pointer, &still_config(), 0.0),
            Interaction::Dragged
        );
    }

    #[test]
    fn other_button_cuts_inside_cut_radius() {
        let mut p = Particle::new(Vec3::new(0.0, 0.0, 0.0));
        let pointer = Pointer::pressed_at(Vec2::new(0.01, 0.0), PointerButton::Other);
        assert_eq!(p.integrate(0.0, &pointer, &still_config(), 0.0), Interaction::Cut);

        let far = Pointer::pressed_at(Vec2::new(0.05, 0.0), PointerButton::Other);
        assert_eq!(p.integrate(0.0, &far, &still_config(), 0.0), Interaction::None);
    }

    #[test]
    fn released_pointer_never_interacts() {
        let mut p = Particle::new(Vec3::new(0.0, 0.0, 0.0));
        let mut pointer = Pointer::pressed_at(Vec2::new(0.0, 0.0), PointerButton::Other);
        pointer.release();
        assert_eq!(p.integrate(0.0, &pointer, &still_config(), 0.0), Interaction::None);
    }

    #[test]
    fn snap_to_pin_restores_anchor() {
        let mut p = Particle::new(Vec3::new(0.5, 0.5, 0.0));
        assert!(!p.snap_to_pin());
        p.pin(0.5, 0.5);
        p.pos.x = 0.7;
        assert!(p.snap_to_pin());
        assert_eq!(p.pos.x, 0.5);
    }
}
