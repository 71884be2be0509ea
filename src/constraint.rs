//! Distance links between cloth particles.

use crate::float::Float;
use crate::particle::Particle;

/// Stable handle into the mesh's constraint arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(pub(crate) usize);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a single [`Constraint::resolve`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstraintOutcome {
    /// At or below rest length. Nothing moved.
    Slack,
    /// Endpoints were pulled toward rest length.
    Corrected,
    /// Stretched past the tear distance. The named particle must be freed.
    Torn { particle: usize },
}

/// A one-sided distance link: it resists stretching past its rest length
/// and ignores compression.
///
/// `a` is the particle that created the link (the right or lower
/// neighbour of the pair) and is the one freed when the link tears.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Constraint<F: Float> {
    pub a: usize,
    pub b: usize,
    rest_length: F,
    severed: bool,
}

impl<F: Float> Constraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        Constraint { a, b, rest_length, severed: false }
    }

    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    /// Tombstoned by a free of either endpoint.
    pub fn is_severed(&self) -> bool {
        self.severed
    }

    pub(crate) fn sever(&mut self) {
        self.severed = true;
    }

    /// The endpoint that is not `index`.
    pub fn other(&self, index: usize) -> usize {
        if self.a == index { self.b } else { self.a }
    }

    pub fn touches(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// Planar distance between the endpoints.
    pub fn separation(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.xy().distance(particles[self.b].pos.xy())
    }

    /// Pull both endpoints toward rest length.
    ///
    /// The correction is applied before reporting a tear, so a tearing
    /// link still moves its endpoints once.
    pub fn resolve(&self, particles: &mut [Particle<F>], tear_distance: F) -> ConstraintOutcome {
        let pa = particles[self.a].pos;
        let pb = particles[self.b].pos;
        let dx = pa.x - pb.x;
        let dy = pa.y - pb.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist <= self.rest_length || dist.is_near_zero(F::from_f32(1e-12)) {
            return ConstraintOutcome::Slack;
        }

        let diff = (self.rest_length - dist) / dist;
        let mul = diff * F::half() * (F::one() - self.rest_length / dist);
        let px = dx * mul;
        let py = dy * mul;

        let first = &mut particles[self.a];
        if !first.is_pinned() {
            first.pos.x = first.pos.x + px;
            first.pos.y = first.pos.y + py;
        }
        let second = &mut particles[self.b];
        if !second.is_pinned() {
            second.pos.x = second.pos.x - px;
            second.pos.y = second.pos.y - py;
        }

        if dist > tear_distance {
            ConstraintOutcome::Torn { particle: self.a }
        } else {
            ConstraintOutcome::Corrected
        }
    }
}
