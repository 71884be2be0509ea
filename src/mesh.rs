//! Tearable cloth mesh: a pinned particle lattice, its distance links and
//! the triangle index list handed to a renderer.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use tracing::{debug, trace, warn};

use crate::config::ClothConfig;
use crate::constraint::{Constraint, ConstraintId, ConstraintOutcome};
use crate::error::{ClothError, ClothResult};
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::{Interaction, Particle};
use crate::pointer::Pointer;
use crate::vec::Vec3;

/// A cloth built from a grid of Verlet particles.
///
/// Particle at (col, row) has index `row * width + col`, where
/// `width = cloth_x + 1`. Particles and links live in arenas addressed by
/// stable indices; freeing a particle tombstones it and severs its links
/// but never compacts storage, so the vertex buffer layout never changes.
#[derive(Clone, Debug)]
pub struct ClothMesh<F: Float> {
    config: ClothConfig<F>,
    particles: Vec<Particle<F>>,
    constraints: Vec<Constraint<F>>,
    removed: BTreeSet<usize>,
    positions: Vec<F>,
    indices: Vec<u32>,
    indices_dirty: bool,
    topology_stale: bool,
    gravity_enabled: bool,
    spacing: F,
    tear_distance: F,
}

impl<F: Float> ClothMesh<F> {
    /// Validate `config` and build the lattice.
    ///
    /// Row 0 is pinned in place. Every particle links to its left
    /// neighbour, then to its top neighbour; there are no diagonals.
    pub fn new(config: ClothConfig<F>) -> ClothResult<Self> {
        config.validate()?;
        let mesh = Self::build(config, true);
        debug!(
            width = mesh.cols(),
            height = mesh.rows(),
            links = mesh.constraints.len(),
            "built cloth mesh"
        );
        Ok(mesh)
    }

    fn build(config: ClothConfig<F>, gravity_enabled: bool) -> Self {
        let width = config.width();
        let height = config.height();
        let count = width * height;
        let spacing = config.spacing();
        let tear_distance = config.tear_distance();

        let mut particles = Vec::with_capacity(count);
        let mut constraints = Vec::with_capacity(2 * count);
        let mut positions = Vec::with_capacity(3 * count);

        for row in 0..height {
            for col in 0..width {
                let x = config.start_x + F::from_f32(col as f32) * spacing;
                let y = config.start_y - F::from_f32(row as f32) * spacing;
                let index = particles.len();

                let mut particle = Particle::new(Vec3::new(x, y, F::zero()));
                if row == 0 {
                    particle.pin(x, y);
                }
                particles.push(particle);

                if col != 0 {
                    link(&mut particles, &mut constraints, index, index - 1, spacing);
                }
                if row != 0 {
                    link(&mut particles, &mut constraints, index, index - width, spacing);
                }

                positions.extend_from_slice(&[x, y, F::zero()]);
            }
        }

        let mut mesh = ClothMesh {
            config,
            particles,
            constraints,
            removed: BTreeSet::new(),
            positions,
            indices: Vec::with_capacity(6 * (width - 1) * (height - 1)),
            indices_dirty: false,
            topology_stale: false,
            gravity_enabled,
            spacing,
            tear_distance,
        };
        mesh.regenerate_indices();
        mesh
    }

    /// Advance one frame: `accuracy` relaxation passes, then one
    /// integration pass, then index regeneration if anything was freed.
    ///
    /// `dt` is capped at `max_dt`. A zero `dt` still relaxes and applies
    /// the implicit Verlet velocity.
    pub fn update(&mut self, dt: F, pointer: &Pointer<F>) -> ClothResult<()> {
        self.update_with_observer(dt, pointer, &mut NoOpStepObserver)
    }

    pub fn update_with_observer<O: StepObserver>(
        &mut self,
        dt: F,
        pointer: &Pointer<F>,
        observer: &mut O,
    ) -> ClothResult<()> {
        if !dt.is_finite() || dt < F::zero() {
            warn!(dt = ?dt, "rejected cloth tick");
            return Err(ClothError::InvalidTimeStep);
        }
        let dt = self.config.clamp_dt(dt);

        for pass in 0..self.config.accuracy {
            self.relax(observer);
            observer.on_relaxation_pass(pass);
        }

        let gravity = self.gravity();
        for index in 0..self.particles.len() {
            if !self.particles[index].is_freed() {
                let interaction = self.particles[index].integrate(dt, pointer, &self.config, gravity);
                if interaction == Interaction::Cut {
                    debug!(particle = index, "pointer cut");
                    self.release(index);
                    observer.on_cut(index);
                }
            }
            let pos = self.particles[index].pos;
            let slot = index * 3;
            self.positions[slot] = pos.x;
            self.positions[slot + 1] = pos.y;
            self.positions[slot + 2] = pos.z;
        }
        observer.on_integrate();

        if self.topology_stale {
            self.regenerate_indices();
            observer.on_topology_changed(self.intact_cell_count());
        }

        observer.on_step_complete();
        Ok(())
    }

    /// One Gauss-Seidel sweep over every live particle in index order.
    /// Tears made here reach the index list at the next update or free.
    pub fn relax<O: StepObserver>(&mut self, observer: &mut O) {
        for index in 0..self.particles.len() {
            if !self.particles[index].is_freed() {
                self.resolve_particle_with(index, observer);
            }
        }
    }

    /// Resolve a single particle: snap it to its pin, or resolve every link
    /// it owns in insertion order (left link before top link).
    ///
    /// A tear frees the link's first endpoint immediately; the index list
    /// catches up at the end of the frame.
    pub fn resolve_particle(&mut self, index: usize) {
        self.resolve_particle_with(index, &mut NoOpStepObserver);
    }

    fn resolve_particle_with<O: StepObserver>(&mut self, index: usize, observer: &mut O) {
        if self.particles[index].snap_to_pin() {
            return;
        }

        // The list can shrink under us: a tear frees `index` itself.
        let mut slot = 0;
        while let Some(&id) = self.particles[index].constraints().get(slot) {
            slot += 1;
            let link = self.constraints[id.index()];
            if link.a != index || link.is_severed() {
                continue;
            }
            if let ConstraintOutcome::Torn { particle } =
                link.resolve(&mut self.particles, self.tear_distance)
            {
                debug!(particle, "link torn");
                self.release(particle);
                observer.on_tear(particle);
            }
        }
    }

    /// Remove a particle from the cloth and rebuild the index list.
    ///
    /// Returns false if it was already freed; freeing twice is a no-op.
    /// Panics if `index` is out of range.
    pub fn free(&mut self, index: usize) -> bool {
        let freed = self.release(index);
        if self.topology_stale {
            self.regenerate_indices();
        }
        freed
    }

    /// Sever every link touching `index` on both endpoints, then mark it
    /// removed. Index regeneration is left to the caller.
    fn release(&mut self, index: usize) -> bool {
        if self.particles[index].is_freed() {
            return false;
        }
        for id in self.particles[index].take_constraints() {
            let link = &mut self.constraints[id.index()];
            link.sever();
            let other = link.other(index);
            self.particles[other].detach(id);
        }
        self.mark_for_removal(index);
        true
    }

    fn mark_for_removal(&mut self, index: usize) {
        self.particles[index].mark_freed();
        self.removed.insert(index);
        self.topology_stale = true;
    }

    /// Rebuild the triangle list: two triangles per grid cell whose four
    /// corners are all live.
    fn regenerate_indices(&mut self) {
        let width = self.config.width();
        self.indices.clear();
        for row in 0..self.config.cloth_y {
            for col in 0..self.config.cloth_x {
                let i = row * width + col;
                let corners = [i, i + 1, i + width, i + width + 1];
                if corners.iter().any(|&c| self.particles[c].is_freed()) {
                    continue;
                }
                let [tl, tr, bl, br] = corners.map(|c| c as u32);
                self.indices.extend_from_slice(&[tl, tr, bl, tr, bl, br]);
            }
        }
        self.indices_dirty = true;
        self.topology_stale = false;
        trace!(cells = self.indices.len() / 6, "regenerated cloth indices");
    }

    /// Throw the cloth away and rebuild it from the stored configuration.
    /// The gravity toggle survives.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = Self::build(config, self.gravity_enabled);
        debug!("cloth reset");
    }

    /// Flip gravity on or off. Returns the new state.
    pub fn toggle_gravity(&mut self) -> bool {
        self.set_gravity_enabled(!self.gravity_enabled);
        self.gravity_enabled
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
        debug!(enabled, "cloth gravity");
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Gravity applied this frame: the configured value, or zero when
    /// toggled off.
    pub fn gravity(&self) -> F {
        if self.gravity_enabled { self.config.gravity } else { F::zero() }
    }

    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols() + col
    }

    /// Flat `[x0, y0, z0, x1, ...]` in row-major order.
    pub fn positions(&self) -> &[F] {
        &self.positions
    }

    pub fn position_at(&self, col: usize, row: usize) -> Vec3<F> {
        self.particles[self.index(col, row)].pos
    }

    /// Triangle list over [`positions`](Self::positions).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The index list changed since the renderer last took it.
    pub fn indices_dirty(&self) -> bool {
        self.indices_dirty
    }

    /// Read and clear the dirty flag, for the renderer after an upload.
    pub fn take_indices_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.indices_dirty, false)
    }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        &self.particles[index]
    }

    /// Direct access for tools and tests. The position buffer picks up any
    /// change at the next update.
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> {
        &mut self.particles[index]
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint<F> {
        &self.constraints[id.index()]
    }

    /// Links not yet severed by a free.
    pub fn active_constraint_count(&self) -> usize {
        self.constraints.iter().filter(|c| !c.is_severed()).count()
    }

    /// Indices of freed particles, ascending.
    pub fn removed(&self) -> &BTreeSet<usize> {
        &self.removed
    }

    pub fn is_removed(&self, index: usize) -> bool {
        self.removed.contains(&index)
    }

    /// Quads currently present in the index list.
    pub fn intact_cell_count(&self) -> usize {
        self.indices.len() / 6
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn spacing(&self) -> F { self.spacing }
    pub fn tear_distance(&self) -> F { self.tear_distance }
    pub fn cols(&self) -> usize { self.config.width() }
    pub fn rows(&self) -> usize { self.config.height() }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}

/// Create a link owned by `a` and register it on both endpoints.
fn link<F: Float>(
    particles: &mut [Particle<F>],
    constraints: &mut Vec<Constraint<F>>,
    a: usize,
    b: usize,
    rest_length: F,
) {
    let id = ConstraintId(constraints.len());
    constraints.push(Constraint::new(a, b, rest_length));
    particles[a].attach(id);
    particles[b].attach(id);
}
