//! Step observer trait for monitoring cloth updates.

/// Hooks fired while a [`ClothMesh`](crate::ClothMesh) runs one frame.
///
/// Implement this to count tears, drive sound effects or profile the
/// solver. All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after each full relaxation pass over the particles.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// A link stretched past the tear distance and freed `_particle`.
    fn on_tear(&mut self, _particle: usize) {}

    /// The pointer cut `_particle`.
    fn on_cut(&mut self, _particle: usize) {}

    /// Called after every particle has been integrated.
    fn on_integrate(&mut self) {}

    /// The index list was rebuilt and now covers `_intact_cells` quads.
    fn on_topology_changed(&mut self, _intact_cells: usize) {}

    /// Called when the frame is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
