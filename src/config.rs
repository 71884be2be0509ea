//! Simulation parameters for a cloth mesh.

use crate::error::{ClothError, ClothResult};
use crate::float::Float;

/// Configuration for building and stepping a [`ClothMesh`](crate::ClothMesh).
///
/// Read at construction; the mesh keeps its own copy, so `reset` rebuilds
/// with exactly these values.
///
/// # Builder Pattern
/// ```
/// use clothy::config::ClothConfig;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_grid(40, 20)
///     .with_accuracy(8)
///     .with_gravity(-0.03)
///     .with_friction(0.98);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Cells along x. The grid has `cloth_x + 1` particles per row.
    pub cloth_x: usize,
    /// Cells along y. The grid has `cloth_y + 1` rows.
    pub cloth_y: usize,
    /// Horizontal extent of the cloth; spacing is `span / cloth_x`.
    pub span: F,
    /// x of the top-left particle.
    pub start_x: F,
    /// y of the top row. Rows grow downward from here.
    pub start_y: F,
    /// Added to the y velocity accumulator every integration step.
    pub gravity: F,
    /// Scales the implicit Verlet velocity. 1.0 = no loss.
    pub friction: F,
    /// Fraction of velocity kept when reflecting off a boundary.
    pub bounce: F,
    /// Lower boundary on both x and y.
    pub bounds_min: F,
    /// Upper boundary on both x and y.
    pub bounds_max: F,
    /// Relaxation passes per frame. Default: 5.
    pub accuracy: usize,
    /// A link tears past `tear_multiplier * spacing`. Default: 6.
    pub tear_multiplier: F,
    /// Pointer drag influence radius.
    pub drag_radius: F,
    /// Pointer cut radius.
    pub cut_radius: F,
    /// Largest `dt` a single update will integrate.
    pub max_dt: F,
}

impl<F: Float> ClothConfig<F> {
    /// A 100x40 cloth hanging from the top of the unit square.
    pub fn new() -> Self {
        ClothConfig {
            cloth_x: 100,
            cloth_y: 40,
            span: F::from_f32(1.8),
            start_x: F::from_f32(-0.9),
            start_y: F::one(),
            gravity: F::from_f32(-0.02),
            friction: F::from_f32(0.99),
            bounce: F::half(),
            bounds_min: -F::one(),
            bounds_max: F::one(),
            accuracy: 5,
            tear_multiplier: F::from_f32(6.0),
            drag_radius: F::from_f32(0.08),
            cut_radius: F::from_f32(0.02),
            max_dt: F::one() / F::from_f32(30.0),
        }
    }

    pub fn with_grid(mut self, cloth_x: usize, cloth_y: usize) -> Self {
        self.cloth_x = cloth_x;
        self.cloth_y = cloth_y;
        self
    }

    pub fn with_span(mut self, span: F) -> Self {
        self.span = span;
        self
    }

    /// Place the top-left particle.
    pub fn with_origin(mut self, start_x: F, start_y: F) -> Self {
        self.start_x = start_x;
        self.start_y = start_y;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_bounce(mut self, bounce: F) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_bounds(mut self, min: F, max: F) -> Self {
        self.bounds_min = min;
        self.bounds_max = max;
        self
    }

    pub fn with_accuracy(mut self, accuracy: usize) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_tear_multiplier(mut self, multiplier: F) -> Self {
        self.tear_multiplier = multiplier;
        self
    }

    /// Set the drag influence and cut radii.
    pub fn with_pointer_radii(mut self, drag: F, cut: F) -> Self {
        self.drag_radius = drag;
        self.cut_radius = cut;
        self
    }

    pub fn with_max_dt(mut self, max_dt: F) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Particles per row.
    pub fn width(&self) -> usize {
        self.cloth_x + 1
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cloth_y + 1
    }

    /// Rest length of every link.
    pub fn spacing(&self) -> F {
        self.span / F::from_f32(self.cloth_x as f32)
    }

    pub fn tear_distance(&self) -> F {
        self.spacing() * self.tear_multiplier
    }

    /// Cap a frame delta at `max_dt`.
    pub fn clamp_dt(&self, dt: F) -> F {
        dt.min(self.max_dt)
    }

    /// Check every precondition the mesh relies on.
    pub fn validate(&self) -> ClothResult<()> {
        if self.cloth_x == 0 || self.cloth_y == 0 {
            return Err(ClothError::EmptyGrid { cloth_x: self.cloth_x, cloth_y: self.cloth_y });
        }
        let particles = self
            .width()
            .checked_mul(self.height())
            .unwrap_or(usize::MAX);
        if particles > u32::MAX as usize {
            return Err(ClothError::GridTooLarge { particles });
        }
        if !self.span.is_finite() || self.span <= F::zero() {
            return Err(ClothError::InvalidSpan);
        }
        if !self.bounds_min.is_finite() || !self.bounds_max.is_finite() || self.bounds_min >= self.bounds_max {
            return Err(ClothError::InvalidBounds);
        }
        if !self.tear_multiplier.is_finite() || self.tear_multiplier <= F::one() {
            return Err(ClothError::InvalidTearMultiplier);
        }
        for radius in [self.drag_radius, self.cut_radius] {
            if !radius.is_finite() || radius < F::zero() {
                return Err(ClothError::InvalidRadius);
            }
        }
        let coefficients = [
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("bounce", self.bounce),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() {
                return Err(ClothError::InvalidCoefficient(name));
            }
        }
        if !self.max_dt.is_finite() || self.max_dt <= F::zero() {
            return Err(ClothError::InvalidCoefficient("max_dt"));
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_reference_cloth() {
        let config: ClothConfig<f32> = ClothConfig::default();
        assert_eq!(config.width(), 101);
        assert_eq!(config.height(), 41);
        assert_eq!(config.accuracy, 5);
        assert_relative_eq!(config.spacing(), 0.018, epsilon = 1e-6);
        assert_relative_eq!(config.tear_distance(), 0.108, epsilon = 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn clamp_dt_caps_frame_hitches() {
        let config: ClothConfig<f64> = ClothConfig::new();
        assert_relative_eq!(config.clamp_dt(0.5), 1.0 / 30.0);
        assert_relative_eq!(config.clamp_dt(0.01), 0.01);
    }

    #[test]
    fn rejects_empty_grid() {
        let config: ClothConfig<f32> = ClothConfig::new().with_grid(0, 4);
        assert_eq!(
            config.validate(),
            Err(ClothError::EmptyGrid { cloth_x: 0, cloth_y: 4 })
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config: ClothConfig<f32> = ClothConfig::new().with_bounds(1.0, -1.0);
        assert_eq!(config.validate(), Err(ClothError::InvalidBounds));
    }

    #[test]
    fn rejects_non_finite_friction() {
        let config: ClothConfig<f32> = ClothConfig::new().with_friction(f32::NAN);
        assert_eq!(config.validate(), Err(ClothError::InvalidCoefficient("friction")));
    }

    #[test]
    fn rejects_tear_multiplier_at_or_below_one() {
        let config: ClothConfig<f32> = ClothConfig::new().with_tear_multiplier(1.0);
        assert_eq!(config.validate(), Err(ClothError::InvalidTearMultiplier));
    }
}
