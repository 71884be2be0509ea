//! Error types for cloth construction and stepping.

use thiserror::Error;

/// Precondition violations. The simulation itself has no recoverable
/// failure paths; these are raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    /// The grid needs at least one cell in each direction.
    #[error("cloth must have at least one cell per axis (got {cloth_x}x{cloth_y})")]
    EmptyGrid { cloth_x: usize, cloth_y: usize },

    /// Render indices are `u32`, so the particle count must fit.
    #[error("cloth of {particles} particles cannot be indexed with u32")]
    GridTooLarge { particles: usize },

    /// Horizontal extent must be positive and finite.
    #[error("cloth span must be positive and finite")]
    InvalidSpan,

    /// Domain bounds must be finite with `min < max`.
    #[error("boundary extents must be finite with min < max")]
    InvalidBounds,

    /// Tear multiplier must be finite and greater than one.
    #[error("tear multiplier must be finite and greater than 1")]
    InvalidTearMultiplier,

    /// Pointer radii must be finite and non-negative.
    #[error("pointer radii must be finite and non-negative")]
    InvalidRadius,

    /// A physical coefficient is NaN or infinite.
    #[error("coefficient `{0}` must be finite")]
    InvalidCoefficient(&'static str),

    /// Frame delta was NaN, infinite or negative.
    #[error("time step must be finite and non-negative")]
    InvalidTimeStep,
}

/// Result alias for cloth operations.
pub type ClothResult<T> = core::result::Result<T, ClothError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_includes_dimensions() {
        let err = ClothError::EmptyGrid { cloth_x: 0, cloth_y: 3 };
        assert_eq!(err.to_string(), "cloth must have at least one cell per axis (got 0x3)");
    }

    #[test]
    fn display_names_coefficient() {
        let err = ClothError::InvalidCoefficient("friction");
        assert!(err.to_string().contains("friction"));
    }
}
