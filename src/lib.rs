//! Tearable Verlet cloth for interactive toys and games.
//!
//! `clothy` simulates a rectangular sheet hanging from its top edge: a grid
//! of Verlet particles joined by distance links, relaxed a few times per
//! frame and integrated once. Links that stretch too far tear, and a pointer
//! can drag or cut the sheet. The output is a flat vertex buffer and a
//! triangle index list, ready to upload to any renderer.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity, friction, bouncing walls
//! - **Iterative relaxation**: Gauss-Seidel passes over one-sided links
//! - **Tearing**: overstretched links free a particle and open a hole
//! - **Pointer input**: drag with one button, cut with any other
//! - **Stable indices**: removal is a tombstone, the buffer layout never moves
//! - **Observable**: monitor frames via the `StepObserver` trait
//! - **`no_std` compatible**: disable the default `std` feature
//!
//! ```
//! use clothy::{ClothConfig, ClothMesh, Pointer};
//!
//! let mut cloth: ClothMesh<f32> = ClothMesh::new(ClothConfig::new().with_grid(20, 10))?;
//! let pointer = Pointer::idle();
//! for _ in 0..60 {
//!     cloth.update(1.0 / 60.0, &pointer)?;
//! }
//! assert_eq!(cloth.positions().len(), 21 * 11 * 3);
//! # Ok::<(), clothy::ClothError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod pointer;
pub mod mesh;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec2, Vec3};
pub use particle::{Interaction, Particle};
pub use constraint::{Constraint, ConstraintId, ConstraintOutcome};
pub use pointer::{screen_to_ndc, Pointer, PointerButton};
pub use mesh::ClothMesh;
pub use config::ClothConfig;
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::{ClothError, ClothResult};
