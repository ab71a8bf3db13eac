//! Pythagoras tree synthesis.
//!
//! Pure geometry generation with no ECS or GPU access: parameters in, flat
//! vertex buffers out.

pub mod geometry;

pub use geometry::{TreeGeometry, TreeGeometryError, generate};
