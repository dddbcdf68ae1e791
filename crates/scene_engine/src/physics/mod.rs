//! # Physics
//!
//! Collision detection between scene objects.

pub mod collision;

pub use collision::{Aabb, CollisionDetector, CollisionSet, DEFAULT_MARGIN};
