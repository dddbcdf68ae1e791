//! # Scene
//!
//! Objects placed in the world and the session context that owns them.

pub mod object;
pub mod session;

pub use object::SceneObject;
pub use session::Scene;

use thiserror::Error;

use crate::foundation::collections::ObjectId;
use crate::render::RenderError;

/// Keyboard-driven movement of the controlled object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCommand {
    /// Step along the facing direction
    Forward,
    /// Step against the facing direction
    Backward,
    /// Turn counter-clockwise
    TurnLeft,
    /// Turn clockwise
    TurnRight,
}

/// Terrain height lookup
///
/// Implemented by whatever samples the height map; objects are rested on the
/// returned height every tick.
pub trait HeightSource {
    /// Ground height at world position `(x, z)`
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// Level ground at a fixed height
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlatTerrain {
    /// Ground height
    pub height: f32,
}

impl FlatTerrain {
    /// Ground at `height`
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl HeightSource for FlatTerrain {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

/// Scene errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Handle does not name a live object
    #[error("Unknown object: {0:?}")]
    UnknownObject(ObjectId),

    /// Geometry upload failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
