//! # Scene Engine
//!
//! Geometry and camera core of an interactive 3D scene viewer.
//!
//! ## Features
//!
//! - **Mesh loading**: best-effort OBJ parsing into unit-scaled meshes
//! - **Objects**: world transforms with frame-rate independent movement
//! - **Collision**: padded AABB overlap collected per tick
//! - **Camera**: trackball orbit, pan and zoom
//! - **Render contract**: named uniforms and a geometry upload seam
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scene_engine::prelude::*;
//!
//! let config = ViewerConfig::load_or_default("viewer.toml").unwrap_or_default();
//! let mesh = Arc::new(ObjLoader::load_obj("models/bunny.obj"));
//!
//! let mut scene = Scene::new(&config);
//! scene.spawn("bunny", mesh, MaterialId::PolishedGold);
//! scene.tick(1.0 / 60.0, &[MoveCommand::Forward], None);
//!
//! for _uniforms in scene.draw_list() {
//!     // hand `uniforms` to a UniformSink
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod physics;
pub mod camera;
pub mod scene;

/// Common imports for viewer front-ends
pub mod prelude {
    pub use crate::{
        assets::{MeshAsset, NormalizationParams, ObjError, ObjLoader},
        camera::{CameraMode, DragMode, MouseButton, OrbitCamera},
        config::{Config, ConfigError, ViewerConfig},
        foundation::{
            collections::ObjectId,
            math::{Mat4, Vec2, Vec3},
            time::FrameClock,
        },
        physics::{CollisionDetector, CollisionSet},
        render::{GeometryBackend, HeadlessBackend, Material, MaterialId, ObjectUniforms, UniformSink},
        scene::{FlatTerrain, HeightSource, MoveCommand, Scene, SceneError, SceneObject},
    };
}
