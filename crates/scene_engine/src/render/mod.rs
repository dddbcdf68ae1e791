//! # Rendering Contract
//!
//! Backend-agnostic pieces the scene hands to a renderer:
//! - **Mesh / Vertex**: fixed-layout geometry
//! - **Material**: Phong presets selected by [`MaterialId`]
//! - **Uniforms**: per-object, per-frame values under fixed names
//! - **Backend**: the geometry upload seam
//!
//! Shader compilation, windowing and the draw loop itself live outside this crate.

pub mod backend;
pub mod material;
pub mod mesh;
pub mod uniforms;
pub mod wireframe;

pub use backend::{BackendResult, GeometryBackend, GeometryHandle, HeadlessBackend, RenderError, UploadRecord};
pub use material::{Material, MaterialId};
pub use mesh::{Mesh, Vertex};
pub use uniforms::{ObjectUniforms, UniformRecorder, UniformSink, UniformValue};
pub use wireframe::{box_geometry, box_triangles, BOX_VERTEX_COUNT};
