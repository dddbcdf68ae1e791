//! # Asset Loading
//!
//! Mesh files are parsed once into immutable, unit-scaled [`MeshAsset`]s that
//! objects share by `Arc`.

pub mod mesh_asset;
pub mod obj_loader;

pub use mesh_asset::{Extents, MeshAsset, NormalizationParams, ObjStats};
pub use obj_loader::{ObjError, ObjLoader};
