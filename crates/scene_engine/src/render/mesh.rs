//! Mesh geometry for rendering
//!
//! Backend-agnostic vertex and index storage. Uploading it to a GPU goes
//! through [`GeometryBackend`](crate::render::GeometryBackend).

use bytemuck::{Pod, Zeroable};

/// 3D vertex data structure for rendering
///
/// Fixed `#[repr(C)]` layout: position (3 floats), normal (3 floats),
/// texture coordinate (2 floats), 32 bytes per vertex with no padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Size in bytes of one vertex in a vertex buffer
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Byte offset of the normal attribute
    pub const NORMAL_OFFSET: usize = std::mem::size_of::<[f32; 3]>();

    /// Byte offset of the texture coordinate attribute
    pub const TEX_COORD_OFFSET: usize = 2 * std::mem::size_of::<[f32; 3]>();

    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }

    /// Vertex carrying only a position; normal and texture coordinate are zero
    pub fn from_position(position: [f32; 3]) -> Self {
        Self::new(position, [0.0; 3], [0.0; 2])
    }
}

/// Triangle mesh: vertices plus 0-based triangle indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles, three per triangle
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// A mesh with no geometry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Number of whole triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Raw bytes of the vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
