//! Bounding-box geometry
//!
//! Turns the eight bounding corners of an object into a triangle list that a
//! renderer draws in line mode, tinted by the `collisionFlag` uniform.

use crate::foundation::math::Vec3;
use crate::render::Vertex;

/// Number of positions in a box triangle list (6 faces, 2 triangles each)
pub const BOX_VERTEX_COUNT: usize = 36;

/// Corner indices of each face, counter-clockwise seen from outside.
/// Bit 0/1/2 of a corner index selects max on X/Y/Z.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 4, 6, 2], // -X
    [1, 3, 7, 5], // +X
    [0, 1, 5, 4], // -Y
    [2, 6, 7, 3], // +Y
    [0, 2, 3, 1], // -Z
    [4, 5, 7, 6], // +Z
];

/// Expand eight corners into 36 triangle-list positions
pub fn box_triangles(corners: &[Vec3; 8]) -> [Vec3; BOX_VERTEX_COUNT] {
    let mut out = [Vec3::zeros(); BOX_VERTEX_COUNT];
    for (face, quad) in BOX_FACES.iter().enumerate() {
        let [a, b, c, d] = *quad;
        let base = face * 6;
        out[base..base + 6].copy_from_slice(&[
            corners[a], corners[b], corners[c],
            corners[a], corners[c], corners[d],
        ]);
    }
    out
}

/// Box triangle list as vertices plus sequential indices, ready for upload
pub fn box_geometry(corners: &[Vec3; 8]) -> (Vec<Vertex>, Vec<u32>) {
    let vertices: Vec<Vertex> = box_triangles(corners)
        .iter()
        .map(|p| Vertex::from_position((*p).into()))
        .collect();
    let indices = (0..BOX_VERTEX_COUNT as u32).collect();
    (vertices, indices)
}
