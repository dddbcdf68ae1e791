//! OBJ file loader for 3D models
//!
//! Reads the `v` / `vn` / `f` subset of Wavefront OBJ and produces a
//! unit-scaled [`MeshAsset`]. Parsing is best-effort: a malformed record is
//! counted, logged at debug level and skipped, and the rest of the file still
//! loads. Only a failure to read the file at all is an error, and even that is
//! reported to [`ObjLoader::load_obj`] callers as an empty mesh.
//!
//! Every face corner is resolved through its own position and normal index.
//! Each distinct `(position, normal)` pair becomes one output vertex, so a
//! position shared by faces with different normals is split rather than
//! shaded with whichever normal happens to sit at the same list position.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::mesh_asset::{Extents, MeshAsset, ObjStats};
use crate::foundation::math::Vec3;
use crate::render::{Mesh, Vertex};

/// Errors raised while reading an OBJ file
#[derive(Error, Debug)]
pub enum ObjError {
    /// The file could not be opened
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that was requested
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
    /// Reading from an opened source failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One face corner as written in the file, indices already made 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Corner {
    position: usize,
    normal: Option<usize>,
}

/// Loader for OBJ meshes
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file, yielding an empty mesh if it cannot be read
    ///
    /// Callers must check [`MeshAsset::is_empty`] before using the result.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshAsset {
        let path = path.as_ref();
        match Self::try_load_obj(path) {
            Ok(asset) => {
                if asset.is_empty() {
                    log::warn!("OBJ file {} contained no drawable geometry", path.display());
                }
                asset
            }
            Err(e) => {
                log::warn!("Could not load mesh: {}", e);
                MeshAsset::empty()
            }
        }
    }

    /// Load an OBJ file, reporting I/O failures
    pub fn try_load_obj<P: AsRef<Path>>(path: P) -> Result<MeshAsset, ObjError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ObjError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let asset = Self::parse(BufReader::new(file))?;
        log::info!(
            "Loaded {}: {} vertices, {} triangles, longest extent {:.3}",
            path.display(),
            asset.vertices().len(),
            asset.mesh().triangle_count(),
            asset.longest_extent()
        );
        Ok(asset)
    }

    /// Parse OBJ text from any buffered reader
    pub fn parse<R: BufRead>(mut reader: R) -> Result<MeshAsset, ObjError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut faces: Vec<Vec<Corner>> = Vec::new();
        let mut extents = Extents::empty();
        let mut stats = ObjStats::default();

        let mut buffer = Vec::new();
        let mut line_number = 0usize;
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };

            match keyword {
                "v" => match parse_vec3(parts) {
                    Some(position) => {
                        extents.include(position);
                        positions.push(position);
                        stats.positions += 1;
                    }
                    None => skip(&mut stats, line_number, line),
                },
                "vn" => match parse_vec3(parts) {
                    Some(normal) => {
                        normals.push(normal);
                        stats.normals += 1;
                    }
                    None => skip(&mut stats, line_number, line),
                },
                "f" => {
                    let corners: Option<Vec<Corner>> = parts
                        .map(|token| parse_corner(token, positions.len(), normals.len()))
                        .collect();
                    match corners {
                        Some(corners) if corners.len() >= 3 => faces.push(corners),
                        _ => skip(&mut stats, line_number, line),
                    }
                }
                _ => {
                    // Ignore other commands
                }
            }
        }

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut corner_to_vertex: HashMap<Corner, u32> = HashMap::new();

        for face in &faces {
            let in_range = face.iter().all(|corner| {
                corner.position < positions.len() && corner.normal.map_or(true, |n| n < normals.len())
            });
            let resolved: Option<Vec<u32>> = if in_range {
                face.iter()
                    .map(|corner| {
                        resolve_corner(*corner, &positions, &normals, &mut vertices, &mut corner_to_vertex)
                    })
                    .collect()
            } else {
                None
            };

            let Some(face_indices) = resolved else {
                stats.skipped += 1;
                log::debug!("Skipping face with out-of-range index: {:?}", face);
                continue;
            };

            // Fan triangulation; triangles pass through unchanged
            for i in 1..face_indices.len() - 1 {
                indices.push(face_indices[0]);
                indices.push(face_indices[i]);
                indices.push(face_indices[i + 1]);
            }
            stats.faces += 1;
        }

        if stats.skipped > 0 {
            log::debug!("OBJ parse skipped {} malformed records", stats.skipped);
        }

        Ok(MeshAsset::from_raw_with_extents(Mesh::new(vertices, indices), extents, stats))
    }
}

fn skip(stats: &mut ObjStats, line_number: usize, line: &str) {
    stats.skipped += 1;
    log::debug!("Skipping malformed OBJ record at line {}: {}", line_number, line);
}

/// Three finite components; `nan`, `inf` and overflowing literals are rejected
fn parse_vec3<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let mut component = || parts.next()?.parse::<f32>().ok().filter(|v| v.is_finite());
    let x = component()?;
    let y = component()?;
    let z = component()?;
    Some(Vec3::new(x, y, z))
}

/// Convert a 1-based (or negative, relative) OBJ index to 0-based
fn resolve_index(raw: &str, count: usize) -> Option<usize> {
    let value: i64 = raw.parse().ok()?;
    match value {
        0 => None,
        v if v > 0 => Some(v as usize - 1),
        v => count.checked_sub(v.unsigned_abs() as usize),
    }
}

/// Parse `p`, `p/t`, `p//n` or `p/t/n`
///
/// Negative indices are resolved against the records seen so far; positive
/// ones are range-checked after the whole file has been read.
fn parse_corner(token: &str, position_count: usize, normal_count: usize) -> Option<Corner> {
    let mut fields = token.split('/');
    let position = resolve_index(fields.next()?, position_count)?;

    // Texture coordinate slot is read past but not used
    let _tex_coord = fields.next();

    let normal = match fields.next() {
        None | Some("") => None,
        Some(raw) => Some(resolve_index(raw, normal_count)?),
    };

    if fields.next().is_some() {
        return None;
    }

    Some(Corner { position, normal })
}

fn resolve_corner(
    corner: Corner,
    positions: &[Vec3],
    normals: &[Vec3],
    vertices: &mut Vec<Vertex>,
    corner_to_vertex: &mut HashMap<Corner, u32>,
) -> Option<u32> {
    if let Some(&index) = corner_to_vertex.get(&corner) {
        return Some(index);
    }

    let position = positions.get(corner.position)?;
    let normal = match corner.normal {
        Some(n) => *normals.get(n)?,
        // No normal given: fall back to the normal at the same list position, if any
        None => normals.get(corner.position).copied().unwrap_or_else(Vec3::zeros),
    };

    let index = u32::try_from(vertices.len()).ok()?;
    vertices.push(Vertex::new((*position).into(), normal.into(), [0.0, 0.0]));
    corner_to_vertex.insert(corner, index);
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const EPSILON: f32 = 1e-6;

    fn parse(text: &str) -> MeshAsset {
        ObjLoader::parse(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_single_triangle() {
        let asset = parse(
            "v 0 0 0\nv 2 0 0\nv 0 2 0\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        );

        assert_eq!(asset.vertices().len(), 3);
        assert_eq!(asset.indices(), &[0, 1, 2]);
        assert_relative_eq!(asset.longest_extent(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(asset.center(), Vec3::new(1.0, 1.0, 0.0), epsilon = EPSILON);
        assert_eq!(asset.vertices()[0].position, [-1.0, -1.0, 0.0]);
        assert_eq!(asset.vertices()[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(asset.vertices()[1].tex_coord, [0.0, 0.0]);
    }

    #[test]
    fn test_comments_and_unknown_records_are_ignored() {
        let asset = parse(
            "# header\no thing\nvt 0.5 0.5\nusemtl gold\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\ns off\nf 1//1 2//1 3//1\n",
        );

        assert_eq!(asset.indices().len(), 3);
        assert_eq!(asset.stats().skipped, 0);
    }

    #[test]
    fn test_malformed_records_are_skipped_not_fatal() {
        let asset = parse(
            "v 0 0 0\nv 1 0 zero\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 3//1\nf 1//1 2//1 3//1\nf a//1 b//1 c//1\n",
        );

        assert_eq!(asset.stats().positions, 3);
        assert_eq!(asset.stats().faces, 1);
        assert_eq!(asset.stats().skipped, 3);
        assert_eq!(asset.indices().len(), 3);
    }

    #[test]
    fn test_non_finite_coordinates_are_skipped() {
        let asset = parse(
            "v 0 0 0\nv 1e39 0 0\nv nan 0 0\nv 0 inf 0\nv 2 0 0\nv 0 2 0\nvn 0 0 1\nvn NaN 0 1\nf 1//1 2//1 3//1\n",
        );

        assert_eq!(asset.stats().positions, 3);
        assert_eq!(asset.stats().normals, 1);
        assert_eq!(asset.stats().skipped, 4);
        assert_eq!(asset.indices().len(), 3);
        assert_relative_eq!(asset.longest_extent(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(asset.center(), Vec3::new(1.0, 1.0, 0.0), epsilon = EPSILON);
        for vertex in asset.vertices() {
            assert!(vertex.position.iter().all(|c| c.is_finite() && c.abs() <= 1.0 + EPSILON));
            assert!(vertex.normal.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_out_of_range_face_is_dropped() {
        let asset = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 9//1\nf 0//1 1//1 2//1\n");

        assert!(asset.is_empty());
        assert_eq!(asset.stats().skipped, 2);
        // Bounds still come from every accepted position
        assert_relative_eq!(asset.longest_extent(), 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_corners_dereference_their_own_normals() {
        // Two triangles share positions 1 and 3 but use different normals
        let asset = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\n\
             vn 0 0 1\nvn 1 0 0\n\
             f 1//1 2//1 3//1\nf 1//2 3//2 4//2\n",
        );

        assert_eq!(asset.vertices().len(), 6);
        let second = &asset.indices()[3..6];
        for &index in second {
            assert_eq!(asset.vertices()[index as usize].normal, [1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_shared_corners_are_deduplicated() {
        let asset = parse(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1//1 3//1 4//1\n",
        );

        assert_eq!(asset.vertices().len(), 4);
        assert_eq!(asset.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_quads_are_fan_triangulated() {
        let asset = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n");

        assert_eq!(asset.mesh().triangle_count(), 2);
        assert_eq!(asset.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_other_corner_forms_and_relative_indices() {
        let asset = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvn 0 1 0\nvn 1 0 0\nf -3 2/7 3/1/1\n");

        assert_eq!(asset.indices().len(), 3);
        // Missing normal index falls back to the normal at the same list position
        assert_eq!(asset.vertices()[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(asset.vertices()[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(asset.vertices()[2].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_indices_always_reference_vertices() {
        let asset = parse(
            "v -3 -1 2\nv 4 5 6\nv 7 -8 9\nv 1 1 1\nvn 0 1 0\nvn 1 0 0\n\
             f 1//1 2//2 3//1\nf 2//2 3//1 4//2\nf 4//1 1//2 2//1\n",
        );

        let count = asset.vertices().len() as u32;
        assert!(asset.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn test_missing_file_yields_empty_mesh() {
        let path = std::env::temp_dir().join("scene_engine_definitely_missing.obj");
        let asset = ObjLoader::load_obj(&path);
        assert!(asset.is_empty());
        assert!(matches!(ObjLoader::try_load_obj(&path), Err(ObjError::Open { .. })));
    }

    #[test]
    fn test_invalid_utf8_does_not_abort() {
        let mut bytes = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"f 1//1 2//1 3//1\n");

        let asset = ObjLoader::parse(Cursor::new(bytes)).unwrap();
        assert_eq!(asset.indices().len(), 3);
    }
}
