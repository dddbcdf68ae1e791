//! Normalized mesh assets
//!
//! A [`MeshAsset`] is a [`Mesh`] that has been recentred on the middle of its
//! bounding box and uniformly scaled so its longest half-extent is 1. The
//! [`NormalizationParams`] used for that are kept alongside the geometry so
//! that bounding-volume math lands in the same space as the rendered mesh.

use crate::foundation::math::{constants, Vec3};
use crate::render::{Mesh, Vertex};

/// Axis-aligned extents of the raw (source unit) positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Per-axis minimum
    pub min: Vec3,
    /// Per-axis maximum
    pub max: Vec3,
}

impl Default for Extents {
    fn default() -> Self {
        Self::empty()
    }
}

impl Extents {
    /// Extents that contain nothing; the first [`include`](Self::include) defines them
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Extents spanning `min` to `max`
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Whether no point has been included
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to contain `point`
    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Midpoint of min and max on every axis
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half of the width on every axis
    pub fn half_widths(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corners, bit 0/1/2 of the index selecting max on X/Y/Z
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }
}

/// Center and divisor that map raw positions into the unit-scaled mesh space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationParams {
    /// Center of the raw bounding box
    pub center: Vec3,
    /// Largest centred half-extent over the three axes
    pub longest_extent: f32,
}

impl Default for NormalizationParams {
    fn default() -> Self {
        Self::identity()
    }
}

impl NormalizationParams {
    /// Parameters that leave positions untouched
    pub fn identity() -> Self {
        Self {
            center: Vec3::zeros(),
            longest_extent: 1.0,
        }
    }

    /// Derive the parameters from raw extents
    ///
    /// Empty extents give [`identity`](Self::identity). A box with no size on
    /// any axis keeps its center but scales by 1, collapsing onto the origin.
    pub fn from_extents(extents: &Extents) -> Self {
        if extents.is_empty() {
            return Self::identity();
        }

        let center = extents.center();
        let half = extents.max - center;
        let longest = half.x.max(half.y).max(half.z);

        Self {
            center,
            longest_extent: if longest > constants::DEGENERATE_EPSILON { longest } else { 1.0 },
        }
    }

    /// Uniform scale factor applied after centring
    pub fn scale(&self) -> f32 {
        1.0 / self.longest_extent
    }

    /// Map a raw position into normalized mesh space
    pub fn normalize_point(&self, point: Vec3) -> Vec3 {
        (point - self.center) * self.scale()
    }

    /// Map raw extents into normalized mesh space
    pub fn normalize_extents(&self, extents: &Extents) -> Extents {
        Extents::new(self.normalize_point(extents.min), self.normalize_point(extents.max))
    }
}

/// Parse statistics gathered while loading a mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjStats {
    /// Accepted `v` records
    pub positions: usize,
    /// Accepted `vn` records
    pub normals: usize,
    /// Accepted faces
    pub faces: usize,
    /// Records that were recognised but malformed and therefore skipped
    pub skipped: usize,
}

/// Immutable, unit-scaled mesh loaded from a file
#[derive(Debug, Clone, Default)]
pub struct MeshAsset {
    mesh: Mesh,
    extents: Extents,
    params: NormalizationParams,
    stats: ObjStats,
}

impl MeshAsset {
    /// An asset with no geometry; what a failed load produces
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an asset from raw (source unit) geometry, normalizing the positions
    pub fn from_raw(mesh: Mesh, stats: ObjStats) -> Self {
        let mut extents = Extents::empty();
        for vertex in &mesh.vertices {
            extents.include(Vec3::from(vertex.position));
        }
        Self::from_raw_with_extents(mesh, extents, stats)
    }

    /// Build from raw geometry when the raw extents are already known
    ///
    /// `extents` may be wider than the vertices (positions that no face
    /// referenced still count toward the bounds).
    pub(crate) fn from_raw_with_extents(mut mesh: Mesh, extents: Extents, stats: ObjStats) -> Self {
        let params = NormalizationParams::from_extents(&extents);
        for vertex in &mut mesh.vertices {
            vertex.position = params.normalize_point(Vec3::from(vertex.position)).into();
        }
        Self {
            mesh,
            extents,
            params,
            stats,
        }
    }

    /// Normalized geometry
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Normalized vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.vertices
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    /// Raw extents in source units
    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    /// Shared normalization parameters
    pub fn params(&self) -> &NormalizationParams {
        &self.params
    }

    /// Center of the raw bounding box
    pub fn center(&self) -> Vec3 {
        self.params.center
    }

    /// Largest centred half-extent in source units
    pub fn longest_extent(&self) -> f32 {
        self.params.longest_extent
    }

    /// Bounding box of the mesh in normalized space
    pub fn normalized_extents(&self) -> Extents {
        if self.extents.is_empty() {
            return Extents::new(Vec3::zeros(), Vec3::zeros());
        }
        self.params.normalize_extents(&self.extents)
    }

    /// Parse statistics
    pub fn stats(&self) -> &ObjStats {
        &self.stats
    }

    /// Whether the load produced no drawable geometry
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}
