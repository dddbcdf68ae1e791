//! Scene objects
//!
//! A [`SceneObject`] places a shared [`MeshAsset`] in the world. It owns the
//! world transform, a facing direction that movement follows, and the GPU
//! handles for its mesh and bounding-box wireframe.

use std::sync::Arc;

use crate::assets::MeshAsset;
use crate::config::MovementSettings;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Point3, Vec2, Vec3};
use crate::physics::Aabb;
use crate::render::{
    box_geometry, box_triangles, BackendResult, GeometryBackend, GeometryHandle, Material, MaterialId, ObjectUniforms,
    BOX_VERTEX_COUNT,
};

/// A mesh instance with transform, movement state and GPU handles
#[derive(Debug)]
pub struct SceneObject {
    name: String,
    mesh: Arc<MeshAsset>,
    material_id: MaterialId,
    material: Material,

    transform: Mat4,
    direction: Vec3,

    /// Forward/backward speed in world units per second
    pub speed: f32,
    /// Turn rate in degrees per second
    pub turn_speed: f32,
    /// Gap kept between terrain height and the object origin
    pub height_offset: f32,

    mesh_handle: Option<GeometryHandle>,
    box_handle: Option<GeometryHandle>,
}

impl SceneObject {
    /// Place `mesh` at `(0, spawn_height, 0)` facing +Z
    pub fn new(name: impl Into<String>, mesh: Arc<MeshAsset>, material_id: MaterialId, movement: &MovementSettings) -> Self {
        let mut transform = Mat4::identity();
        transform.set_translation(Vec3::new(0.0, movement.spawn_height, 0.0));

        Self {
            name: name.into(),
            mesh,
            material_id,
            material: material_id.material(),
            transform,
            direction: Vec3::z(),
            speed: movement.run_speed,
            turn_speed: movement.turn_speed_degrees,
            height_offset: movement.height_offset,
            mesh_handle: None,
            box_handle: None,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared mesh
    pub fn mesh(&self) -> &Arc<MeshAsset> {
        &self.mesh
    }

    /// Material preset id
    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    /// Resolved material
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// World transform
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// World position
    pub fn translation(&self) -> Vec3 {
        self.transform.translation()
    }

    /// Move to `position` without changing orientation
    pub fn set_translation(&mut self, position: Vec3) {
        self.transform.set_translation(position);
    }

    /// Unit facing direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Step along the facing direction; returns `false` if the move was rejected
    pub fn move_forward(&mut self, boundaries: Vec2, dt: f32) -> bool {
        self.step(self.direction * (self.speed * dt), boundaries)
    }

    /// Step against the facing direction; returns `false` if the move was rejected
    pub fn move_backward(&mut self, boundaries: Vec2, dt: f32) -> bool {
        self.step(-self.direction * (self.speed * dt), boundaries)
    }

    fn step(&mut self, displacement: Vec3, boundaries: Vec2) -> bool {
        let current = self.translation();
        let candidate = current + displacement;

        let inside = (0.0..=boundaries.x).contains(&candidate.x) && (0.0..=boundaries.y).contains(&candidate.z);
        if !inside {
            log::debug!(
                "{}: move to ({:.2}, {:.2}) outside [0, {}] x [0, {}] rejected",
                self.name,
                candidate.x,
                candidate.z,
                boundaries.x,
                boundaries.y
            );
            return false;
        }

        self.set_translation(candidate);
        true
    }

    /// Turn counter-clockwise (seen from above)
    pub fn turn_left(&mut self, dt: f32) {
        self.turn(utils::deg_to_rad(self.turn_speed * dt));
    }

    /// Turn clockwise (seen from above)
    pub fn turn_right(&mut self, dt: f32) {
        self.turn(-utils::deg_to_rad(self.turn_speed * dt));
    }

    fn turn(&mut self, angle: f32) {
        let rotation = Mat4::rotation_y(angle);
        let turned = rotation.transform_vector(&self.direction);
        match utils::try_normalize(turned) {
            Some(direction) => self.direction = direction,
            None => log::warn!("{}: facing direction collapsed; keeping previous", self.name),
        }
        // Local frame: rotation applied before the existing transform
        self.transform *= rotation;
    }

    /// Rest the object on terrain at height `height`
    pub fn set_height(&mut self, height: f32) {
        let mut position = self.translation();
        position.y = height + self.height_offset;
        self.set_translation(position);
    }

    /// World-space corners of the mesh bounding box
    ///
    /// The box is the mesh's extents in normalized (render) space, carried by
    /// the full world transform, so it stays glued to the drawn geometry.
    pub fn bounding_corners(&self) -> [Vec3; 8] {
        self.mesh
            .normalized_extents()
            .corners()
            .map(|corner| self.transform.transform_point(&Point3::from(corner)).coords)
    }

    /// Axis-aligned box around [`bounding_corners`](Self::bounding_corners)
    pub fn world_aabb(&self) -> Aabb {
        let corners = self.bounding_corners();
        Aabb::from_points(&corners).unwrap_or_else(|| Aabb::new(self.translation(), self.translation()))
    }

    /// Bounding-box wireframe as a 36-position triangle list
    pub fn wireframe(&self) -> [Vec3; BOX_VERTEX_COUNT] {
        box_triangles(&self.bounding_corners())
    }

    /// Per-frame uniforms for this object
    pub fn uniforms(&self, view: Mat4, projection: Mat4, view_pos: Vec3) -> ObjectUniforms {
        ObjectUniforms::new(self.transform, view, projection, view_pos, self.material)
    }

    /// Whether the mesh has been uploaded
    pub fn is_uploaded(&self) -> bool {
        self.mesh_handle.is_some()
    }

    /// GPU handles for the mesh and the bounding box
    pub fn handles(&self) -> (Option<GeometryHandle>, Option<GeometryHandle>) {
        (self.mesh_handle, self.box_handle)
    }

    /// Upload mesh and bounding-box geometry
    ///
    /// An empty mesh is never uploaded. Calling again after a successful
    /// upload does nothing.
    pub fn upload(&mut self, backend: &mut dyn GeometryBackend) -> BackendResult<()> {
        if self.mesh.is_empty() {
            log::debug!("{}: empty mesh, nothing to upload", self.name);
            return Ok(());
        }

        if self.mesh_handle.is_none() {
            let handle = backend.upload_geometry(&self.name, self.mesh.vertices(), self.mesh.indices())?;
            self.mesh_handle = Some(handle);
        }

        if self.box_handle.is_none() {
            // Box corners in mesh space; the model matrix places them
            let (vertices, indices) = box_geometry(&self.mesh.normalized_extents().corners());
            let label = format!("{} bounds", self.name);
            let handle = backend.upload_geometry(&label, &vertices, &indices)?;
            self.box_handle = Some(handle);
        }

        Ok(())
    }

    /// Release every GPU handle; safe to call more than once
    pub fn release(&mut self, backend: &mut dyn GeometryBackend) {
        if self.mesh_handle.is_none() && self.box_handle.is_none() {
            log::debug!("{}: nothing to release", self.name);
            return;
        }

        for handle in [self.mesh_handle.take(), self.box_handle.take()].into_iter().flatten() {
            if let Err(e) = backend.release_geometry(handle) {
                log::warn!("{}: failed to release {:?}: {}", self.name, handle, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ObjStats, MeshAsset};
    use crate::render::{HeadlessBackend, Mesh, Vertex};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn cube_mesh() -> Arc<MeshAsset> {
        let vertices = (0..8)
            .map(|i| {
                let p = [
                    if i & 1 == 0 { -2.0 } else { 2.0 },
                    if i & 2 == 0 { -2.0 } else { 2.0 },
                    if i & 4 == 0 { -2.0 } else { 2.0 },
                ];
                Vertex::from_position(p)
            })
            .collect();
        let indices = vec![0, 1, 3, 0, 3, 2, 4, 6, 7, 4, 7, 5];
        Arc::new(MeshAsset::from_raw(Mesh::new(vertices, indices), ObjStats::default()))
    }

    fn object() -> SceneObject {
        SceneObject::new("cube", cube_mesh(), MaterialId::Jade, &MovementSettings::default())
    }

    #[test]
    fn test_spawn_state() {
        let obj = object();
        assert_eq!(obj.translation(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(obj.direction(), Vec3::z());
        assert_eq!(obj.speed, 500.0);
    }

    #[test]
    fn test_move_inside_bounds_is_exact() {
        let mut obj = object();
        obj.set_translation(Vec3::new(50.0, 1.0, 50.0));

        assert!(obj.move_forward(Vec2::new(1000.0, 1000.0), 0.01));
        assert_relative_eq!(obj.translation(), Vec3::new(50.0, 1.0, 55.0), epsilon = EPSILON);

        assert!(obj.move_backward(Vec2::new(1000.0, 1000.0), 0.02));
        assert_relative_eq!(obj.translation(), Vec3::new(50.0, 1.0, 45.0), epsilon = EPSILON);
    }

    #[test]
    fn test_move_outside_bounds_is_rejected() {
        let mut obj = object();
        obj.set_translation(Vec3::new(10.0, 1.0, 98.0));

        assert!(!obj.move_forward(Vec2::new(100.0, 100.0), 0.01));
        assert_eq!(obj.translation(), Vec3::new(10.0, 1.0, 98.0));

        // Spawn point sits on the z = 0 edge; backing up leaves the region
        let mut fresh = object();
        assert!(!fresh.move_backward(Vec2::new(100.0, 100.0), 0.001));
        assert_eq!(fresh.translation(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_turning_keeps_unit_direction() {
        let mut obj = object();
        for i in 0..1000 {
            if i % 3 == 0 {
                obj.turn_right(0.0137);
            } else {
                obj.turn_left(0.0071);
            }
        }
        assert_relative_eq!(obj.direction().magnitude(), 1.0, epsilon = 1e-6);
        assert_eq!(obj.direction().y, 0.0);
    }

    #[test]
    fn test_turn_left_quarter() {
        let mut obj = object();
        obj.turn_speed = 90.0;
        obj.turn_left(1.0);

        assert_relative_eq!(obj.direction(), Vec3::x(), epsilon = EPSILON);
        // Model +Z now points along world +X
        let forward = obj.transform().transform_vector(&Vec3::z());
        assert_relative_eq!(forward, Vec3::x(), epsilon = EPSILON);
        assert_eq!(obj.translation(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_set_height_adds_offset() {
        let mut obj = object();
        obj.set_height(3.0);
        assert_relative_eq!(obj.translation().y, 3.8, epsilon = EPSILON);
    }

    #[test]
    fn test_bounding_corners_follow_translation() {
        let mut obj = object();
        obj.set_translation(Vec3::new(10.0, 0.0, 20.0));
        let aabb = obj.world_aabb();

        assert_relative_eq!(aabb.min, Vec3::new(9.0, -1.0, 19.0), epsilon = EPSILON);
        assert_relative_eq!(aabb.max, Vec3::new(11.0, 1.0, 21.0), epsilon = EPSILON);
        assert_eq!(obj.wireframe().len(), 36);
    }

    #[test]
    fn test_world_aabb_wraps_turned_box() {
        let mut obj = object();
        obj.set_translation(Vec3::new(10.0, 1.0, 20.0));
        obj.turn_speed = 45.0;
        obj.turn_left(1.0);

        let aabb = obj.world_aabb();
        let diagonal = std::f32::consts::SQRT_2;
        assert_relative_eq!(aabb.center(), Vec3::new(10.0, 1.0, 20.0), epsilon = EPSILON);
        assert_relative_eq!(aabb.half_extents(), Vec3::new(diagonal, 1.0, diagonal), epsilon = EPSILON);

        // Corners stay on the turned cube, one unit from its center on each local axis
        for corner in obj.bounding_corners() {
            let local = corner - obj.translation();
            assert_relative_eq!(local.magnitude(), 3.0_f32.sqrt(), epsilon = EPSILON);
            assert_relative_eq!(local.y.abs(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_upload_and_release_once() {
        let mut backend = HeadlessBackend::new();
        let mut obj = object();
        assert_eq!(obj.handles(), (None, None));

        obj.upload(&mut backend).unwrap();
        let handles = obj.handles();
        obj.upload(&mut backend).unwrap();
        assert_eq!(backend.live_count(), 2);
        assert_eq!(obj.handles(), handles);
        assert!(handles.0.is_some() && handles.1.is_some());
        assert_ne!(handles.0, handles.1);

        obj.release(&mut backend);
        obj.release(&mut backend);
        assert_eq!(backend.live_count(), 0);
        assert_eq!(backend.released_count(), 2);
        assert!(!obj.is_uploaded());
    }

    #[test]
    fn test_empty_mesh_is_never_uploaded() {
        let mut backend = HeadlessBackend::new();
        let mut obj = SceneObject::new("void", Arc::new(MeshAsset::empty()), MaterialId::Default, &MovementSettings::default());

        obj.upload(&mut backend).unwrap();
        assert_eq!(backend.live_count(), 0);
        assert!(!obj.is_uploaded());
    }
}
