//! Scene session
//!
//! [`Scene`] is the single owner of everything that changes while the viewer
//! runs: the camera, the object registry, mouse drag state, camera mode and
//! the collision result of the last tick. Front-ends forward input and time
//! to it and read back a draw list.

use std::sync::Arc;

use crate::assets::MeshAsset;
use crate::camera::{CameraMode, DragMode, DragState, MouseButton, OrbitCamera};
use crate::config::{MovementSettings, ViewerConfig};
use crate::foundation::collections::{ObjectId, ObjectMap};
use crate::foundation::math::{Vec2, Vec3};
use crate::physics::{CollisionDetector, CollisionSet};
use crate::render::{GeometryBackend, MaterialId, ObjectUniforms};
use crate::scene::{HeightSource, MoveCommand, SceneError, SceneObject};

/// Explicit viewer state, passed to update and render calls
#[derive(Debug)]
pub struct Scene {
    camera: OrbitCamera,
    objects: ObjectMap<SceneObject>,
    order: Vec<ObjectId>,
    drag: DragState,
    camera_mode: CameraMode,
    controlled: Option<ObjectId>,
    boundaries: Vec2,
    toon_shade: bool,
    detector: CollisionDetector,
    collisions: CollisionSet,
    movement: MovementSettings,
}

impl Scene {
    /// Create an empty scene from configuration
    pub fn new(config: &ViewerConfig) -> Self {
        let world = &config.world;
        Self {
            camera: OrbitCamera::from_settings(&config.camera, world.width, world.height),
            objects: ObjectMap::with_key(),
            order: Vec::new(),
            drag: DragState::new(),
            camera_mode: CameraMode::World,
            controlled: None,
            boundaries: Vec2::new(world.boundaries[0], world.boundaries[1]),
            toon_shade: false,
            detector: CollisionDetector::new(config.collision.margin),
            collisions: CollisionSet::new(),
            movement: config.movement.clone(),
        }
    }

    /// Add an object; the first one added becomes the controlled object
    pub fn spawn(&mut self, name: impl Into<String>, mesh: Arc<MeshAsset>, material: MaterialId) -> ObjectId {
        let object = SceneObject::new(name, mesh, material, &self.movement);
        log::info!("Spawned '{}' with {:?}", object.name(), material);

        let id = self.objects.insert(object);
        self.order.push(id);
        if self.controlled.is_none() {
            self.controlled = Some(id);
        }
        id
    }

    /// Remove an object, releasing its GPU geometry
    pub fn despawn(&mut self, id: ObjectId, backend: &mut dyn GeometryBackend) -> Result<SceneObject, SceneError> {
        let mut object = self.objects.remove(id).ok_or(SceneError::UnknownObject(id))?;
        object.release(backend);
        self.order.retain(|other| *other != id);

        if self.controlled == Some(id) {
            self.controlled = self.order.first().copied();
        }
        if self.camera_mode == CameraMode::Follow(id) {
            log::info!("Followed object removed; camera back to world mode");
            self.camera_mode = CameraMode::World;
        }
        Ok(object)
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        self.objects.get(id).ok_or(SceneError::UnknownObject(id))
    }

    /// Look up an object mutably
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        self.objects.get_mut(id).ok_or(SceneError::UnknownObject(id))
    }

    /// Objects in insertion order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.order.iter().filter_map(|id| self.objects.get(*id).map(|object| (*id, object)))
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object receiving movement commands
    pub fn controlled(&self) -> Option<ObjectId> {
        self.controlled
    }

    /// Route movement commands to `id`
    pub fn set_controlled(&mut self, id: ObjectId) -> Result<(), SceneError> {
        self.object(id)?;
        self.controlled = Some(id);
        Ok(())
    }

    /// Current camera mode
    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    /// Switch camera mode; following requires a live object
    pub fn set_camera_mode(&mut self, mode: CameraMode) -> Result<(), SceneError> {
        if let CameraMode::Follow(id) = mode {
            let target = self.object(id)?.translation();
            self.camera.follow(target);
        }
        log::debug!("Camera mode: {:?}", mode);
        self.camera_mode = mode;
        Ok(())
    }

    /// The camera
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// The camera, mutably
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Movement region
    pub fn boundaries(&self) -> Vec2 {
        self.boundaries
    }

    /// Change the movement region
    pub fn set_boundaries(&mut self, boundaries: Vec2) {
        self.boundaries = boundaries;
    }

    /// Toon shading toggle
    pub fn toon_shade(&self) -> bool {
        self.toon_shade
    }

    /// Flip toon shading, returning the new value
    pub fn toggle_toon_shade(&mut self) -> bool {
        self.toon_shade = !self.toon_shade;
        self.toon_shade
    }

    /// Active mouse drag
    pub fn drag_mode(&self) -> DragMode {
        self.drag.mode()
    }

    /// Collision result of the last tick
    pub fn collisions(&self) -> &CollisionSet {
        &self.collisions
    }

    /// Advance one frame
    ///
    /// Applies `commands` to the controlled object, rests every object on
    /// `terrain` when one is given, keeps a following camera on its object
    /// and recomputes the collision set from scratch over every object that
    /// has geometry.
    pub fn tick(&mut self, dt: f32, commands: &[MoveCommand], terrain: Option<&dyn HeightSource>) -> &CollisionSet {
        if let Some(object) = self.controlled.and_then(|id| self.objects.get_mut(id)) {
            for command in commands {
                match command {
                    MoveCommand::Forward => {
                        object.move_forward(self.boundaries, dt);
                    }
                    MoveCommand::Backward => {
                        object.move_backward(self.boundaries, dt);
                    }
                    MoveCommand::TurnLeft => object.turn_left(dt),
                    MoveCommand::TurnRight => object.turn_right(dt),
                }
            }
        } else if !commands.is_empty() {
            log::debug!("No controlled object; {} command(s) dropped", commands.len());
        }

        if let Some(terrain) = terrain {
            for object in self.objects.values_mut() {
                let position = object.translation();
                object.set_height(terrain.height_at(position.x, position.z));
            }
        }

        if let CameraMode::Follow(id) = self.camera_mode {
            match self.objects.get(id) {
                Some(object) => self.camera.follow(object.translation()),
                None => {
                    log::warn!("Followed object vanished; camera back to world mode");
                    self.camera_mode = CameraMode::World;
                }
            }
        }

        // Objects without geometry have no box to collide with
        let solid = self.objects.iter().filter(|(_, object)| !object.mesh().is_empty());
        self.collisions = self.detector.detect_all(solid);
        &self.collisions
    }

    /// Mouse button pressed at `point` (pixels)
    pub fn press(&mut self, button: MouseButton, point: Vec2) {
        self.drag.press(button, point);
    }

    /// Mouse button released
    pub fn release(&mut self, button: MouseButton) {
        self.drag.release(button);
    }

    /// Cursor moved to `point` (pixels); drives the camera while dragging
    pub fn cursor_moved(&mut self, point: Vec2) {
        let Some(step) = self.drag.motion(point) else {
            return;
        };
        if self.camera_mode == CameraMode::World {
            step.apply(&mut self.camera);
        }
    }

    /// Scroll wheel; zooms in world camera mode
    pub fn scroll(&mut self, delta: f32) {
        if self.camera_mode == CameraMode::World {
            self.camera.zoom(delta);
        }
    }

    /// Viewport resized
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Uniforms for every object, in insertion order
    pub fn draw_list(&self) -> Vec<ObjectUniforms> {
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix();
        let eye: Vec3 = self.camera.eye();

        self.objects()
            .map(|(id, object)| {
                object
                    .uniforms(view, projection, eye)
                    .with_toon_shade(self.toon_shade)
                    .with_collision(self.collisions.is_colliding(id))
            })
            .collect()
    }

    /// Upload geometry for every object not yet on the GPU
    pub fn upload_all(&mut self, backend: &mut dyn GeometryBackend) -> Result<(), SceneError> {
        for id in &self.order {
            if let Some(object) = self.objects.get_mut(*id) {
                object.upload(backend)?;
            }
        }
        Ok(())
    }

    /// Release every GPU handle and drop all objects
    pub fn teardown(&mut self, backend: &mut dyn GeometryBackend) {
        for id in self.order.drain(..) {
            if let Some(mut object) = self.objects.remove(id) {
                object.release(backend);
            }
        }
        self.controlled = None;
        self.camera_mode = CameraMode::World;
        self.collisions = CollisionSet::new();
        log::info!("Scene torn down");
    }
}
