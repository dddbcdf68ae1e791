//! # Orbit Camera
//!
//! Eye / target / up camera driven by mouse drags and scrolling. Rotation
//! uses trackball mapping about the target, panning slides eye and target
//! together, zooming moves the eye along the viewing axis.
//!
//! Every mutating operation rebuilds the view matrix before returning, so
//! [`OrbitCamera::view_matrix`] is always current.

use crate::camera::trackball;
use crate::config::CameraSettings;
use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Unit, Vec2, Vec3};

/// Orthonormal camera frame in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Screen right
    pub right: Vec3,
    /// Screen up
    pub up: Vec3,
    /// Viewing direction, eye toward target
    pub forward: Vec3,
}

/// Orbit-style perspective camera
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    view: Mat4,

    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,

    viewport: (u32, u32),

    /// Multiplier on trackball angles
    pub rotate_sensitivity: f32,
    /// World units per pixel of pan
    pub pan_sensitivity: f32,
    /// World units per unit of scroll
    pub zoom_speed: f32,
    /// Closest allowed eye-target distance
    pub min_distance: f32,
    /// Farthest allowed eye-target distance
    pub max_distance: Option<f32>,
}

impl OrbitCamera {
    /// Create a camera from eye, target and up with default tuning
    pub fn new(eye: Vec3, target: Vec3, up: Vec3, width: u32, height: u32) -> Self {
        let settings = CameraSettings {
            eye: eye.into(),
            target: target.into(),
            up: up.into(),
            ..CameraSettings::default()
        };
        Self::from_settings(&settings, width, height)
    }

    /// Create a camera from configuration
    pub fn from_settings(settings: &CameraSettings, width: u32, height: u32) -> Self {
        let mut camera = Self {
            eye: Vec3::from(settings.eye),
            target: Vec3::from(settings.target),
            up: Vec3::from(settings.up),
            view: Mat4::identity(),
            fov: utils::deg_to_rad(settings.fov_degrees),
            aspect: 1.0,
            near: settings.near,
            far: settings.far,
            viewport: (width, height),
            rotate_sensitivity: settings.rotate_sensitivity,
            pan_sensitivity: settings.pan_sensitivity,
            zoom_speed: settings.zoom_speed,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
        };
        camera.resize(width, height);
        if !camera.recompute_view() {
            log::warn!("Initial camera orientation is degenerate; using identity view");
        }
        camera
    }

    /// Eye position
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Look-at target
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Eye to target distance
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).magnitude()
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Current view matrix
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Right / up / forward frame, or `None` if the orientation is degenerate
    pub fn basis(&self) -> Option<CameraBasis> {
        let forward = utils::try_normalize(self.target - self.eye)?;
        let right = utils::try_normalize(forward.cross(&self.up))?;
        let up = right.cross(&forward);
        Some(CameraBasis { right, up, forward })
    }

    /// Adapt to a new viewport; a zero height is ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.viewport = (width, height);
        self.aspect = width as f32 / height as f32;
    }

    /// Replace eye, target and up together
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.eye = eye;
        self.target = target;
        self.up = up;
        self.recompute_view();
    }

    /// Move eye and target so the target lands on `target`, keeping the offset
    pub fn follow(&mut self, target: Vec3) {
        let offset = target - self.target;
        self.eye += offset;
        self.target = target;
        self.recompute_view();
    }

    /// Orbit the eye about the target by the drag from `from` to `to` (pixels)
    ///
    /// The eye and up vector turn against the trackball rotation so the scene
    /// appears to follow the cursor. Identical or antipodal points leave the
    /// camera untouched.
    pub fn rotate_around(&mut self, from: Vec2, to: Vec2) {
        let (width, height) = self.viewport;
        let a = trackball::map_to_sphere(from, width, height);
        let b = trackball::map_to_sphere(to, width, height);

        let Some(rotation) = trackball::rotation_between(a, b) else {
            log::trace!("Trackball drag without rotation axis ignored");
            return;
        };
        let Some(basis) = self.basis() else {
            log::warn!("Camera basis is degenerate; rotation skipped");
            return;
        };

        // Trackball space is view space: x right, y up, z toward the viewer
        let axis = rotation.axis;
        let world_axis = basis.right * axis.x + basis.up * axis.y - basis.forward * axis.z;
        let Some(world_axis) = Unit::try_new(world_axis, constants::DEGENERATE_EPSILON) else {
            return;
        };

        let angle = -rotation.angle * self.rotate_sensitivity;
        log::trace!("Orbiting {:.2} degrees about {:?}", utils::rad_to_deg(angle), world_axis.as_ref());
        let turn = Mat4::rotation_axis(&world_axis, angle);

        let offset = turn.transform_vector(&(self.eye - self.target));
        self.eye = self.target + offset;
        self.up = turn.transform_vector(&self.up);
        self.recompute_view();
    }

    /// Pan eye and target together by the drag from `from` to `to` (pixels)
    pub fn translate(&mut self, from: Vec2, to: Vec2) {
        let delta = to - from;
        if delta.x == 0.0 && delta.y == 0.0 {
            return;
        }
        let Some(basis) = self.basis() else {
            log::warn!("Camera basis is degenerate; pan skipped");
            return;
        };

        let pan = (-basis.right * delta.x + basis.up * delta.y) * self.pan_sensitivity;
        self.eye += pan;
        self.target += pan;
        self.recompute_view();
    }

    /// Move the eye along the viewing axis; positive `scroll` moves closer
    ///
    /// The eye never passes `min_distance` from the target.
    pub fn zoom(&mut self, scroll: f32) {
        let offset = self.eye - self.target;
        let Some(direction) = utils::try_normalize(offset) else {
            log::warn!("Eye coincides with target; zoom skipped");
            return;
        };

        let mut distance = (offset.magnitude() - scroll * self.zoom_speed).max(self.min_distance);
        if let Some(max) = self.max_distance {
            distance = distance.min(max);
        }

        self.eye = self.target + direction * distance;
        self.recompute_view();
    }

    /// Rebuild the view matrix from eye, target and up
    ///
    /// Returns `false` and keeps the previous matrix when up is parallel to
    /// the viewing direction or the eye sits on the target.
    pub fn recompute_view(&mut self) -> bool {
        let forward = self.target - self.eye;
        if utils::try_normalize(forward).is_none()
            || utils::try_normalize(self.up).is_none()
            || utils::is_parallel(forward, self.up)
        {
            log::warn!(
                "Degenerate camera (eye {:?}, target {:?}, up {:?}); keeping previous view",
                self.eye,
                self.target,
                self.up
            );
            return false;
        }

        self.view = Mat4::look_at(self.eye, self.target, self.up);
        true
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default(), 640, 480)
    }
}
