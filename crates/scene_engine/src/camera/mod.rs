//! # Camera Control
//!
//! [`OrbitCamera`] holds the view transform. [`DragState`] turns raw mouse
//! button and cursor events into the rotate / pan steps the camera consumes.

pub mod orbit_camera;
pub mod trackball;

pub use orbit_camera::{CameraBasis, OrbitCamera};
pub use trackball::{map_to_sphere, rotation_between, TrackballRotation};

use crate::foundation::collections::ObjectId;
use crate::foundation::math::Vec2;

/// Mouse buttons the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button, rotates
    Left,
    /// Secondary button, pans
    Right,
    /// Any other button
    Other,
}

/// Active mouse drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// No drag in progress
    #[default]
    Idle,
    /// Left button held
    Rotating,
    /// Right button held
    Panning,
}

/// What the camera is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Free orbit camera under mouse control
    #[default]
    World,
    /// Target tracks an object; mouse drags and scrolling are ignored
    Follow(ObjectId),
}

/// One camera step produced by cursor motion during a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// Drag kind
    pub mode: DragMode,
    /// Previous cursor position
    pub from: Vec2,
    /// Current cursor position
    pub to: Vec2,
}

impl DragStep {
    /// Apply this step to `camera`
    pub fn apply(&self, camera: &mut OrbitCamera) {
        match self.mode {
            DragMode::Rotating => camera.rotate_around(self.from, self.to),
            DragMode::Panning => camera.translate(self.from, self.to),
            DragMode::Idle => {}
        }
    }
}

/// Mouse drag state machine
///
/// Transitions:
/// - `Idle` + left press → `Rotating`
/// - `Idle` + right press → `Panning`
/// - `Rotating` + left release, `Panning` + right release → `Idle`
///
/// Every other press or release is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    mode: DragMode,
    last_point: Vec2,
}

impl DragState {
    /// Idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode
    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Cursor position the next step starts from
    pub fn last_point(&self) -> Vec2 {
        self.last_point
    }

    /// Handle a button press at `point`; returns whether a drag started
    pub fn press(&mut self, button: MouseButton, point: Vec2) -> bool {
        if self.mode != DragMode::Idle {
            return false;
        }
        self.mode = match button {
            MouseButton::Left => DragMode::Rotating,
            MouseButton::Right => DragMode::Panning,
            MouseButton::Other => return false,
        };
        self.last_point = point;
        log::trace!("Drag started: {:?} at {:?}", self.mode, point);
        true
    }

    /// Handle a button release; returns whether the drag ended
    pub fn release(&mut self, button: MouseButton) -> bool {
        let ends = matches!(
            (self.mode, button),
            (DragMode::Rotating, MouseButton::Left) | (DragMode::Panning, MouseButton::Right)
        );
        if ends {
            self.mode = DragMode::Idle;
        }
        ends
    }

    /// Handle cursor motion, yielding a step when a drag is active
    pub fn motion(&mut self, point: Vec2) -> Option<DragStep> {
        if self.mode == DragMode::Idle {
            return None;
        }
        let step = DragStep {
            mode: self.mode,
            from: self.last_point,
            to: point,
        };
        self.last_point = point;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_only_from_idle() {
        let mut drag = DragState::new();
        assert!(drag.press(MouseButton::Left, Vec2::new(1.0, 2.0)));
        assert!(!drag.press(MouseButton::Right, Vec2::new(5.0, 5.0)));
        assert_eq!(drag.mode(), DragMode::Rotating);
        assert_eq!(drag.last_point(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_release_must_match_button() {
        let mut drag = DragState::new();
        drag.press(MouseButton::Right, Vec2::zeros());
        assert!(!drag.release(MouseButton::Left));
        assert_eq!(drag.mode(), DragMode::Panning);
        assert!(drag.release(MouseButton::Right));
        assert_eq!(drag.mode(), DragMode::Idle);
    }

    #[test]
    fn test_motion_advances_last_point() {
        let mut drag = DragState::new();
        assert!(drag.motion(Vec2::new(3.0, 3.0)).is_none());

        drag.press(MouseButton::Left, Vec2::new(0.0, 0.0));
        let first = drag.motion(Vec2::new(10.0, 0.0)).unwrap();
        let second = drag.motion(Vec2::new(20.0, 5.0)).unwrap();

        assert_eq!(first.from, Vec2::new(0.0, 0.0));
        assert_eq!(second.from, Vec2::new(10.0, 0.0));
        assert_eq!(second.to, Vec2::new(20.0, 5.0));
        assert_eq!(second.mode, DragMode::Rotating);
    }

    #[test]
    fn test_other_button_is_ignored() {
        let mut drag = DragState::new();
        assert!(!drag.press(MouseButton::Other, Vec2::zeros()));
        assert_eq!(drag.mode(), DragMode::Idle);
    }
}
