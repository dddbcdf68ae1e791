//! # Viewer Configuration
//!
//! Tunables for object movement, collision padding, the orbit camera and the
//! world extents. Every section has defaults, so a config file only needs to
//! list what it overrides.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// Object movement tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Forward/backward speed in world units per second
    pub run_speed: f32,
    /// Turn rate in degrees per second
    pub turn_speed_degrees: f32,
    /// Vertical offset kept between terrain height and object origin
    pub height_offset: f32,
    /// Initial Y translation of freshly spawned objects
    pub spawn_height: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            run_speed: 500.0,
            turn_speed_degrees: 900.0,
            height_offset: 0.8,
            spawn_height: 1.0,
        }
    }
}

/// Collision tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Padding added on every axis of the overlap test, in world units
    pub margin: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self { margin: 0.5 }
    }
}

/// Orbit camera tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Initial eye position
    pub eye: [f32; 3],
    /// Initial look-at target
    pub target: [f32; 3],
    /// Initial up vector
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Multiplier applied to trackball rotation angles
    pub rotate_sensitivity: f32,
    /// World units panned per pixel of drag
    pub pan_sensitivity: f32,
    /// World units moved per unit of scroll
    pub zoom_speed: f32,
    /// Closest the eye may get to the target
    pub min_distance: f32,
    /// Farthest the eye may get from the target, unbounded when absent
    pub max_distance: Option<f32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: [0.0, 300.0, 300.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            rotate_sensitivity: 1.0,
            pan_sensitivity: 0.5,
            zoom_speed: 10.0,
            min_distance: 1.0,
            max_distance: None,
        }
    }
}

/// World extents and viewport size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Movement region: X in `[0, boundaries[0]]`, Z in `[0, boundaries[1]]`
    pub boundaries: [f32; 2],
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            boundaries: [1000.0, 1000.0],
            width: 640,
            height: 480,
        }
    }
}

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Object movement
    pub movement: MovementSettings,
    /// Collision detection
    pub collision: CollisionSettings,
    /// Orbit camera
    pub camera: CameraSettings,
    /// World and viewport
    pub world: WorldSettings,
}

impl Config for ViewerConfig {}

impl ViewerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if camera.near <= 0.0 || camera.far <= camera.near {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far (near = {}, far = {})",
                camera.near, camera.far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!("fov_degrees out of range: {}", camera.fov_degrees)));
        }
        if camera.min_distance <= 0.0 {
            return Err(ConfigError::Invalid("min_distance must be positive".to_string()));
        }
        if let Some(max) = camera.max_distance {
            if max < camera.min_distance {
                return Err(ConfigError::Invalid("max_distance is below min_distance".to_string()));
            }
        }
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::Invalid("viewport must be non-empty".to_string()));
        }
        if self.world.boundaries.iter().any(|b| *b < 0.0) {
            return Err(ConfigError::Invalid("boundaries must be non-negative".to_string()));
        }
        if self.collision.margin < 0.0 {
            return Err(ConfigError::Invalid("collision margin must be non-negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("scene_engine_config_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.movement.run_speed, 500.0);
        assert_eq!(config.movement.turn_speed_degrees, 900.0);
        assert_eq!(config.collision.margin, 0.5);
        assert_eq!(config.camera.eye, [0.0, 300.0, 300.0]);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ViewerConfig = toml::from_str("[collision]\nmargin = 0.25\n").unwrap();
        assert_eq!(config.collision.margin, 0.25);
        assert_eq!(config.movement, MovementSettings::default());
        assert_eq!(config.camera, CameraSettings::default());
    }

    #[test]
    fn test_toml_file_roundtrip() {
        let path = temp_path("roundtrip.toml");
        let mut config = ViewerConfig::default();
        config.world.boundaries = [64.0, 32.0];
        config.camera.max_distance = Some(500.0);

        config.save_to_file(&path).unwrap();
        let loaded = ViewerConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_file_roundtrip() {
        let path = temp_path("roundtrip.ron");
        let mut config = ViewerConfig::default();
        config.movement.height_offset = 2.0;

        config.save_to_file(&path).unwrap();
        let loaded = ViewerConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ViewerConfig::default().save_to_file(temp_path("config.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = ViewerConfig::load_or_default(temp_path("missing.toml")).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_invalid_clip_planes_rejected() {
        let mut config = ViewerConfig::default();
        config.camera.far = 0.05;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
