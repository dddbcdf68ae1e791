//! Material system for rendering
//!
//! Objects pick a Phong material from a small fixed table by id.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Identifier of a preset material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialId {
    /// Fallback for any unrecognised id
    #[default]
    Default,
    /// Polished gold
    PolishedGold,
    /// Obsidian
    Obsidian,
    /// Jade
    Jade,
    /// Obsidian with a red ambient term
    RedObsidian,
}

impl MaterialId {
    /// Map a numeric id to a preset; unknown numbers give [`MaterialId::Default`]
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Self::PolishedGold,
            2 => Self::Obsidian,
            3 => Self::Jade,
            4 => Self::RedObsidian,
            _ => Self::Default,
        }
    }

    /// Resolve to material properties
    pub fn material(self) -> Material {
        Material::preset(self)
    }
}

/// Phong material properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance (RGB)
    pub ambient: Vec3,

    /// Diffuse reflectance (RGB)
    pub diffuse: Vec3,

    /// Specular reflectance (RGB)
    pub specular: Vec3,

    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a material from its four terms
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Look up a preset
    pub fn preset(id: MaterialId) -> Self {
        match id {
            MaterialId::PolishedGold => Self::new(
                Vec3::new(0.24725, 0.2245, 0.0645),
                Vec3::new(0.34615, 0.3143, 0.0903),
                Vec3::new(0.797_357, 0.723_991, 0.208_006),
                83.2,
            ),
            MaterialId::Obsidian => Self::new(
                Vec3::new(0.05375, 0.05, 0.06625),
                Vec3::new(0.18275, 0.17, 0.22525),
                Vec3::new(0.332_741, 0.328_634, 0.346_435),
                38.4,
            ),
            MaterialId::Jade => Self::new(
                Vec3::new(0.135, 0.2225, 0.1575),
                Vec3::new(0.54, 0.89, 0.63),
                Vec3::repeat(0.316_228),
                12.8,
            ),
            MaterialId::RedObsidian => Self::new(
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.18275, 0.17, 0.22525),
                Vec3::new(0.332_741, 0.328_634, 0.346_435),
                38.4,
            ),
            MaterialId::Default => Self::new(
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::repeat(0.01),
                Vec3::repeat(0.5),
                32.0,
            ),
        }
    }

    /// Environment reflection strength derived from shininess
    pub fn reflect_intensity(&self) -> f32 {
        self.shininess / 100.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::preset(MaterialId::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_numeric_ids_map_to_presets() {
        assert_eq!(MaterialId::from_index(1), MaterialId::PolishedGold);
        assert_eq!(MaterialId::from_index(4), MaterialId::RedObsidian);
        assert_eq!(MaterialId::from_index(0), MaterialId::Default);
        assert_eq!(MaterialId::from_index(42), MaterialId::Default);
    }

    #[test]
    fn test_reflect_intensity() {
        assert_relative_eq!(MaterialId::PolishedGold.material().reflect_intensity(), 0.832, epsilon = 1e-6);
        assert_relative_eq!(Material::default().reflect_intensity(), 0.32, epsilon = 1e-6);
    }
}
