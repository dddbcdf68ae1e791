//! Named-uniform draw contract
//!
//! Per object and per frame the scene produces an [`ObjectUniforms`] value.
//! A renderer receives it through [`UniformSink`] under these names:
//!
//! | name                 | type  |
//! |----------------------|-------|
//! | `MVP`                | mat4  |
//! | `model`              | mat4  |
//! | `view`               | mat4  |
//! | `projection`         | mat4  |
//! | `viewPos`            | vec3  |
//! | `toon_shade`         | int   |
//! | `material.ambient`   | vec3  |
//! | `material.diffuse`   | vec3  |
//! | `material.specular`  | vec3  |
//! | `material.shininess` | float |
//! | `reflect_intensity`  | float |
//! | `collisionFlag`      | int   |

use std::collections::BTreeMap;

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::material::Material;

/// Receiver for named shader uniforms
pub trait UniformSink {
    /// Set a 4x4 matrix uniform (column-major)
    fn set_mat4(&mut self, name: &str, value: [[f32; 4]; 4]);

    /// Set a 3-component vector uniform
    fn set_vec3(&mut self, name: &str, value: [f32; 3]);

    /// Set a float uniform
    fn set_f32(&mut self, name: &str, value: f32);

    /// Set an integer uniform
    fn set_i32(&mut self, name: &str, value: i32);
}

/// Everything the renderer needs to draw one object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectUniforms {
    /// Projection * view * model
    pub mvp: Mat4,
    /// Object world transform
    pub model: Mat4,
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
    /// Camera eye position
    pub view_pos: Vec3,
    /// Toon shading toggle
    pub toon_shade: bool,
    /// Surface material
    pub material: Material,
    /// Whether the object overlapped another this tick
    pub collision: bool,
}

impl ObjectUniforms {
    /// Assemble uniforms, composing the MVP as `projection * view * model`
    pub fn new(model: Mat4, view: Mat4, projection: Mat4, view_pos: Vec3, material: Material) -> Self {
        Self {
            mvp: projection * view * model,
            model,
            view,
            projection,
            view_pos,
            toon_shade: false,
            material,
            collision: false,
        }
    }

    /// Set the toon shading toggle
    pub fn with_toon_shade(mut self, toon_shade: bool) -> Self {
        self.toon_shade = toon_shade;
        self
    }

    /// Set the collision indicator
    pub fn with_collision(mut self, collision: bool) -> Self {
        self.collision = collision;
        self
    }

    /// Write every uniform to `sink`
    pub fn apply(&self, sink: &mut dyn UniformSink) {
        sink.set_mat4("MVP", self.mvp.to_cols_array());
        sink.set_mat4("model", self.model.to_cols_array());
        sink.set_mat4("view", self.view.to_cols_array());
        sink.set_mat4("projection", self.projection.to_cols_array());
        sink.set_vec3("viewPos", self.view_pos.into());
        sink.set_i32("toon_shade", i32::from(self.toon_shade));
        sink.set_vec3("material.ambient", self.material.ambient.into());
        sink.set_vec3("material.diffuse", self.material.diffuse.into());
        sink.set_vec3("material.specular", self.material.specular.into());
        sink.set_f32("material.shininess", self.material.shininess);
        sink.set_f32("reflect_intensity", self.material.reflect_intensity());
        sink.set_i32("collisionFlag", i32::from(self.collision));
    }
}

/// A uniform value captured by [`UniformRecorder`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// mat4
    Mat4([[f32; 4]; 4]),
    /// vec3
    Vec3([f32; 3]),
    /// float
    Float(f32),
    /// int
    Int(i32),
}

/// Sink that stores the last value written under each name
#[derive(Debug, Default, Clone)]
pub struct UniformRecorder {
    values: BTreeMap<String, UniformValue>,
}

impl UniformRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Value last written under `name`
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    /// Integer value last written under `name`
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            UniformValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Names written so far, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Forget all values
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl UniformSink for UniformRecorder {
    fn set_mat4(&mut self, name: &str, value: [[f32; 4]; 4]) {
        self.values.insert(name.to_string(), UniformValue::Mat4(value));
    }

    fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.values.insert(name.to_string(), UniformValue::Vec3(value));
    }

    fn set_f32(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), UniformValue::Float(value));
    }

    fn set_i32(&mut self, name: &str, value: i32) {
        self.values.insert(name.to_string(), UniformValue::Int(value));
    }
}
